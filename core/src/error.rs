/*
 * This file is part of hatrie, a hybrid burst-trie dictionary.
 *
 * hatrie is free software: you can redistribute it and/or modify
 * it under the terms of the GNU Affero General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * hatrie is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU Affero General Public License for more details.
 *
 * You should have received a copy of the GNU Affero General Public License
 * along with hatrie. If not, see <https://www.gnu.org/licenses/>.
 */

//! Error taxonomy for the engine. Allocator exhaustion is not represented here:
//! it is fatal and aborts the process from within the arena, matching the
//! allocation helpers in `mem::unsafe_apis`.

use std::fmt;

pub type CoreResult<T> = Result<T, CoreError>;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[repr(u8)]
pub enum CoreError {
    /// the key exceeds the 16,383 byte contract bound. the engine does not
    /// validate key length on the hot insert/lookup path; this is only
    /// raised by the entry points that accept a raw byte slice from a
    /// caller who hasn't already guaranteed the bound.
    KeyTooLong { len: usize, max: usize },
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::KeyTooLong { len, max } => {
                write!(f, "key of length {len} exceeds the maximum of {max} bytes")
            }
        }
    }
}

impl std::error::Error for CoreError {}
