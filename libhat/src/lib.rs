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

//! Shared utilities for the external collaborators (`driver`, `bench`) that sit
//! on top of the `hatrie-core` engine. Nothing in this crate touches the core
//! itself; it only exists so the two binaries don't duplicate boilerplate.

pub mod util;

use std::error::Error;

/// A generic result used by the binaries, not by the core (the core never boxes
/// its errors, see `hatrie_core::error`).
pub type TResult<T> = Result<T, Box<dyn Error>>;

/// Crate version string, reported by `--version` in both binaries.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
