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

//! A hybrid burst-trie ordered string dictionary.
//!
//! Small key prefixes are pre-materialized into a flat "boot" array;
//! beneath it, `Array` leaf containers grow through a size-class ladder,
//! overflow into a `Pail` (a small hash table of arrays), and burst into a
//! `Bucket` (a larger hash table) and finally a `Radix` interior node as
//! they accumulate keys. The structure keeps insert/lookup close to O(key
//! length) while supporting ordered traversal and seek through a cursor
//! that sorts each leaf only when it is actually visited.
//!
//! Everything here is single-threaded and unsafe at the core: nodes are
//! raw-pointer handles into an arena the dictionary owns outright, not
//! Rust-tracked allocations. The public `Dict`/`DictRaw` facade is the
//! safe boundary; nothing below `trie` and `container` should be reachable
//! from outside the crate.

pub mod config;
mod container;
mod cursor;
mod dict;
pub mod error;
mod mem;
mod trie;

pub use config::HatConfig;
pub use cursor::Cursor;
pub use dict::{Dict, DictRaw};
pub use error::{CoreError, CoreResult};
