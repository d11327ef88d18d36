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

pub mod arena;
pub mod slot;
pub mod unsafe_apis;

pub use arena::Arena;
pub use slot::{Slot, Tag};
