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

//! The public handle. `DictRaw` is the byte-oriented facade matching the
//! external operation set directly (`open`/`close`/`cell`/`find`/`data`/
//! cursor ops); `Dict<Aux>` wraps it with a statically sized aux payload so
//! callers don't juggle raw pointers for the common case of a
//! `Copy`-able fixed-size value per key.

use crate::config::{HatConfig, KEY_MAX_LEN};
use crate::cursor::Cursor;
use crate::error::{CoreError, CoreResult};
use crate::trie::engine::Engine;
use std::marker::PhantomData;
use std::mem;

fn check_key_len(key: &[u8]) -> CoreResult<()> {
    if key.len() > KEY_MAX_LEN {
        return Err(CoreError::KeyTooLong {
            len: key.len(),
            max: KEY_MAX_LEN,
        });
    }
    Ok(())
}

/// The byte-oriented dictionary handle. The aux payload width is a runtime
/// property of the configuration rather than a type parameter.
pub struct DictRaw {
    engine: Engine,
}

impl DictRaw {
    pub fn open(config: HatConfig) -> Self {
        Self {
            engine: Engine::open(config),
        }
    }

    pub fn len(&self) -> usize {
        self.engine.len()
    }

    pub fn is_empty(&self) -> bool {
        self.engine.len() == 0
    }

    /// returns the aux slot for `key`, inserting an all-zero entry first if
    /// the key was absent.
    pub fn cell(&mut self, key: &[u8]) -> CoreResult<*mut u8> {
        check_key_len(key)?;
        Ok(self.engine.cell(key))
    }

    /// looks up `key` without inserting.
    pub fn find(&self, key: &[u8]) -> CoreResult<Option<*mut u8>> {
        check_key_len(key)?;
        Ok(self.engine.find(key))
    }

    pub fn contains(&self, key: &[u8]) -> bool {
        self.engine.find(key).is_some()
    }

    /// allocates a zeroed, arena-owned scratch buffer of `size` bytes, for
    /// callers who need out-of-band storage with the same lifetime as the
    /// dictionary (e.g. a value too large to fit in the aux payload).
    pub fn data(&mut self, size: usize) -> *mut u8 {
        self.engine.arena.alloc_bytes(size).as_ptr()
    }

    pub fn cursor(&self) -> Cursor<'_> {
        Cursor::open(&self.engine)
    }

    pub fn close(self) {
        self.engine.close();
    }
}

/// Typed facade over `DictRaw`: the aux payload width is `size_of::<Aux>()`,
/// fixed for the handle's lifetime. `Aux` must be `Copy` since the payload
/// lives in arena memory outside Rust's ownership tracking.
pub struct Dict<Aux: Copy> {
    raw: DictRaw,
    _aux: PhantomData<Aux>,
}

impl<Aux: Copy> Dict<Aux> {
    pub fn open(mut config: HatConfig) -> Self {
        config.aux_width = mem::size_of::<Aux>() as u32;
        Self {
            raw: DictRaw::open(config),
            _aux: PhantomData,
        }
    }

    pub fn len(&self) -> usize {
        self.raw.len()
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    pub fn contains(&self, key: &[u8]) -> bool {
        self.raw.contains(key)
    }

    /// allocates a zeroed, arena-owned scratch buffer of `size` bytes, for
    /// out-of-band storage too large for the fixed-size `Aux` payload.
    pub fn data(&mut self, size: usize) -> *mut u8 {
        self.raw.data(size)
    }

    /// returns a mutable reference to the aux value for `key`, inserting a
    /// zeroed value first if the key was absent. the reference is valid
    /// until the next structural mutation of the dictionary.
    pub fn cell(&mut self, key: &[u8]) -> CoreResult<&mut Aux> {
        let ptr = self.raw.cell(key)?;
        Ok(unsafe { &mut *(ptr as *mut Aux) })
    }

    pub fn find(&self, key: &[u8]) -> CoreResult<Option<&Aux>> {
        Ok(self.raw.find(key)?.map(|ptr| unsafe { &*(ptr as *const Aux) }))
    }

    pub fn cursor(&self) -> Cursor<'_> {
        self.raw.cursor()
    }

    pub fn close(self) {
        self.raw.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_then_find_roundtrips() {
        let mut dict: Dict<u32> = Dict::open(HatConfig::new(1, 0));
        *dict.cell(b"apple").unwrap() = 7;
        *dict.cell(b"banana").unwrap() = 9;
        assert_eq!(*dict.find(b"apple").unwrap().unwrap(), 7);
        assert_eq!(*dict.find(b"banana").unwrap().unwrap(), 9);
        assert_eq!(dict.len(), 2);
        assert!(dict.contains(b"apple"));
        assert!(!dict.contains(b"cherry"));
    }

    #[test]
    fn repeated_cell_does_not_grow_len() {
        let mut dict: Dict<u8> = Dict::open(HatConfig::new(1, 0));
        dict.cell(b"k").unwrap();
        dict.cell(b"k").unwrap();
        assert_eq!(dict.len(), 1);
    }

    #[test]
    fn rejects_keys_over_the_length_bound() {
        let mut dict: Dict<u8> = Dict::open(HatConfig::new(1, 0));
        let long = vec![b'x'; KEY_MAX_LEN + 1];
        assert_eq!(
            dict.cell(&long).unwrap_err(),
            CoreError::KeyTooLong {
                len: KEY_MAX_LEN + 1,
                max: KEY_MAX_LEN,
            }
        );
    }

    #[test]
    fn data_returns_zeroed_arena_scratch() {
        let mut dict: Dict<u8> = Dict::open(HatConfig::new(1, 0));
        let ptr = dict.data(64);
        let bytes = unsafe { std::slice::from_raw_parts(ptr, 64) };
        assert!(bytes.iter().all(|&b| b == 0));
    }

    #[test]
    fn forward_traversal_is_ordered() {
        let mut dict: Dict<u8> = Dict::open(HatConfig::new(1, 0).with_bucket_max(4));
        for (i, w) in ["banana", "apple", "cherry", "date", "fig"].iter().enumerate() {
            *dict.cell(w.as_bytes()).unwrap() = i as u8;
        }
        let mut cursor = dict.cursor();
        let mut seen = Vec::new();
        while cursor.next() {
            seen.push(cursor.current_key().unwrap());
        }
        let mut expected: Vec<Vec<u8>> = ["apple", "banana", "cherry", "date", "fig"]
            .iter()
            .map(|s| s.as_bytes().to_vec())
            .collect();
        expected.sort();
        assert_eq!(seen, expected);
    }
}
