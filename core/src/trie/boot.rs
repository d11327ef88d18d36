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

//! The boot level: `L` cascaded fanout levels pre-materialized as one flat
//! array of `FANOUT^L` child slots, indexed by the base-`FANOUT`
//! concatenation of the first `L` key digits. A digit is `1 + byte` for a
//! byte the key actually has at that position, or the reserved digit 0 if
//! the key is already exhausted there — never plain zero-padding, which
//! would make a short key indistinguishable from a longer key whose extra
//! bytes happen to be `0x00` (see `radix::next_byte` for the same scheme
//! one level down). `L = 0` is a special case: the single root slot is
//! pre-initialized to an empty bucket rather than left empty, so the very
//! first insert lands directly in a bucket instead of an array.

use super::radix::FANOUT;
use crate::config::HatConfig;
use crate::container::BucketNode;
use crate::mem::{Arena, Slot, Tag};
use std::mem;
use std::ptr::NonNull;

pub struct Boot {
    levels: u8,
    len: usize,
    slots: NonNull<u8>,
}

impl Boot {
    pub fn alloc(arena: &mut Arena, config: &HatConfig) -> Self {
        let levels = config.boot_levels;
        let len = (FANOUT as u64).pow(levels as u32) as usize;
        let bytes = len * mem::size_of::<usize>();
        let slots = arena.alloc_bytes(bytes.max(mem::size_of::<usize>()));
        let boot = Self { levels, len, slots };
        if levels == 0 {
            let bucket = BucketNode::alloc(arena, config.bucket_slots);
            boot.set(0, Slot::new(bucket.addr(), Tag::Bucket));
        }
        boot
    }

    pub fn levels(&self) -> u8 {
        self.levels
    }

    pub fn len(&self) -> usize {
        self.len
    }

    /// base-`FANOUT` concatenation of the first `levels` key digits: digit
    /// `1 + key[i]` where the key still has a byte at position `i`, or the
    /// reserved digit 0 once the key has run out. A key shorter than
    /// `levels` therefore lands on a slot no real, longer key can ever
    /// reach, regardless of what bytes that longer key has past the short
    /// key's end.
    pub fn index_of(&self, key: &[u8]) -> usize {
        let mut idx = 0usize;
        for i in 0..self.levels as usize {
            let digit = match key.get(i) {
                Some(&b) => 1 + b as usize,
                None => 0,
            };
            idx = idx * FANOUT + digit;
        }
        idx
    }

    /// the residue left over after the boot levels have consumed their
    /// prefix bytes.
    pub fn residue_of<'a>(&self, key: &'a [u8]) -> &'a [u8] {
        let consumed = self.levels as usize;
        if key.len() <= consumed {
            &[]
        } else {
            &key[consumed..]
        }
    }

    #[inline]
    fn slot_ptr(&self, i: usize) -> *mut usize {
        unsafe { (self.slots.as_ptr() as *mut usize).add(i) }
    }

    pub fn get(&self, i: usize) -> Slot {
        Slot::from_raw(unsafe { *self.slot_ptr(i) })
    }

    pub fn set(&self, i: usize, slot: Slot) {
        unsafe { *self.slot_ptr(i) = slot.raw() };
    }
}
