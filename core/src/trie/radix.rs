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

//! Interior radix node: one child slot per possible next digit. Created
//! only as the product of bursting a bucket; never grown, shrunk, or
//! promoted afterward.
//!
//! Indexed over the full unsigned byte (256-way, before the reserved digit
//! below) rather than its low 7 bits: see the fanout note in the crate root
//! for why this widens the reference design (a 7-bit digit loses the top
//! bit of every consumed byte, which is fine for 7-bit-clean text but
//! corrupts both ordering and key reconstruction for any byte with its high
//! bit set).
//!
//! The digit space is widened once more, to 257 entries, to keep "the key
//! has no more bytes here" distinguishable from "the key's next byte is
//! literally 0". Digit 0 is reserved for the former; a real byte `b` maps
//! to digit `1 + b as usize`. Without this an exhausted residue and a
//! residue whose next byte is `0x00` would pick the same child slot.

use crate::mem::{Arena, Slot};
use std::mem;
use std::ptr::NonNull;

pub const FANOUT: usize = 257;

#[derive(Clone, Copy)]
pub struct RadixNode(NonNull<u8>);

impl RadixNode {
    pub fn alloc(arena: &mut Arena) -> Self {
        Self(arena.alloc_bytes(FANOUT * mem::size_of::<usize>()))
    }

    pub fn addr(self) -> *mut u8 {
        self.0.as_ptr()
    }

    pub fn from_addr(ptr: *mut u8) -> Self {
        Self(NonNull::new(ptr).expect("hatrie: null radix address"))
    }

    #[inline]
    fn slot_ptr(self, i: usize) -> *mut usize {
        unsafe { (self.0.as_ptr() as *mut usize).add(i) }
    }

    pub fn get(self, i: usize) -> Slot {
        Slot::from_raw(unsafe { *self.slot_ptr(i) })
    }

    pub fn set(self, i: usize, slot: Slot) {
        unsafe { *self.slot_ptr(i) = slot.raw() };
    }

    pub fn free(self, arena: &mut Arena) {
        arena.dealloc_bytes(self.0, FANOUT * mem::size_of::<usize>());
    }
}

/// Consume the next digit of a residue for a radix descent. An exhausted
/// residue yields digit 0 forever; a real byte `b` yields `1 + b`, so the
/// two never collide regardless of how many times the residue is probed
/// past its end.
#[inline]
pub fn next_byte(residue: &[u8]) -> (usize, &[u8]) {
    match residue.split_first() {
        Some((&b, rest)) => (1 + b as usize, rest),
        None => (0, residue),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_byte_exhausted_is_reserved_digit_zero_forever() {
        assert_eq!(next_byte(b""), (0, &b""[..]));
        assert_eq!(next_byte(b""), next_byte(b""));
    }

    #[test]
    fn next_byte_real_byte_never_collides_with_exhausted() {
        let (d, rest) = next_byte(b"x");
        assert_eq!(d, b'x' as usize + 1);
        assert_eq!(rest, b"");
        // a literal 0x00 byte must not be confused with "nothing left".
        let (d0, rest0) = next_byte(b"\0");
        assert_eq!(d0, 1);
        assert_eq!(rest0, b"");
        assert_ne!(d0, 0);
    }

    #[test]
    fn set_get_roundtrips() {
        let mut arena = Arena::new();
        let node = RadixNode::alloc(&mut arena);
        assert!(node.get(0xFF).is_empty());
        let slot = Slot::new(node.addr(), crate::mem::Tag::Radix);
        node.set(0x41, slot);
        assert_eq!(node.get(0x41).addr(), node.addr());
        assert!(node.get(0x42).is_empty());
    }
}
