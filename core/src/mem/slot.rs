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

//! The tagged child slot: one machine word, 3 low bits of type tag, the
//! remaining high bits an 8-byte-aligned node address. A zero word is
//! "empty" and takes precedence over tag interpretation.

const TAG_MASK: usize = 0b111;
const ADDR_MASK: usize = !TAG_MASK;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[repr(u8)]
pub enum Tag {
    Radix = 0,
    Bucket = 1,
    Array = 2,
    Pail = 3,
}

impl Tag {
    #[inline(always)]
    fn from_bits(bits: usize) -> Self {
        match bits & TAG_MASK {
            0 => Tag::Radix,
            1 => Tag::Bucket,
            2 => Tag::Array,
            3 => Tag::Pail,
            _ => unreachable!("tag is masked to 3 bits"),
        }
    }
}

/// A single child reference, word-sized. Copy because it's just an integer;
/// ownership of the pointee is tracked by the arena, not by this type.
#[derive(Clone, Copy, PartialEq, Eq)]
#[repr(transparent)]
pub struct Slot(usize);

impl Slot {
    pub const EMPTY: Slot = Slot(0);

    #[inline(always)]
    pub fn new(addr: *mut u8, tag: Tag) -> Self {
        let addr = addr as usize;
        debug_assert_eq!(addr & TAG_MASK, 0, "node address must be 8-byte aligned");
        Slot(addr | tag as usize)
    }

    #[inline(always)]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[inline(always)]
    pub fn tag(self) -> Tag {
        Tag::from_bits(self.0)
    }

    #[inline(always)]
    pub fn addr(self) -> *mut u8 {
        (self.0 & ADDR_MASK) as *mut u8
    }

    #[inline(always)]
    pub fn tag_if_present(self) -> Option<Tag> {
        if self.is_empty() {
            None
        } else {
            Some(self.tag())
        }
    }

    #[inline(always)]
    pub fn from_raw(word: usize) -> Self {
        Slot(word)
    }

    #[inline(always)]
    pub fn raw(self) -> usize {
        self.0
    }
}

impl std::fmt::Debug for Slot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_empty() {
            write!(f, "Slot(empty)")
        } else {
            write!(f, "Slot({:?} @ {:p})", self.tag(), self.addr())
        }
    }
}
