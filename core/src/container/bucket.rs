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

//! `Bucket`: a hash table of `B` slots, each holding an `Array` or a
//! `Pail`, plus a live-key counter. The root of the boot level is a single
//! pre-initialized empty bucket (for `L = 0`); every other bucket is the
//! product of an earlier burst.

use super::array::{ArrayNode, InsertOutcome};
use super::hat_hash;
use super::pail::{PailInsertOutcome, PailNode};
use crate::config::HatConfig;
use crate::mem::{Arena, Slot, Tag};
use std::mem;
use std::ptr::NonNull;

pub enum BucketInsertOutcome {
    Inserted { aux_ptr: *mut u8, is_new: bool },
    /// the slot this residue hashes to could not accept it by any means
    /// available inside the bucket (array full, no larger class, pails
    /// disabled or the pail itself is full). The caller must burst the
    /// whole bucket into a radix and retry from there.
    Overflow,
}

#[repr(C)]
struct BucketHeader {
    live_count: u32,
}

const HEADER_SIZE: usize = mem::size_of::<BucketHeader>();

#[derive(Clone, Copy)]
pub struct BucketNode(NonNull<u8>);

impl BucketNode {
    pub fn alloc(arena: &mut Arena, slots: u32) -> Self {
        let total = HEADER_SIZE + slots as usize * mem::size_of::<usize>();
        Self(arena.alloc_bytes(total))
    }

    pub fn addr(self) -> *mut u8 {
        self.0.as_ptr()
    }

    pub fn from_addr(ptr: *mut u8) -> Self {
        Self(NonNull::new(ptr).expect("hatrie: null bucket address"))
    }

    pub fn live_count(self) -> u32 {
        unsafe { (*(self.0.as_ptr() as *const BucketHeader)).live_count }
    }

    fn bump_live(self) {
        unsafe { (*(self.0.as_ptr() as *mut BucketHeader)).live_count += 1 };
    }

    #[inline]
    fn slots_start(self) -> *mut usize {
        unsafe { self.0.as_ptr().add(HEADER_SIZE) as *mut usize }
    }

    fn get(self, i: usize) -> Slot {
        Slot::from_raw(unsafe { *self.slots_start().add(i) })
    }

    fn set(self, i: usize, slot: Slot) {
        unsafe { *self.slots_start().add(i) = slot.raw() };
    }

    fn slot_index(residue: &[u8], slots: u32) -> usize {
        hat_hash(residue) as usize % slots as usize
    }

    /// Insert `residue` into the slot its hash maps to. Mirrors the
    /// tag-transition ladder: empty -> array, array -> array (grow or
    /// promote in place), array -> pail (when it can't grow further and
    /// pails are enabled), pail -> pail (grow). The live-key counter is
    /// bumped exactly once per genuinely new key, before any burst check
    /// the caller performs against `Bucket_max`.
    pub fn insert(
        self,
        arena: &mut Arena,
        config: &HatConfig,
        aux_width: usize,
        residue: &[u8],
        b_slots: u32,
        p_slots: u32,
    ) -> BucketInsertOutcome {
        let idx = Self::slot_index(residue, b_slots);
        match self.get(idx).tag_if_present() {
            None => {
                let needed = ArrayNode::needed_bytes_for(0, 0, residue.len(), aux_width);
                let (_, class_size) = config
                    .smallest_class_fitting(needed)
                    .expect("hatrie: residue too large for every configured size class");
                let node = ArrayNode::alloc(arena, class_size);
                match node.try_insert(residue, aux_width) {
                    InsertOutcome::Inserted { aux_ptr } => {
                        self.set(idx, Slot::new(node.addr(), Tag::Array));
                        self.bump_live();
                        BucketInsertOutcome::Inserted { aux_ptr, is_new: true }
                    }
                    _ => unreachable!("a fresh array is never full"),
                }
            }
            Some(Tag::Array) => {
                let node = ArrayNode::from_addr(self.get(idx).addr());
                match node.try_insert(residue, aux_width) {
                    InsertOutcome::Inserted { aux_ptr } => {
                        self.bump_live();
                        BucketInsertOutcome::Inserted { aux_ptr, is_new: true }
                    }
                    InsertOutcome::AlreadyPresent { aux_ptr } => {
                        BucketInsertOutcome::Inserted { aux_ptr, is_new: false }
                    }
                    InsertOutcome::DoesNotFit => {
                        match node.promote(arena, config, aux_width, residue) {
                            Some((grown, aux_ptr)) => {
                                node.free(arena);
                                self.set(idx, Slot::new(grown.addr(), Tag::Array));
                                self.bump_live();
                                BucketInsertOutcome::Inserted { aux_ptr, is_new: true }
                            }
                            None if config.pails_enabled() => {
                                let pail = PailNode::from_overflowing_array(
                                    arena, config, aux_width, node, p_slots,
                                );
                                node.free(arena);
                                self.set(idx, Slot::new(pail.addr(), Tag::Pail));
                                match pail.insert(arena, config, aux_width, residue, p_slots) {
                                    PailInsertOutcome::Inserted { aux_ptr } => {
                                        self.bump_live();
                                        BucketInsertOutcome::Inserted { aux_ptr, is_new: true }
                                    }
                                    PailInsertOutcome::AlreadyPresent { .. } => {
                                        unreachable!("residue was absent before this burst")
                                    }
                                    PailInsertOutcome::Overflow => BucketInsertOutcome::Overflow,
                                }
                            }
                            None => BucketInsertOutcome::Overflow,
                        }
                    }
                }
            }
            Some(Tag::Pail) => {
                let pail = PailNode::from_addr(self.get(idx).addr());
                match pail.insert(arena, config, aux_width, residue, p_slots) {
                    PailInsertOutcome::Inserted { aux_ptr } => {
                        self.bump_live();
                        BucketInsertOutcome::Inserted { aux_ptr, is_new: true }
                    }
                    PailInsertOutcome::AlreadyPresent { aux_ptr } => {
                        BucketInsertOutcome::Inserted { aux_ptr, is_new: false }
                    }
                    PailInsertOutcome::Overflow => BucketInsertOutcome::Overflow,
                }
            }
            Some(_) => unreachable!("bucket slots only ever hold Array or Pail"),
        }
    }

    pub fn lookup(self, residue: &[u8], aux_width: usize, b_slots: u32, p_slots: u32) -> Option<*mut u8> {
        let idx = Self::slot_index(residue, b_slots);
        match self.get(idx).tag_if_present() {
            None => None,
            Some(Tag::Array) => ArrayNode::from_addr(self.get(idx).addr()).lookup(residue, aux_width),
            Some(Tag::Pail) => {
                PailNode::from_addr(self.get(idx).addr()).lookup(residue, aux_width, p_slots)
            }
            Some(_) => unreachable!("bucket slots only ever hold Array or Pail"),
        }
    }

    /// every (residue, aux) pair held anywhere in this bucket, used both by
    /// the bucket-to-radix burst and by cursor leaf flattening.
    pub fn iter_entries(
        self,
        aux_width: usize,
        b_slots: u32,
        p_slots: u32,
    ) -> impl Iterator<Item = (&'static [u8], *mut u8)> {
        (0..b_slots as usize).flat_map(move |i| -> Box<dyn Iterator<Item = (&'static [u8], *mut u8)>> {
            match self.get(i).tag_if_present() {
                None => Box::new(std::iter::empty()),
                Some(Tag::Array) => Box::new(ArrayNode::from_addr(self.get(i).addr()).iter_entries(aux_width)),
                Some(Tag::Pail) => {
                    Box::new(PailNode::from_addr(self.get(i).addr()).iter_entries(aux_width, p_slots))
                }
                Some(_) => unreachable!("bucket slots only ever hold Array or Pail"),
            }
        })
    }

    pub fn free(self, arena: &mut Arena, b_slots: u32, p_slots: u32) {
        for i in 0..b_slots as usize {
            match self.get(i).tag_if_present() {
                None => {}
                Some(Tag::Array) => ArrayNode::from_addr(self.get(i).addr()).free(arena),
                Some(Tag::Pail) => PailNode::from_addr(self.get(i).addr()).free(arena, p_slots),
                Some(_) => unreachable!("bucket slots only ever hold Array or Pail"),
            }
        }
        arena.dealloc_bytes(self.0, HEADER_SIZE + b_slots as usize * mem::size_of::<usize>());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_lookup_and_live_count() {
        let mut arena = Arena::new();
        let config = HatConfig::default();
        let bucket = BucketNode::alloc(&mut arena, 17);
        let keys = ["aa", "ab", "ac", "ad", "ae"];
        for (i, k) in keys.iter().enumerate() {
            match bucket.insert(&mut arena, &config, 0, k.as_bytes(), 17, 127) {
                BucketInsertOutcome::Inserted { is_new, .. } => assert!(is_new),
                BucketInsertOutcome::Overflow => panic!("unexpected overflow"),
            }
            assert_eq!(bucket.live_count(), (i + 1) as u32);
        }
        for k in keys {
            assert!(bucket.lookup(k.as_bytes(), 0, 17, 127).is_some());
        }
        bucket.free(&mut arena, 17, 127);
    }

    #[test]
    fn reinsert_does_not_bump_counter() {
        let mut arena = Arena::new();
        let config = HatConfig::default();
        let bucket = BucketNode::alloc(&mut arena, 17);
        bucket.insert(&mut arena, &config, 0, b"x", 17, 127);
        bucket.insert(&mut arena, &config, 0, b"x", 17, 127);
        assert_eq!(bucket.live_count(), 1);
        bucket.free(&mut arena, 17, 127);
    }
}
