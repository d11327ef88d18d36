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

//! The control logic threading the arena, the tagged slots, the leaf
//! containers and the trie skeleton together: descent for lookup, and the
//! insert/burst cascade. A burst can cascade across levels on a single
//! insert; this is implemented as a retry loop rather than naive recursion
//! so the bucket live-key counter is never double-counted (see
//! `DESIGN NOTES — Recursive burst cascade`).

use super::boot::Boot;
use super::radix::{next_byte, RadixNode};
use crate::config::HatConfig;
use crate::container::array::{ArrayNode, InsertOutcome};
use crate::container::bucket::{BucketInsertOutcome, BucketNode};
use crate::container::pail::{PailInsertOutcome, PailNode};
use crate::mem::{Arena, Slot, Tag};

/// Where a child slot physically lives, so it can be rewritten in place
/// after a promotion or burst without holding a borrow across the retry.
#[derive(Clone, Copy)]
enum Loc {
    Boot(usize),
    Radix(RadixNode, usize),
}

pub struct Engine {
    pub(crate) arena: Arena,
    pub(crate) config: HatConfig,
    pub(crate) boot: Boot,
    pub(crate) aux_width: usize,
    pub(crate) len: usize,
}

impl Engine {
    pub fn open(mut config: HatConfig) -> Self {
        config.normalize();
        let mut arena = Arena::new();
        let boot = Boot::alloc(&mut arena, &config);
        let aux_width = config.aux_width as usize;
        Self {
            arena,
            config,
            boot,
            aux_width,
            len: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    fn get_loc(&self, loc: Loc) -> Slot {
        match loc {
            Loc::Boot(i) => self.boot.get(i),
            Loc::Radix(node, i) => node.get(i),
        }
    }

    fn set_loc(&self, loc: Loc, slot: Slot) {
        match loc {
            Loc::Boot(i) => self.boot.set(i, slot),
            Loc::Radix(node, i) => node.set(i, slot),
        }
    }

    pub fn find(&self, key: &[u8]) -> Option<*mut u8> {
        let idx = self.boot.index_of(key);
        let residue = self.boot.residue_of(key);
        self.find_in_slot(self.boot.get(idx), residue)
    }

    fn find_in_slot(&self, slot: Slot, residue: &[u8]) -> Option<*mut u8> {
        match slot.tag_if_present()? {
            Tag::Radix => {
                let node = RadixNode::from_addr(slot.addr());
                let (c, rest) = next_byte(residue);
                self.find_in_slot(node.get(c), rest)
            }
            Tag::Bucket => BucketNode::from_addr(slot.addr()).lookup(
                residue,
                self.aux_width,
                self.config.bucket_slots,
                self.config.pail_slots,
            ),
            Tag::Pail => {
                PailNode::from_addr(slot.addr()).lookup(residue, self.aux_width, self.config.pail_slots)
            }
            Tag::Array => ArrayNode::from_addr(slot.addr()).lookup(residue, self.aux_width),
        }
    }

    pub fn cell(&mut self, key: &[u8]) -> *mut u8 {
        let idx = self.boot.index_of(key);
        let residue = self.boot.residue_of(key);
        self.insert_from(Loc::Boot(idx), residue)
    }

    /// the cascading insert loop. `residue` is fixed for the whole call
    /// except when we genuinely descend a level (Radix branch); every
    /// promotion/burst branch rewrites `loc`'s slot in place and loops
    /// back around without consuming any more of `residue`.
    fn insert_from(&mut self, mut loc: Loc, residue: &[u8]) -> *mut u8 {
        let mut residue = residue;
        loop {
            let slot = self.get_loc(loc);
            match slot.tag_if_present() {
                None => {
                    let node = self.fresh_array(residue);
                    match node.try_insert(residue, self.aux_width) {
                        InsertOutcome::Inserted { aux_ptr } => {
                            self.set_loc(loc, Slot::new(node.addr(), Tag::Array));
                            self.len += 1;
                            return aux_ptr;
                        }
                        _ => unreachable!("a fresh array is never full"),
                    }
                }
                Some(Tag::Radix) => {
                    let node = RadixNode::from_addr(slot.addr());
                    let (c, rest) = next_byte(residue);
                    loc = Loc::Radix(node, c);
                    residue = rest;
                }
                Some(Tag::Array) => {
                    let node = ArrayNode::from_addr(slot.addr());
                    match node.try_insert(residue, self.aux_width) {
                        InsertOutcome::Inserted { aux_ptr } => {
                            self.len += 1;
                            return aux_ptr;
                        }
                        InsertOutcome::AlreadyPresent { aux_ptr } => return aux_ptr,
                        InsertOutcome::DoesNotFit => {
                            match node.promote(&mut self.arena, &self.config, self.aux_width, residue) {
                                Some((grown, aux_ptr)) => {
                                    node.free(&mut self.arena);
                                    self.set_loc(loc, Slot::new(grown.addr(), Tag::Array));
                                    self.len += 1;
                                    return aux_ptr;
                                }
                                None if self.config.pails_enabled() => {
                                    let pail = PailNode::from_overflowing_array(
                                        &mut self.arena,
                                        &self.config,
                                        self.aux_width,
                                        node,
                                        self.config.pail_slots,
                                    );
                                    node.free(&mut self.arena);
                                    self.set_loc(loc, Slot::new(pail.addr(), Tag::Pail));
                                    log::trace!("hatrie: array promoted to pail");
                                }
                                None => {
                                    let bucket = self.burst_array_to_bucket(node);
                                    self.set_loc(loc, Slot::new(bucket.addr(), Tag::Bucket));
                                    log::trace!("hatrie: array burst to bucket (pails disabled)");
                                }
                            }
                        }
                    }
                }
                Some(Tag::Pail) => {
                    let pail = PailNode::from_addr(slot.addr());
                    match pail.insert(
                        &mut self.arena,
                        &self.config,
                        self.aux_width,
                        residue,
                        self.config.pail_slots,
                    ) {
                        PailInsertOutcome::Inserted { aux_ptr } => {
                            self.len += 1;
                            return aux_ptr;
                        }
                        PailInsertOutcome::AlreadyPresent { aux_ptr } => return aux_ptr,
                        PailInsertOutcome::Overflow => {
                            let bucket = self.burst_pail_to_bucket(pail);
                            self.set_loc(loc, Slot::new(bucket.addr(), Tag::Bucket));
                            log::trace!("hatrie: pail burst to bucket");
                        }
                    }
                }
                Some(Tag::Bucket) => {
                    let bucket = BucketNode::from_addr(slot.addr());
                    match bucket.insert(
                        &mut self.arena,
                        &self.config,
                        self.aux_width,
                        residue,
                        self.config.bucket_slots,
                        self.config.pail_slots,
                    ) {
                        BucketInsertOutcome::Inserted { aux_ptr, is_new } => {
                            if is_new {
                                self.len += 1;
                            }
                            if bucket.live_count() as u64 > self.config.bucket_max as u64 {
                                let radix = self.burst_bucket_to_radix(bucket);
                                self.set_loc(loc, Slot::new(radix.addr(), Tag::Radix));
                                log::trace!("hatrie: bucket burst to radix");
                                // the just-returned pointer lived in the bucket we
                                // just freed; recompute it from the new radix.
                                let (c, rest) = next_byte(residue);
                                return self
                                    .find_in_slot(radix.get(c), rest)
                                    .expect("just-inserted residue must survive the burst");
                            }
                            return aux_ptr;
                        }
                        BucketInsertOutcome::Overflow => {
                            let radix = self.burst_bucket_to_radix(bucket);
                            self.set_loc(loc, Slot::new(radix.addr(), Tag::Radix));
                            log::trace!("hatrie: bucket burst to radix");
                        }
                    }
                }
            }
        }
    }

    fn fresh_array(&mut self, residue: &[u8]) -> ArrayNode {
        let needed = ArrayNode::needed_bytes_for(0, 0, residue.len(), self.aux_width);
        let (_, class_size) = self
            .config
            .smallest_class_fitting(needed)
            .expect("hatrie: residue too large for every configured size class");
        ArrayNode::alloc(&mut self.arena, class_size)
    }

    /// "Pail creation (from an overflowing Array)", §4.3: re-insert every
    /// entry of a full pail into a fresh bucket via the standard bucket
    /// insert path.
    fn burst_pail_to_bucket(&mut self, pail: PailNode) -> BucketNode {
        let bucket = BucketNode::alloc(&mut self.arena, self.config.bucket_slots);
        let entries: Vec<(&[u8], *mut u8)> =
            pail.iter_entries(self.aux_width, self.config.pail_slots).collect();
        for (residue, aux_src) in entries {
            match bucket.insert(
                &mut self.arena,
                &self.config,
                self.aux_width,
                residue,
                self.config.bucket_slots,
                self.config.pail_slots,
            ) {
                BucketInsertOutcome::Inserted { aux_ptr, .. } => unsafe {
                    std::ptr::copy_nonoverlapping(aux_src, aux_ptr, self.aux_width);
                },
                BucketInsertOutcome::Overflow => {
                    unreachable!("a freshly allocated bucket should not overflow immediately")
                }
            }
        }
        pail.free(&mut self.arena, self.config.pail_slots);
        bucket
    }

    /// Array -> Bucket burst for an array that cannot grow and has no pail
    /// stage to fall back on (pails disabled): rebuild a bucket from its
    /// entries via the standard bucket insert path, mirroring
    /// `burst_pail_to_bucket` one container tier down. Keeps the only
    /// fatal insert condition as allocator exhaustion, never a full leaf.
    fn burst_array_to_bucket(&mut self, array: ArrayNode) -> BucketNode {
        let bucket = BucketNode::alloc(&mut self.arena, self.config.bucket_slots);
        let entries: Vec<(&[u8], *mut u8)> = array.iter_entries(self.aux_width).collect();
        for (residue, aux_src) in entries {
            match bucket.insert(
                &mut self.arena,
                &self.config,
                self.aux_width,
                residue,
                self.config.bucket_slots,
                self.config.pail_slots,
            ) {
                BucketInsertOutcome::Inserted { aux_ptr, .. } => unsafe {
                    std::ptr::copy_nonoverlapping(aux_src, aux_ptr, self.aux_width);
                },
                BucketInsertOutcome::Overflow => {
                    unreachable!("a freshly allocated bucket should not overflow immediately")
                }
            }
        }
        array.free(&mut self.arena);
        bucket
    }

    /// Bucket -> Radix burst, §4.5: peel one leading byte from every live
    /// residue and reinsert the remaining suffix into the radix slot for
    /// that byte via the standard cascading insert path, which creates an
    /// array if empty and cascades further bursts as needed.
    fn burst_bucket_to_radix(&mut self, bucket: BucketNode) -> RadixNode {
        let radix = RadixNode::alloc(&mut self.arena);
        let entries: Vec<(&[u8], *mut u8)> = bucket
            .iter_entries(self.aux_width, self.config.bucket_slots, self.config.pail_slots)
            .collect();
        for (residue, aux_src) in entries {
            let (c, rest) = next_byte(residue);
            let aux_ptr = self.insert_from(Loc::Radix(radix, c), rest);
            unsafe { std::ptr::copy_nonoverlapping(aux_src, aux_ptr, self.aux_width) };
        }
        bucket.free(&mut self.arena, self.config.bucket_slots, self.config.pail_slots);
        radix
    }

    pub fn close(mut self) {
        self.arena.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// `boot_levels = 1` so every key's first byte picks the boot slot and
    /// the rest is residue. Sharing that first byte across all 20 keys
    /// funnels them into one slot, which starts empty (unlike `L = 0`'s
    /// pre-initialized bucket) and so gets a fresh Array on first insert.
    #[test]
    fn promotion_path_grows_one_array_no_burst() {
        let config = HatConfig::new(1, 0)
            .with_size_classes(vec![16, 64])
            .with_pail_slots(0);
        let mut engine = Engine::open(config);
        for b in b'a'..=b't' {
            engine.cell(&[b'x', b]);
        }
        assert_eq!(engine.len(), 20);
        let slot = engine.boot.get(b'x' as usize);
        assert_eq!(slot.tag(), Tag::Array);
        let node = ArrayNode::from_addr(slot.addr());
        assert_eq!(node.class_size(), 64);
        assert_eq!(node.count(), 20);
        engine.close();
    }

    #[test]
    fn bucket_bursts_to_radix_at_max() {
        let config = HatConfig::new(0, 0).with_bucket_max(4);
        let mut engine = Engine::open(config);
        for key in ["aa", "ab", "ac", "ad", "ae"] {
            engine.cell(key.as_bytes());
        }
        assert_eq!(engine.boot.get(0).tag(), Tag::Radix);
        for key in ["aa", "ab", "ac", "ad", "ae"] {
            assert!(engine.find(key.as_bytes()).is_some());
        }
        engine.close();
    }
}
