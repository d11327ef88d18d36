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

//! `Pail`: a small hash table of `P` slots, each holding an `Array` or
//! nothing. Sits between a single `Array` and a full `Bucket` in the burst
//! ladder.

use super::array::{ArrayNode, InsertOutcome};
use super::hat_hash;
use crate::config::HatConfig;
use crate::mem::Arena;
use std::mem;
use std::ptr::NonNull;

pub enum PailInsertOutcome {
    Inserted { aux_ptr: *mut u8 },
    AlreadyPresent { aux_ptr: *mut u8 },
    /// the chosen slot's array could not grow further and no size class
    /// fits; the caller must burst the whole pail into a bucket.
    Overflow,
}

#[derive(Clone, Copy)]
pub struct PailNode(NonNull<u8>);

impl PailNode {
    pub fn alloc(arena: &mut Arena, slots: u32) -> Self {
        let bytes = slots as usize * mem::size_of::<usize>();
        Self(arena.alloc_bytes(bytes.max(mem::size_of::<usize>())))
    }

    pub fn addr(self) -> *mut u8 {
        self.0.as_ptr()
    }

    pub fn from_addr(ptr: *mut u8) -> Self {
        Self(NonNull::new(ptr).expect("hatrie: null pail address"))
    }

    #[inline]
    fn slot_ptr(self, i: usize) -> *mut usize {
        unsafe { (self.0.as_ptr() as *mut usize).add(i) }
    }

    pub fn get(self, i: usize) -> Option<ArrayNode> {
        let raw = unsafe { *self.slot_ptr(i) };
        if raw == 0 {
            None
        } else {
            Some(ArrayNode::from_addr(raw as *mut u8))
        }
    }

    fn set(self, i: usize, node: Option<ArrayNode>) {
        let raw = node.map(|n| n.addr() as usize).unwrap_or(0);
        unsafe { *self.slot_ptr(i) = raw };
    }

    pub fn slot_index(residue: &[u8], slots: u32) -> usize {
        hat_hash(residue) as usize % slots as usize
    }

    /// Insert `residue` into the slot its hash maps to, creating,
    /// growing, or promoting the array there as required.
    pub fn insert(
        self,
        arena: &mut Arena,
        config: &HatConfig,
        aux_width: usize,
        residue: &[u8],
        slots: u32,
    ) -> PailInsertOutcome {
        let idx = Self::slot_index(residue, slots);
        match self.get(idx) {
            None => {
                let needed = ArrayNode::needed_bytes_for(0, 0, residue.len(), aux_width);
                let (_, class_size) = config
                    .smallest_class_fitting(needed)
                    .expect("hatrie: residue too large for every configured size class");
                let node = ArrayNode::alloc(arena, class_size);
                match node.try_insert(residue, aux_width) {
                    InsertOutcome::Inserted { aux_ptr } => {
                        self.set(idx, Some(node));
                        PailInsertOutcome::Inserted { aux_ptr }
                    }
                    _ => unreachable!("a fresh array is never full"),
                }
            }
            Some(existing) => match existing.try_insert(residue, aux_width) {
                InsertOutcome::Inserted { aux_ptr } => PailInsertOutcome::Inserted { aux_ptr },
                InsertOutcome::AlreadyPresent { aux_ptr } => {
                    PailInsertOutcome::AlreadyPresent { aux_ptr }
                }
                InsertOutcome::DoesNotFit => match existing.promote(arena, config, aux_width, residue) {
                    Some((grown, aux_ptr)) => {
                        existing.free(arena);
                        self.set(idx, Some(grown));
                        PailInsertOutcome::Inserted { aux_ptr }
                    }
                    None => PailInsertOutcome::Overflow,
                },
            },
        }
    }

    /// "Pail creation (from an overflowing Array)": re-insert every
    /// (residue, aux) pair of `array` into a fresh pail by rehashing each
    /// residue. The caller frees `array` afterward.
    pub fn from_overflowing_array(
        arena: &mut Arena,
        config: &HatConfig,
        aux_width: usize,
        array: ArrayNode,
        slots: u32,
    ) -> PailNode {
        let pail = PailNode::alloc(arena, slots);
        for (residue, aux_src) in array.iter_entries(aux_width) {
            match pail.insert(arena, config, aux_width, residue, slots) {
                PailInsertOutcome::Inserted { aux_ptr } => unsafe {
                    std::ptr::copy_nonoverlapping(aux_src, aux_ptr, aux_width);
                },
                _ => unreachable!(
                    "residues within one array are unique and a fresh pail has room for them"
                ),
            }
        }
        pail
    }

    pub fn lookup(self, residue: &[u8], aux_width: usize, slots: u32) -> Option<*mut u8> {
        let idx = Self::slot_index(residue, slots);
        self.get(idx)?.lookup(residue, aux_width)
    }

    /// every (residue, aux) pair stored anywhere in this pail, for burst
    /// redistribution and for cursor leaf flattening.
    pub fn iter_entries(self, aux_width: usize, slots: u32) -> impl Iterator<Item = (&'static [u8], *mut u8)> {
        (0..slots as usize)
            .filter_map(move |i| self.get(i))
            .flat_map(move |array| array.iter_entries(aux_width))
    }

    pub fn free(self, arena: &mut Arena, slots: u32) {
        for i in 0..slots as usize {
            if let Some(array) = self.get(i) {
                array.free(arena);
            }
        }
        arena.dealloc_bytes(self.0, slots as usize * mem::size_of::<usize>());
    }
}
