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

//! The ordered cursor. Holds a stack of descended levels (the boot array,
//! then zero or more radix nodes) with a scan index per level, plus a
//! lazily materialized, sorted scratch list of every (residue, aux) pair
//! beneath the deepest level currently open. Most traversals visit a leaf
//! once, so sorting on arrival is cheaper than keeping order eagerly.

use crate::container::{ArrayNode, BucketNode, PailNode};
use crate::mem::Tag;
use crate::trie::engine::Engine;
use crate::trie::radix::{next_byte, RadixNode, FANOUT};

#[derive(Clone, Copy)]
enum FrameKind {
    Boot,
    Radix(RadixNode),
}

#[derive(Clone, Copy)]
struct Frame {
    kind: FrameKind,
    /// next slot index to examine; direction-dependent (ascending for
    /// `next`, descending for `prev`).
    index: isize,
    len: isize,
}

#[derive(Clone, Copy)]
struct LeafEntry {
    residue: &'static [u8],
    aux: *mut u8,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Dir {
    Fwd,
    Bwd,
}

impl Dir {
    #[inline]
    fn step(self, i: isize) -> isize {
        match self {
            Dir::Fwd => i + 1,
            Dir::Bwd => i - 1,
        }
    }

    #[inline]
    fn in_range(self, i: isize, len: isize) -> bool {
        match self {
            Dir::Fwd => i < len,
            Dir::Bwd => i >= 0,
        }
    }

    #[inline]
    fn start(self, len: isize) -> isize {
        match self {
            Dir::Fwd => 0,
            Dir::Bwd => len - 1,
        }
    }
}

pub struct Cursor<'a> {
    engine: &'a Engine,
    stack: Vec<Frame>,
    leaf: Vec<LeafEntry>,
    leaf_pos: usize,
    positioned: bool,
}

impl<'a> Cursor<'a> {
    pub fn open(engine: &'a Engine) -> Self {
        Self {
            engine,
            stack: Vec::new(),
            leaf: Vec::new(),
            leaf_pos: 0,
            positioned: false,
        }
    }

    fn slot_at(&self, frame: &Frame) -> crate::mem::Slot {
        match frame.kind {
            FrameKind::Boot => self.engine.boot.get(frame.index as usize),
            FrameKind::Radix(node) => node.get(frame.index as usize),
        }
    }

    fn flatten_leaf(&mut self, slot: crate::mem::Slot) {
        self.leaf.clear();
        let aux_width = self.engine.aux_width;
        match slot.tag() {
            Tag::Array => {
                let node = ArrayNode::from_addr(slot.addr());
                for (residue, aux) in node.iter_entries(aux_width) {
                    self.leaf.push(LeafEntry { residue, aux });
                }
            }
            Tag::Bucket => {
                let node = BucketNode::from_addr(slot.addr());
                for (residue, aux) in node.iter_entries(
                    aux_width,
                    self.engine.config.bucket_slots,
                    self.engine.config.pail_slots,
                ) {
                    self.leaf.push(LeafEntry { residue, aux });
                }
            }
            Tag::Pail => {
                let node = PailNode::from_addr(slot.addr());
                for (residue, aux) in node.iter_entries(aux_width, self.engine.config.pail_slots) {
                    self.leaf.push(LeafEntry { residue, aux });
                }
            }
            Tag::Radix => unreachable!("flatten_leaf is never called on a radix slot"),
        }
        sort_residues(&mut self.leaf);
    }

    /// Scan forward/backward through the currently open frames until a
    /// leaf is reached and flattened, popping exhausted frames as needed.
    /// Returns false if the whole (remaining) trie is exhausted.
    fn move_from_open_frames(&mut self, dir: Dir) -> bool {
        loop {
            let last = match self.stack.last().copied() {
                Some(f) => f,
                None => return false,
            };
            if !dir.in_range(last.index, last.len) {
                self.stack.pop();
                if let Some(parent) = self.stack.last_mut() {
                    parent.index = dir.step(parent.index);
                    continue;
                }
                return false;
            }
            let slot = self.slot_at(&last);
            match slot.tag_if_present() {
                None => {
                    self.stack.last_mut().unwrap().index = dir.step(last.index);
                }
                Some(Tag::Radix) => {
                    let node = RadixNode::from_addr(slot.addr());
                    self.stack.push(Frame {
                        kind: FrameKind::Radix(node),
                        index: dir.start(FANOUT as isize),
                        len: FANOUT as isize,
                    });
                }
                Some(_) => {
                    self.flatten_leaf(slot);
                    return true;
                }
            }
        }
    }

    fn advance_leaf(&mut self, dir: Dir) -> bool {
        if let Some(top) = self.stack.last_mut() {
            top.index = dir.step(top.index);
        }
        let found = self.move_from_open_frames(dir);
        self.leaf_pos = if found {
            match dir {
                Dir::Fwd => 0,
                Dir::Bwd => self.leaf.len() - 1,
            }
        } else {
            0
        };
        self.positioned = found && !self.leaf.is_empty();
        self.positioned
    }

    pub fn first(&mut self) -> bool {
        self.stack.clear();
        self.leaf.clear();
        self.stack.push(Frame {
            kind: FrameKind::Boot,
            index: 0,
            len: self.engine.boot.len() as isize,
        });
        let found = self.move_from_open_frames(Dir::Fwd);
        self.leaf_pos = 0;
        self.positioned = found && !self.leaf.is_empty();
        self.positioned
    }

    pub fn last(&mut self) -> bool {
        self.stack.clear();
        self.leaf.clear();
        let len = self.engine.boot.len() as isize;
        self.stack.push(Frame {
            kind: FrameKind::Boot,
            index: len - 1,
            len,
        });
        let found = self.move_from_open_frames(Dir::Bwd);
        self.leaf_pos = if found { self.leaf.len() - 1 } else { 0 };
        self.positioned = found && !self.leaf.is_empty();
        self.positioned
    }

    pub fn next(&mut self) -> bool {
        if !self.positioned {
            return self.first();
        }
        if self.leaf_pos + 1 < self.leaf.len() {
            self.leaf_pos += 1;
            return true;
        }
        self.advance_leaf(Dir::Fwd)
    }

    pub fn prev(&mut self) -> bool {
        if !self.positioned {
            return self.last();
        }
        if self.leaf_pos > 0 {
            self.leaf_pos -= 1;
            return true;
        }
        self.advance_leaf(Dir::Bwd)
    }

    /// Positions at the least key >= `key`, or leaves the cursor
    /// unpositioned if no such key exists.
    pub fn seek(&mut self, key: &[u8]) -> bool {
        self.stack.clear();
        self.leaf.clear();
        let boot_len = self.engine.boot.len() as isize;
        let boot_idx = self.engine.boot.index_of(key);
        let mut residue = self.engine.boot.residue_of(key);
        self.stack.push(Frame {
            kind: FrameKind::Boot,
            index: boot_idx as isize,
            len: boot_len,
        });
        loop {
            let top = *self.stack.last().unwrap();
            let slot = self.slot_at(&top);
            match slot.tag_if_present() {
                None => {
                    let found = self.move_from_open_frames(Dir::Fwd);
                    self.leaf_pos = 0;
                    self.positioned = found && !self.leaf.is_empty();
                    return self.positioned;
                }
                Some(Tag::Radix) => {
                    let node = RadixNode::from_addr(slot.addr());
                    let (c, rest) = next_byte(residue);
                    residue = rest;
                    self.stack.push(Frame {
                        kind: FrameKind::Radix(node),
                        index: c as isize,
                        len: FANOUT as isize,
                    });
                }
                Some(_) => {
                    self.flatten_leaf(slot);
                    match self.leaf.iter().position(|e| e.residue >= residue) {
                        Some(pos) => {
                            self.leaf_pos = pos;
                            self.positioned = true;
                            return true;
                        }
                        None => return self.advance_leaf(Dir::Fwd),
                    }
                }
            }
        }
    }

    pub fn is_positioned(&self) -> bool {
        self.positioned
    }

    /// The key at the cursor's current position, or `None` if unpositioned.
    pub fn current_key(&self) -> Option<Vec<u8>> {
        if !self.positioned {
            return None;
        }
        let mut buf = Vec::new();
        for frame in &self.stack {
            match frame.kind {
                FrameKind::Boot => {
                    let levels = self.engine.boot.levels() as usize;
                    let mut idx = frame.index as usize;
                    let mut digits = vec![0usize; levels];
                    for i in (0..levels).rev() {
                        digits[i] = idx % FANOUT;
                        idx /= FANOUT;
                    }
                    // digit 0 means the key was already exhausted at this
                    // position; every digit after it is 0 too, by
                    // construction of `Boot::index_of`.
                    for digit in digits {
                        if digit == 0 {
                            break;
                        }
                        buf.push((digit - 1) as u8);
                    }
                }
                FrameKind::Radix(_) => {
                    // digit 0 means this key has no byte at this level
                    // (it terminates in the leaf this slot holds).
                    if frame.index != 0 {
                        buf.push((frame.index - 1) as u8);
                    }
                }
            }
        }
        buf.extend_from_slice(self.leaf[self.leaf_pos].residue);
        Some(buf)
    }

    /// Raw-buffer variant matching the C-shaped external contract: copies
    /// as much of the current key as fits and returns the logical length
    /// (which may exceed `buf.len()`).
    pub fn current_key_into(&self, buf: &mut [u8]) -> usize {
        match self.current_key() {
            Some(key) => {
                let n = key.len().min(buf.len());
                buf[..n].copy_from_slice(&key[..n]);
                key.len()
            }
            None => 0,
        }
    }

    pub fn current_aux(&self) -> Option<*mut u8> {
        if !self.positioned {
            return None;
        }
        Some(self.leaf[self.leaf_pos].aux)
    }

    pub fn close(self) {}
}

/// Three-way radix-partition quicksort over residues, keyed byte-by-byte
/// from an offset carried through the recursion; falls back to insertion
/// sort at 10 elements or fewer.
fn sort_residues(entries: &mut [LeafEntry]) {
    if entries.len() > 1 {
        sort3(entries, 0, entries.len() as isize - 1, 0);
    }
}

fn char_at(residue: &[u8], d: usize) -> i32 {
    if d < residue.len() {
        residue[d] as i32
    } else {
        -1
    }
}

fn sort3(entries: &mut [LeafEntry], lo: isize, hi: isize, d: usize) {
    if hi <= lo {
        return;
    }
    if (hi - lo) <= 10 {
        insertion_sort(entries, lo, hi);
        return;
    }
    let mut lt = lo;
    let mut gt = hi;
    let v = char_at(entries[lo as usize].residue, d);
    let mut i = lo + 1;
    while i <= gt {
        let t = char_at(entries[i as usize].residue, d);
        if t < v {
            entries.swap(lt as usize, i as usize);
            lt += 1;
            i += 1;
        } else if t > v {
            entries.swap(i as usize, gt as usize);
            gt -= 1;
        } else {
            i += 1;
        }
    }
    sort3(entries, lo, lt - 1, d);
    if v >= 0 {
        sort3(entries, lt, gt, d + 1);
    }
    sort3(entries, gt + 1, hi, d);
}

fn insertion_sort(entries: &mut [LeafEntry], lo: isize, hi: isize) {
    let mut i = lo + 1;
    while i <= hi {
        let mut j = i;
        while j > lo && entries[j as usize].residue < entries[(j - 1) as usize].residue {
            entries.swap(j as usize, (j - 1) as usize);
            j -= 1;
        }
        i += 1;
    }
}
