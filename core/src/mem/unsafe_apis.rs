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

//! Thin (still unsafe) wrappers over the platform allocator. Nothing here
//! recovers from allocation failure: the arena is the only caller and it
//! treats OOM as fatal, per the resource model.

use std::alloc::{self, Layout};

/// Allocate `layout`. Aborts the process if the allocator returns null.
#[inline(always)]
pub unsafe fn alloc_layout(layout: Layout) -> *mut u8 {
    let ptr = alloc::alloc(layout);
    if ptr.is_null() {
        alloc::handle_alloc_error(layout);
    }
    ptr
}

/// Allocate `layout`, zeroing the returned block.
#[inline(always)]
pub unsafe fn alloc_layout_zeroed(layout: Layout) -> *mut u8 {
    let ptr = alloc::alloc_zeroed(layout);
    if ptr.is_null() {
        alloc::handle_alloc_error(layout);
    }
    ptr
}

#[inline(always)]
pub unsafe fn dealloc_layout(ptr: *mut u8, layout: Layout) {
    alloc::dealloc(ptr, layout)
}

/// Copy `n` bytes from `src` to `dst`. Regions must not overlap.
#[inline(always)]
pub unsafe fn memcpy(src: *const u8, dst: *mut u8, n: usize) {
    src.copy_to_nonoverlapping(dst, n)
}

/// Copy `n` bytes within a single allocation, where the regions may overlap.
#[inline(always)]
pub unsafe fn memmove(src: *const u8, dst: *mut u8, n: usize) {
    src.copy_to(dst, n)
}
