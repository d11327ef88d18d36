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

use hatrie_core::{Dict, HatConfig};

#[test]
fn empty_trie_seek_and_last_are_unpositioned() {
    let dict: Dict<()> = Dict::open(HatConfig::new(0, 0));
    let mut cursor = dict.cursor();
    assert!(!cursor.seek(b"x"));
    assert!(!cursor.last());
    dict.close();
}

#[test]
fn two_key_forward_order() {
    let mut dict: Dict<()> = Dict::open(HatConfig::new(1, 0));
    *dict.cell(b"banana").unwrap() = ();
    *dict.cell(b"apple").unwrap() = ();
    let mut cursor = dict.cursor();
    assert!(cursor.next());
    assert_eq!(cursor.current_key().unwrap(), b"apple");
    assert!(cursor.next());
    assert_eq!(cursor.current_key().unwrap(), b"banana");
    assert!(!cursor.next());
    dict.close();
}

#[test]
fn forward_and_backward_traversal_are_mirror_images() {
    let mut dict: Dict<()> = Dict::open(HatConfig::new(1, 0).with_bucket_max(4));
    let words = ["delta", "alpha", "charlie", "echo", "bravo", "foxtrot", "golf"];
    for w in words {
        *dict.cell(w.as_bytes()).unwrap() = ();
    }

    let mut forward = Vec::new();
    let mut cursor = dict.cursor();
    while cursor.next() {
        forward.push(cursor.current_key().unwrap());
    }

    let mut backward = Vec::new();
    let mut cursor = dict.cursor();
    while cursor.prev() {
        backward.push(cursor.current_key().unwrap());
    }
    backward.reverse();

    assert_eq!(forward, backward);
    let mut expected: Vec<Vec<u8>> = words.iter().map(|w| w.as_bytes().to_vec()).collect();
    expected.sort();
    assert_eq!(forward, expected);
    dict.close();
}

#[test]
fn seek_lands_on_successor_when_key_absent() {
    let mut dict: Dict<()> = Dict::open(HatConfig::new(1, 0));
    for w in ["apple", "cherry", "fig"] {
        *dict.cell(w.as_bytes()).unwrap() = ();
    }
    let mut cursor = dict.cursor();
    assert!(cursor.seek(b"banana"));
    assert_eq!(cursor.current_key().unwrap(), b"cherry");

    let mut cursor = dict.cursor();
    assert!(cursor.seek(b"cherry"));
    assert_eq!(cursor.current_key().unwrap(), b"cherry");

    let mut cursor = dict.cursor();
    assert!(!cursor.seek(b"zzz"));
    dict.close();
}

#[test]
fn cursor_key_into_round_trips_through_find() {
    let mut dict: Dict<u32> = Dict::open(HatConfig::new(1, 0));
    *dict.cell(b"apple").unwrap() = 1;
    *dict.cell(b"banana").unwrap() = 2;

    let mut cursor = dict.cursor();
    assert!(cursor.next());
    let mut buf = [0u8; 32];
    let n = cursor.current_key_into(&mut buf);
    assert_eq!(&buf[..n], b"apple");
    assert_eq!(*dict.find(&buf[..n]).unwrap().unwrap(), 1);
}

#[test]
fn cell_is_idempotent_and_find_agrees() {
    let mut dict: Dict<u32> = Dict::open(HatConfig::new(1, 0));
    *dict.cell(b"k").unwrap() = 42;
    let first_ptr = dict.cell(b"k").unwrap() as *mut u32;
    assert_eq!(unsafe { *first_ptr }, 42);
    assert_eq!(dict.len(), 1);
    assert_eq!(*dict.find(b"k").unwrap().unwrap(), 42);
    dict.close();
}
