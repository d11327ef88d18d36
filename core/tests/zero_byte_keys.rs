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

//! Regression coverage for short keys and embedded/trailing `0x00` bytes,
//! which must never alias a longer key's implicit padding at either the
//! boot or radix descent levels.

use hatrie_core::{Dict, HatConfig};

#[test]
fn empty_key_and_single_zero_byte_key_are_distinct_under_default_boot_levels() {
    let mut dict: Dict<u32> = Dict::open(HatConfig::default());
    *dict.cell(b"").unwrap() = 1;
    let empty_ptr = dict.cell(b"").unwrap() as *mut u32;
    *dict.cell(b"\0").unwrap() = 2;
    let zero_ptr = dict.cell(b"\0").unwrap() as *mut u32;

    assert_ne!(empty_ptr as usize, zero_ptr as usize);
    assert_eq!(*dict.find(b"").unwrap().unwrap(), 1);
    assert_eq!(*dict.find(b"\0").unwrap().unwrap(), 2);
    assert_eq!(dict.len(), 2);
    dict.close();
}

#[test]
fn keys_differing_only_by_trailing_zero_bytes_stay_distinct() {
    let mut dict: Dict<u32> = Dict::open(HatConfig::default());
    let keys: [&[u8]; 4] = [b"", b"\0", b"\0\0", b"\0\0\0"];
    for (i, k) in keys.iter().enumerate() {
        *dict.cell(k).unwrap() = i as u32;
    }
    assert_eq!(dict.len(), keys.len());
    for (i, k) in keys.iter().enumerate() {
        assert_eq!(*dict.find(k).unwrap().unwrap(), i as u32);
    }

    let mut cursor = dict.cursor();
    let mut seen = Vec::new();
    while cursor.next() {
        seen.push(cursor.current_key().unwrap());
    }
    let mut expected: Vec<Vec<u8>> = keys.iter().map(|k| k.to_vec()).collect();
    expected.sort();
    assert_eq!(seen, expected);
    dict.close();
}

/// A single oversized size class with pails disabled leaves an overflowing
/// array with nowhere to promote to; it must burst straight to a bucket
/// instead of aborting the process (see the engine's `Tag::Array` /
/// `DoesNotFit` handling).
#[test]
fn array_overflow_with_no_larger_class_and_pails_disabled_bursts_instead_of_panicking() {
    let config = HatConfig::new(1, 4)
        .with_size_classes(vec![16])
        .with_pail_slots(0);
    let mut dict: Dict<u32> = Dict::open(config);
    let keys: Vec<String> = (0..20).map(|i| format!("x{i:02}")).collect();
    for (i, k) in keys.iter().enumerate() {
        *dict.cell(k.as_bytes()).unwrap() = i as u32;
    }
    assert_eq!(dict.len(), keys.len());
    for (i, k) in keys.iter().enumerate() {
        assert_eq!(*dict.find(k.as_bytes()).unwrap().unwrap(), i as u32);
    }
    dict.close();
}

/// Forces a key and that same key plus one trailing zero byte down through
/// a shared boot slot into a second, cascaded radix node, exercising
/// `radix::next_byte`'s own exhausted-vs-real-zero distinction rather than
/// `Boot::index_of`'s.
#[test]
fn key_and_key_plus_trailing_zero_byte_stay_distinct_past_a_radix_burst() {
    let config = HatConfig::new(1, 4)
        .with_size_classes(vec![16])
        .with_pail_slots(2)
        .with_bucket_max(3);
    let mut dict: Dict<u32> = Dict::open(config);
    let keys: [&[u8]; 8] =
        [b"P", b"P\0", b"Pa", b"Pb", b"Pc", b"Pd", b"Pe", b"Pf"];
    for (i, k) in keys.iter().enumerate() {
        *dict.cell(k).unwrap() = i as u32;
    }
    assert_eq!(dict.len(), keys.len());

    let p_ptr = dict.cell(b"P").unwrap() as *mut u32;
    let p0_ptr = dict.cell(b"P\0").unwrap() as *mut u32;
    assert_ne!(p_ptr as usize, p0_ptr as usize);

    for (i, k) in keys.iter().enumerate() {
        assert_eq!(*dict.find(k).unwrap().unwrap(), i as u32);
    }

    let mut cursor = dict.cursor();
    let mut seen = Vec::new();
    while cursor.next() {
        seen.push(cursor.current_key().unwrap());
    }
    let mut expected: Vec<Vec<u8>> = keys.iter().map(|k| k.to_vec()).collect();
    expected.sort();
    assert_eq!(seen, expected);
    dict.close();
}
