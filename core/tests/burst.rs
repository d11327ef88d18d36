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

//! Black-box coverage of the promotion/burst cascade, observed only through
//! `find`/`cursor` since the node-tag internals aren't part of the public
//! surface (see `hatrie_core::trie::engine` unit tests for the structural
//! assertions that need that visibility).

use hatrie_core::{Dict, HatConfig};

/// All 20 keys share a first byte, so `boot_levels = 1` funnels them into
/// one Array rather than scattering one key per boot slot; the size-class
/// table forces exactly one promotion along the way.
#[test]
fn twenty_one_byte_keys_stay_findable_through_promotion() {
    let mut dict: Dict<()> = Dict::open(
        HatConfig::new(1, 0)
            .with_size_classes(vec![16, 64])
            .with_pail_slots(0),
    );
    for b in b'a'..=b't' {
        *dict.cell(&[b'x', b]).unwrap() = ();
    }
    assert_eq!(dict.len(), 20);
    for b in b'a'..=b't' {
        assert!(dict.contains(&[b'x', b]));
    }
}

#[test]
fn bucket_burst_keeps_all_keys_findable_and_ordered() {
    let mut dict: Dict<()> = Dict::open(HatConfig::new(0, 0).with_bucket_max(4));
    let keys = ["aa", "ab", "ac", "ad", "ae"];
    for k in keys {
        *dict.cell(k.as_bytes()).unwrap() = ();
    }
    for k in keys {
        assert!(dict.contains(k.as_bytes()));
    }

    let mut seen = Vec::new();
    let mut cursor = dict.cursor();
    while cursor.next() {
        seen.push(cursor.current_key().unwrap());
    }
    let mut expected: Vec<Vec<u8>> = keys.iter().map(|k| k.as_bytes().to_vec()).collect();
    expected.sort();
    assert_eq!(seen, expected);
}

#[test]
fn larger_burst_cascade_preserves_every_key() {
    let mut dict: Dict<u32> = Dict::open(HatConfig::new(0, 4).with_bucket_max(8));
    let mut keys = Vec::new();
    for i in 0..500u32 {
        let key = format!("key-{i:04}");
        keys.push(key.clone());
        *dict.cell(key.as_bytes()).unwrap() = i;
    }
    assert_eq!(dict.len(), 500);
    for (i, key) in keys.iter().enumerate() {
        assert_eq!(*dict.find(key.as_bytes()).unwrap().unwrap(), i as u32);
    }
}
