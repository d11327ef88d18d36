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

use hatrie_core::{CoreError, Dict, HatConfig};

#[test]
fn long_high_bit_key_round_trips_exactly() {
    let mut dict: Dict<()> = Dict::open(HatConfig::new(1, 0));
    let key = vec![0xFFu8; 200];
    *dict.cell(&key).unwrap() = ();

    assert!(dict.find(&key).unwrap().is_some());

    let mut cursor = dict.cursor();
    assert!(cursor.seek(&key));
    assert_eq!(cursor.current_key().unwrap(), key);
}

#[test]
fn key_at_the_length_bound_is_accepted_one_past_is_rejected() {
    let mut dict: Dict<()> = Dict::open(HatConfig::new(1, 0));
    let max_key = vec![b'k'; hatrie_core::config::KEY_MAX_LEN];
    assert!(dict.cell(&max_key).is_ok());

    let over_key = vec![b'k'; hatrie_core::config::KEY_MAX_LEN + 1];
    match dict.cell(&over_key) {
        Err(CoreError::KeyTooLong { len, max }) => {
            assert_eq!(len, hatrie_core::config::KEY_MAX_LEN + 1);
            assert_eq!(max, hatrie_core::config::KEY_MAX_LEN);
        }
        other => panic!("expected KeyTooLong, got {other:?}"),
    }
}

#[test]
fn high_bit_bytes_preserve_lexicographic_order() {
    let mut dict: Dict<()> = Dict::open(HatConfig::new(1, 0));
    let low = vec![0x01u8, 0x02];
    let high = vec![0x81u8, 0x02];
    *dict.cell(&high).unwrap() = ();
    *dict.cell(&low).unwrap() = ();

    let mut cursor = dict.cursor();
    assert!(cursor.next());
    assert_eq!(cursor.current_key().unwrap(), low);
    assert!(cursor.next());
    assert_eq!(cursor.current_key().unwrap(), high);
}
