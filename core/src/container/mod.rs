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

pub mod array;
pub mod bucket;
pub mod pail;

pub use array::ArrayNode;
pub use bucket::BucketNode;
pub use pail::PailNode;

/// Shared by `Pail` and `Bucket`. Not cryptographic, not even particularly
/// strong — it only needs to spread short byte strings across a few
/// thousand slots.
#[inline]
pub fn hat_hash(s: &[u8]) -> u32 {
    let mut h: u32 = s.len() as u32;
    for &b in s {
        h = h
            .wrapping_add(h << 5)
            .wrapping_add(h >> 27)
            .wrapping_add(b as u32);
    }
    h
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_is_deterministic() {
        assert_eq!(hat_hash(b"banana"), hat_hash(b"banana"));
    }

    #[test]
    fn distinct_inputs_usually_differ() {
        assert_ne!(hat_hash(b"apple"), hat_hash(b"banana"));
    }
}
