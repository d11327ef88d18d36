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

//! Tunables gathered into one value at `open`, rather than the process
//! globals (`HatPailMax`, `HatBucketSlots`, `HatBucketMax`, the size-class
//! table) that the reference implementation mutates from the command line
//! before any trie is opened.

pub const KEY_MAX_LEN: usize = 16383;
pub const MAX_ARRAY_COUNT: u8 = 255;

const DEFAULT_SIZE_CLASSES: [u16; 12] = [16, 32, 48, 64, 96, 128, 160, 192, 224, 256, 384, 512];

#[derive(Debug, Clone)]
pub struct HatConfig {
    /// number of pre-materialized boot levels, each contributing a full
    /// byte of fanout plus one reserved "exhausted" digit (`257^L` root
    /// slots). default 3.
    pub boot_levels: u8,
    /// pail slot count. 0 disables pails: arrays burst straight to a bucket.
    pub pail_slots: u32,
    /// bucket slot count.
    pub bucket_slots: u32,
    /// live-key count at which a bucket bursts into a radix node.
    pub bucket_max: u32,
    /// width, in bytes, of the per-key aux payload. may be zero.
    pub aux_width: u32,
    /// array size classes, in bytes. sorted ascending at construction
    /// (resolves the non-monotonic ordering the reference header allows).
    pub size_classes: Vec<u16>,
}

impl Default for HatConfig {
    fn default() -> Self {
        Self {
            boot_levels: 3,
            pail_slots: 127,
            bucket_slots: 2047,
            bucket_max: 65536,
            aux_width: 0,
            size_classes: DEFAULT_SIZE_CLASSES.to_vec(),
        }
    }
}

impl HatConfig {
    pub fn new(boot_levels: u8, aux_width: u32) -> Self {
        Self {
            boot_levels,
            aux_width,
            ..Default::default()
        }
    }

    pub fn with_pail_slots(mut self, pail_slots: u32) -> Self {
        self.pail_slots = pail_slots;
        self
    }

    pub fn with_bucket_slots(mut self, bucket_slots: u32) -> Self {
        self.bucket_slots = bucket_slots;
        self
    }

    pub fn with_bucket_max(mut self, bucket_max: u32) -> Self {
        self.bucket_max = bucket_max;
        self
    }

    pub fn with_size_classes(mut self, mut classes: Vec<u16>) -> Self {
        classes.sort_unstable();
        classes.dedup();
        self.size_classes = classes;
        self
    }

    /// normalizes the configuration in place. called once by `open`, so the
    /// rest of the engine can assume `size_classes` is sorted and non-empty.
    pub(crate) fn normalize(&mut self) {
        self.size_classes.sort_unstable();
        self.size_classes.dedup();
        assert!(
            !self.size_classes.is_empty(),
            "hatrie: at least one array size class is required"
        );
    }

    pub fn pails_enabled(&self) -> bool {
        self.pail_slots > 0
    }

    /// smallest size class whose byte budget is >= `needed`, if any fits.
    pub(crate) fn smallest_class_fitting(&self, needed: usize) -> Option<(usize, u16)> {
        self.size_classes
            .iter()
            .enumerate()
            .find(|(_, &class)| class as usize >= needed)
            .map(|(idx, &class)| (idx, class))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_classes_are_sorted() {
        let cfg = HatConfig::default();
        let mut sorted = cfg.size_classes.clone();
        sorted.sort_unstable();
        assert_eq!(cfg.size_classes, sorted);
    }

    #[test]
    fn unsorted_user_table_is_normalized() {
        let mut cfg = HatConfig::default().with_size_classes(vec![32, 16, 24, 16]);
        cfg.normalize();
        assert_eq!(cfg.size_classes, vec![16, 24, 32]);
    }

    #[test]
    fn smallest_class_fitting_picks_minimum() {
        let cfg = HatConfig::default().with_size_classes(vec![16, 32, 48]);
        assert_eq!(cfg.smallest_class_fitting(20), Some((1, 32)));
        assert_eq!(cfg.smallest_class_fitting(48), Some((2, 48)));
        assert_eq!(cfg.smallest_class_fitting(49), None);
    }
}
