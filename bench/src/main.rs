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

mod args;

use devtimer::SimpleTimer;
use hatrie_core::{Dict, HatConfig};
use libhat::util::terminal;
use rand::distributions::Alphanumeric;
use rand::{Rng, SeedableRng};
use rand::rngs::StdRng;

fn gen_keys(count: usize, key_len: usize) -> Vec<Vec<u8>> {
    let mut rng = StdRng::seed_from_u64(0xDEC0DE);
    (0..count)
        .map(|_| (&mut rng).sample_iter(Alphanumeric).take(key_len).collect())
        .collect()
}

fn main() {
    env_logger::init();
    let args = args::parse();
    let _ = terminal::write_info(format!(
        "generating {} keys of {} bytes each",
        args.keys, args.key_len
    ));
    let keys = gen_keys(args.keys, args.key_len);

    let config = HatConfig::new(args.boot_levels, 0);
    let mut dict: Dict<u64> = Dict::open(config);

    let mut insert_timer = SimpleTimer::new();
    insert_timer.start();
    for (i, key) in keys.iter().enumerate() {
        *dict.cell(key).expect("key within bound") = i as u64;
    }
    insert_timer.stop();

    let mut lookup_timer = SimpleTimer::new();
    lookup_timer.start();
    let mut hits = 0usize;
    for key in &keys {
        if dict.find(key).expect("key within bound").is_some() {
            hits += 1;
        }
    }
    lookup_timer.stop();

    let insert_secs = insert_timer.time_in_secs();
    let lookup_secs = lookup_timer.time_in_secs();
    let _ = terminal::write_success(format!(
        "insert: {:.3}s ({:.0} keys/sec)",
        insert_secs,
        args.keys as f64 / insert_secs.max(f64::EPSILON)
    ));
    let _ = terminal::write_success(format!(
        "lookup: {:.3}s ({:.0} keys/sec), {hits}/{} hits",
        lookup_secs,
        args.keys as f64 / lookup_secs.max(f64::EPSILON),
        args.keys
    ));

    dict.close();
}
