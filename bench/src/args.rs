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

use clap::Parser;

/// Insert and lookup throughput benchmark for the hatrie dictionary.
#[derive(Parser, Debug)]
#[command(name = "hatrie-bench", version = libhat::VERSION)]
pub struct Args {
    /// number of random keys to insert and then look up
    #[arg(long, default_value_t = 1_000_000)]
    pub keys: usize,
    /// length, in bytes, of each generated key
    #[arg(long, default_value_t = 16)]
    pub key_len: usize,
    /// number of pre-materialized boot levels
    #[arg(long, default_value_t = 3)]
    pub boot_levels: u8,
}

pub fn parse() -> Args {
    Args::parse()
}
