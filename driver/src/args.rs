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
use std::path::PathBuf;

/// Build a word-frequency dictionary from a text file and print it in
/// sorted order.
#[derive(Parser, Debug)]
#[command(name = "hatrie", version = libhat::VERSION)]
pub struct Args {
    /// path to the input text file
    pub input: PathBuf,
    /// number of boot levels to pre-materialize (see `HatConfig::boot_levels`)
    #[arg(long, default_value_t = 3)]
    pub boot_levels: u8,
    /// print only the `n` most frequent words; 0 prints every word
    #[arg(long, default_value_t = 20)]
    pub top: usize,
}

pub fn parse() -> Args {
    Args::parse()
}
