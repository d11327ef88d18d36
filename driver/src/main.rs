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
mod error;

use error::DriverResult;
use hatrie_core::{Dict, HatConfig};
use std::fs;

macro_rules! fatal {
    ($($arg:tt)*) => {{
        eprintln!($($arg)*);
        std::process::exit(0x01);
    }}
}

fn main() {
    env_logger::init();
    match run() {
        Ok(()) => {}
        Err(e) => fatal!("hatrie: {e}"),
    }
}

fn run() -> DriverResult<()> {
    let args = args::parse();
    let text = fs::read_to_string(&args.input)?;

    // `Dict::open` sets the aux width itself from `size_of::<u32>()`.
    let config = HatConfig::new(args.boot_levels, 0);
    let mut dict: Dict<u32> = Dict::open(config);

    for word in tokenize(&text) {
        let count = dict.cell(word.as_bytes())?;
        *count += 1;
    }

    log::info!("indexed {} distinct words", dict.len());

    let mut entries = Vec::with_capacity(dict.len());
    let mut cursor = dict.cursor();
    while cursor.next() {
        let key = cursor.current_key().expect("cursor is positioned");
        let count = unsafe { *(cursor.current_aux().expect("positioned entry has an aux slot") as *const u32) };
        entries.push((key, count));
    }

    if args.top > 0 {
        entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        entries.truncate(args.top);
    }

    for (word, count) in &entries {
        println!("{count:>8}  {}", String::from_utf8_lossy(word));
    }

    dict.close();
    Ok(())
}

/// Lowercase alphabetic runs, everything else treated as a separator.
fn tokenize(text: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    for ch in text.chars() {
        if ch.is_alphabetic() {
            current.extend(ch.to_lowercase());
        } else if !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenize_splits_on_non_alphabetic() {
        assert_eq!(tokenize("Hello, world! Hello."), vec!["hello", "world", "hello"]);
    }
}
