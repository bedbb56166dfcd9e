//! Simple CLI that reads an entry's HTML from stdin and prints the rewritten HTML.
//!
//! Usage: `rewrite_stdin <entry-url> [comma-separated-rules]`
//!
//! Without an explicit rule list the predefined domain bindings are used.
//! Set `RUST_LOG=debug` to see skipped or failed transforms.

use entry_rewrite::{rewrite_entry, Options};
use std::env;
use std::io::{self, Read};

fn main() {
    env_logger::init();

    let mut args = env::args().skip(1);
    let Some(entry_url) = args.next() else {
        eprintln!("usage: rewrite_stdin <entry-url> [rules]");
        std::process::exit(2);
    };

    let options = Options {
        custom_rules: args.next(),
        ..Options::default()
    };

    let mut html = String::new();
    if io::stdin().read_to_string(&mut html).is_err() {
        eprintln!("Failed to read from stdin");
        std::process::exit(1);
    }

    print!("{}", rewrite_entry(&entry_url, &html, &options));
}
