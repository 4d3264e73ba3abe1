//! Relaxing array checks and limiting nesting with ParseOptions.
//!
//! Run with: cargo run --example custom_options

use std::error::Error;
use tomlet::{parse, parse_with_options, ParseOptions};

fn main() -> Result<(), Box<dyn Error>> {
    let mixed = "values = [1, 'two', 3.0]";

    // Default options require arrays of one kind
    match parse(mixed) {
        Ok(_) => println!("unexpected success"),
        Err(err) => println!("default: {}", err),
    }

    // Relaxed options accept mixed arrays
    let doc = parse_with_options(mixed, ParseOptions::relaxed())?;
    println!("relaxed: {}", doc.to_string().trim_end());

    // Nesting depth limit
    let nested = "deep = [[[[1]]]]";
    let shallow = ParseOptions::new().with_max_depth(2);
    match parse_with_options(nested, shallow) {
        Ok(_) => println!("unexpected success"),
        Err(err) => println!("max_depth 2: {}", err),
    }

    let doc = parse_with_options(nested, ParseOptions::new().with_max_depth(4))?;
    println!("max_depth 4: {}", doc.to_string().trim_end());

    Ok(())
}
