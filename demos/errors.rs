//! Positioned parse errors.
//!
//! Run with: cargo run --example errors

use tomlet::parse;

fn main() {
    let inputs = [
        "X = [1, 'X']",
        "X = [[1, 2], []",
        "name = \"unterminated",
        "[server]\nport = 80\n[server]",
        "title = 'ok'\npath = \"C:\\q\"",
    ];

    for input in inputs {
        match parse(input) {
            Ok(_) => println!("parsed: {:?}\n", input),
            Err(err) => {
                println!("{:?} at {}:{}", err.kind(), err.line(), err.column());
                println!("{}\n", err.render_with_source(input));
            }
        }
    }
}
