//! Parsing a document and reading typed values.
//!
//! Run with: cargo run --example simple

use std::error::Error;
use tomlet::{parse, Value};

const CONFIG: &str = r#"
title = "Service"

[server]
host = '127.0.0.1'
ports = [8080, 8081]

[[workers]]
name = "fetch"
threads = 4

[[workers]]
name = "index"
threads = 2
"#;

fn main() -> Result<(), Box<dyn Error>> {
    let doc = parse(CONFIG)?;

    // Plain accessors return Options
    let title = doc.root().get("title").and_then(Value::as_str);
    println!("title: {:?}", title);

    // Nodes carry their path into errors
    let server = doc.node().get("server")?;
    let host: &str = server.get("host")?.get_as()?;
    let port: i64 = server.get("ports")?.at(0)?.get_as()?;
    println!("listening on {}:{}", host, port);

    let workers = doc.node().get("workers")?;
    for i in 0..2 {
        let worker = workers.at(i)?;
        let name: String = worker.get("name")?.get_as()?;
        let threads: i64 = worker.get("threads")?.get_as()?;
        println!("{} ({} threads) at {}", name, threads, worker.path());
    }

    if let Err(err) = server.get("timeout") {
        println!("expected failure: {}", err);
    }

    // Writing keeps the literal string form
    println!("\nWritten back:\n{}", doc);
    assert_eq!(parse(&doc.to_string())?, doc);
    println!("✓ Round-trip successful");

    Ok(())
}
