use std::sync::Arc;
use std::thread;

use fprule::{Engine, keyword};

fn main() {
    tracing_subscriber::fmt::init();

    let engine = Engine::new(["header", "body", "title", "icon_hash"]);
    let rule = Arc::new(
        engine
            .compile_expr(
                keyword("icon_hash")
                    .equal("116323821")
                    .or(keyword("header").regexp_match(r"Server: Apache/2\.4\.\d+")),
            )
            .expect("failed to compile rule"),
    );

    let responses = [
        vec![("icon_hash", "116323821")],
        vec![("header", "Server: Apache/2.4.57 (Debian)")],
        vec![("header", "Server: nginx"), ("icon_hash", "-1")],
        vec![("body", "It works!")],
    ];

    let handles: Vec<_> = responses
        .into_iter()
        .enumerate()
        .map(|(i, fields)| {
            let r = Arc::clone(&rule);
            let ctx = engine.new_context(fields);
            thread::spawn(move || {
                let result = r.is_match(&ctx);
                println!("Thread {i}: {result:?}");
            })
        })
        .collect();

    for h in handles {
        h.join().unwrap();
    }
}
