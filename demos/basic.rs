use fprule::Engine;

fn main() {
    tracing_subscriber::fmt::init();

    let engine = Engine::default();
    let rule = engine
        .compile(r#"body="nginx" && (title="Welcome" || header~="X-Powered-By")"#)
        .expect("failed to compile rule");

    println!("rule: {rule}");
    println!("reads: {:?}", rule.keywords());

    let ctx = engine.new_context([
        ("header", "Server: nginx\r\nX-Powered-By: PHP/8.1"),
        ("body", "<html><body>Welcome to NGINX</body></html>"),
        ("title", "Dashboard"),
    ]);

    match rule.is_match(&ctx) {
        Ok(true) => println!("Result: match"),
        Ok(false) => println!("Result: no match"),
        Err(e) => println!("Evaluation failed: {e}"),
    }

    // Rule errors carry the byte offset of the problem.
    if let Err(e) = engine.compile(r#"body="nginx" && server="x""#) {
        println!("Rejected: {e}");
    }
}
