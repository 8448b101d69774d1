use fprule::Engine;

fn main() {
    tracing_subscriber::fmt::init();

    let engine = Engine::default();
    let rule = engine
        .compile(
            r#"(body="wordpress" || header~="wp-content") && title!="Login" && icon=="-1"
               || body="Powered by WordPress""#,
        )
        .expect("failed to compile rule");

    let ctx = engine.new_context([
        ("header", "Link: </wp-content/themes/x>; rel=preload"),
        ("body", "<html>... powered by wordpress ...</html>"),
        ("title", "My Blog"),
        ("icon", "-2"),
    ]);

    let report = rule.explain(&ctx).expect("evaluation failed");

    println!("{report}");
    println!();
    println!(
        "Evaluation order: {:?}",
        report.steps().iter().map(|s| s.predicate()).collect::<Vec<_>>()
    );
    println!(
        "Predicates that matched: {:?}",
        report.matched().map(|s| s.predicate()).collect::<Vec<_>>()
    );
    println!("Duration: {:?}", report.duration());
}
