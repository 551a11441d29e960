//! Grows every `.zapps` element to 500px and back, four times, after a two
//! second delay.
//!
//! Run with `cargo run --example size_animation`.

use anyhow::Result;
use std::sync::Arc;

use stylefx::animation::{query_sequence, Animator, Stat, StatConfig, Width};
use stylefx::{CssStyleDeclaration, Document};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("stylefx=info")
        .with_target(false)
        .init();

    let doc = Document::new();
    for id in ["first", "second"] {
        let element = doc.create_element("div");
        element.set_id(id);
        element.add_class("zapps");
        element.set_style(CssStyleDeclaration::parse("width: 100px; height: 40px")?);
    }

    let stat = Stat::new(StatConfig {
        duration: 1000,
        delay: 2000,
        easing: "ease-in".to_string(),
        loops: 4,
        reverse: true,
        optimize: true,
    })?;

    let mut width = query_sequence(&doc, ".zapps", stat, vec![Box::new(Width::new(500.0))])?;

    width.on_begin(|_| println!("Animation has begun."));
    width.on_end(|_| println!("Animation has ended."));
    width.on_progress(|frame| {
        println!(
            "Animation is progressing: pass {} at {:.0}%",
            frame.iteration + 1,
            frame.eased * 100.0
        )
    });

    let animator = Animator::new(Arc::new(doc.clone()));
    let report = animator.animate(&mut width).await?;
    println!("{} frames, {} style writes", report.frames, report.writes);

    for element in doc.elements() {
        println!("{} -> {}", element.label(), element.style().css_text());
    }

    Ok(())
}
