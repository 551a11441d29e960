use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::sync::Arc;
use tracing::{error, info};

use stylefx::css::{self, get_computed_style_map, ComputedStyleMap};
use stylefx::{Animator, Config};

#[derive(Parser)]
#[command(name = "stylefx")]
#[command(about = "CSS computed-style helpers and timed property animations")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Convert a hex color to rgba(r,g,b,a)
    Rgba {
        hex: String,
        /// Opacity as a percentage
        #[arg(short, long, default_value_t = 100)]
        alpha: u8,
    },
    /// Convert a hex color to rgb(r,g,b)
    Rgb { hex: String },
    /// List the vendor-prefixed variants of a property
    Vendorize { property: String },
    /// Normalize a length unit
    Unit { unit: String },
    /// Build a scene from a config file and run its animations
    Run {
        config: String,
        /// Print the final styles as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Final computed styles of one element
#[derive(Serialize)]
struct ElementStyles {
    element: String,
    styles: ComputedStyleMap,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.debug {
        "debug"
    } else if cli.verbose {
        "info"
    } else {
        "warn"
    };

    tracing_subscriber::fmt()
        .with_env_filter(format!("stylefx={log_level}"))
        .with_target(false)
        .init();

    if let Err(e) = execute(cli.command).await {
        error!("❌ {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

async fn execute(command: Command) -> Result<()> {
    match command {
        Command::Rgba { hex, alpha } => println!("{}", css::rgba(&hex, alpha)?),
        Command::Rgb { hex } => println!("{}", css::rgb(&hex)?),
        Command::Vendorize { property } => {
            for name in css::vendorize(&property) {
                println!("{name}");
            }
        }
        Command::Unit { unit } => println!("{}", css::unit(&unit)),
        Command::Run { config, json } => run_scene(&config, json).await?,
    }
    Ok(())
}

async fn run_scene(path: &str, json: bool) -> Result<()> {
    info!("🦀 Starting stylefx v{}", env!("CARGO_PKG_VERSION"));

    let config = Config::load(path).await?;
    let doc = config.build_document()?;
    let mut animations = config.build_animations(&doc)?;

    let animator = Animator::new(Arc::new(doc.clone()));
    for result in animator.animate_all(&mut animations).await {
        let report = result.context("Animation failed")?;
        info!(
            "Animation {} finished: {} frame(s) in {:?}",
            report.id, report.frames, report.elapsed
        );
    }

    let mut scene = Vec::new();
    for element in doc.elements() {
        scene.push(ElementStyles {
            styles: get_computed_style_map(&doc, &element, "")?,
            element: element.label(),
        });
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&scene)?);
    } else {
        for entry in &scene {
            println!("{}", entry.element);
            for (name, style) in entry.styles.iter() {
                let important = if style.priority { " !important" } else { "" };
                println!("  {}: {}{}", name, style.value, important);
            }
        }
    }

    Ok(())
}
