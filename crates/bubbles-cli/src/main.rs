use anyhow::{Context, Result};
use bubbles_annotation::AnnotationSettings;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod script;

#[derive(Parser, Debug)]
#[command(author, version, about = "Replay a scripted block-annotation session", long_about = None)]
struct Args {
    /// Path to the JSON script to replay
    script: PathBuf,

    /// Settings file; defaults to the user config dir
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Record failing steps and carry on instead of stopping
    #[arg(long)]
    keep_going: bool,

    /// Print the report on a single line
    #[arg(long)]
    compact: bool,
}

fn main() -> Result<()> {
    // Log to stderr (if you run with `RUST_LOG=debug`).
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let settings = match &args.settings {
        Some(path) => AnnotationSettings::load_from(path)?,
        None => AnnotationSettings::load(),
    };

    let content = std::fs::read_to_string(&args.script)
        .with_context(|| format!("reading {}", args.script.display()))?;
    let script: script::Script = serde_json::from_str(&content)
        .with_context(|| format!("parsing {}", args.script.display()))?;

    let report = script::replay(&script, settings, args.keep_going)?;
    let output = if args.compact {
        serde_json::to_string(&report)?
    } else {
        serde_json::to_string_pretty(&report)?
    };
    println!("{output}");
    Ok(())
}
