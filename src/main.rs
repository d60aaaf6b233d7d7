use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use scenekit::{init_logging, load_config, open_scene};

/// Load a scene drawing, report entries that cannot be built, and print the
/// normalized drawing
#[derive(Parser, Debug)]
#[command(name = "scenekit")]
#[command(version, about, long_about = None)]
struct Args {
    /// Editor config file (JSON or TOML)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Item metadata catalog to use instead of the built-in one
    #[arg(long, value_name = "FILE")]
    metadata: Option<PathBuf>,

    /// Write the normalized drawing here (format from the extension)
    #[arg(long, short, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Drawing to open
    #[arg(value_name = "DRAWING")]
    drawing: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging()?;

    let config = load_config(args.config.as_deref())?;
    let (editor, failures) = open_scene(config, args.metadata.as_deref(), args.drawing.as_deref())?;
    for failure in &failures {
        eprintln!("skipped: {}", failure);
    }

    let drawing = editor.drawing();
    match &args.output {
        Some(path) => {
            drawing.save_to_file(path)?;
            info!("Wrote {} items to {}", drawing.len(), path.display());
        }
        None => {
            let text = serde_json::to_string_pretty(&drawing).context("Failed to render drawing")?;
            println!("{}", text);
        }
    }

    Ok(())
}
