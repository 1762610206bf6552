//! dip - Entry Point
//!
//! Reports which elements of a JSON document each named view binds to.
//!
//! ```text
//! dip page.json --view userCard --view panel
//! dip page.json --view userCard --json
//! ```

use clap::Parser;
use dip::ConfigLoader;
use dip::infrastructure::ErrorContext;
use dip::inspect::inspect;
use dip::{MemoryDocument, init};
use std::path::PathBuf;
use std::sync::Arc;

/// Command line interface for dip
#[derive(Parser, Debug)]
#[command(name = "dip")]
#[command(about = "dip - inspect view bindings in a document")]
#[command(version)]
pub struct Cli {
    /// JSON description of the document
    pub document: PathBuf,

    /// View name to register; repeatable
    #[arg(short, long = "view")]
    pub views: Vec<String>,

    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Print one JSON object per match
    #[arg(long)]
    pub json: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let loader = match &cli.config {
        Some(path) => ConfigLoader::new().with_config_path(path),
        None => ConfigLoader::new(),
    };
    let config = loader.load()?;
    init(&config)?;

    let json = std::fs::read_to_string(&cli.document).io_context(format!(
        "Failed to read document: {}",
        cli.document.display()
    ))?;
    let document = Arc::new(MemoryDocument::from_json(&json)?);

    for report in inspect(document, &cli.views)? {
        if cli.json {
            println!("{}", serde_json::to_string(&report)?);
        } else {
            println!("{}\t{}\t<{}>\t{:?}", report.view, report.marker, report.tag, report.data);
        }
    }
    Ok(())
}
