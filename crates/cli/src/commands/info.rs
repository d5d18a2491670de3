//! Inspection of SELAFIN files

// standard library
use std::path::PathBuf;

// hydromesh modules
use hydromesh_selafin::SelafinReader;
use hydromesh_utils::f;

// external crates
use anyhow::{Context, Result};
use clap::Args;

#[derive(Args, Debug)]
pub struct InfoArgs {
    /// Path to the SELAFIN file
    #[arg(short, long, value_name = "path")]
    pub input: PathBuf,

    /// Print the summary as JSON
    #[arg(long)]
    pub json: bool,

    /// List every time step
    #[arg(long, conflicts_with = "json")]
    pub times: bool,
}

pub fn info(args: InfoArgs) -> Result<()> {
    let mut reader = SelafinReader::open(&args.input)
        .with_context(|| f!("failed to read {}", args.input.display()))?;
    let summary = reader.summary()?;

    if args.json {
        println!("{}", summary.to_json()?);
        return Ok(());
    }

    println!("{summary}");
    if args.times {
        let times = summary
            .times
            .iter()
            .map(|t| t.to_string())
            .collect::<Vec<String>>()
            .join(", ");
        println!("{}", textwrap::fill(&f!("times: {times}"), 80));
    }
    Ok(())
}
