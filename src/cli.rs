use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Parser;

use crate::config::load_config;
use crate::ir::Topology;
use crate::layout::compute_layout;
use crate::layout_dump::{LayoutDump, write_layout_dump};
use crate::style::default_catalog;

#[derive(Parser, Debug)]
#[command(
    name = "topolay",
    version,
    about = "Tree layout for application topology graphs"
)]
pub struct Args {
    /// Input topology JSON file or '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output file for the layout dump. Defaults to stdout if omitted.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Layout options JSON file (JSON5 accepted)
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    let config = load_config(args.config.as_deref())?;

    let input = read_input(args.input.as_deref())?;
    let topology = Topology::from_json(&input)?;
    let layout = compute_layout(&topology, &config);
    let catalog = default_catalog();

    match args.output.as_deref() {
        Some(path) => write_layout_dump(path, &layout, &topology, catalog)?,
        None => {
            let dump = LayoutDump::from_layout(&layout, &topology, catalog);
            let json = serde_json::to_string_pretty(&dump)?;
            let mut stdout = io::stdout().lock();
            stdout.write_all(json.as_bytes())?;
            stdout.write_all(b"\n")?;
        }
    }
    Ok(())
}

fn read_input(path: Option<&Path>) -> Result<String> {
    if let Some(path) = path
        && path != Path::new("-")
    {
        return Ok(std::fs::read_to_string(path)?);
    }
    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}
