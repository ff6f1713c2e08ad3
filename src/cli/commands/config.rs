//! Config command - Print the default configuration

use anyhow::Result;
use clap::Parser;

use crate::config::MazeDuelConfig;

#[derive(Parser, Debug)]
#[command(about = "Print the default configuration as JSON")]
pub struct ConfigArgs {}

pub fn execute(_args: ConfigArgs) -> Result<()> {
    let json = serde_json::to_string_pretty(&MazeDuelConfig::default())?;
    println!("{json}");
    Ok(())
}
