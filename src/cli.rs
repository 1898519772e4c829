use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "playpen")]
#[command(about = "A multi-file HTML/CSS/JS playground for the terminal")]
#[command(version)]
pub struct Cli {
    /// Config file to use instead of the one in the config directory
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Files to import next to the starter project
    pub files: Vec<PathBuf>,
}
