use clap::Parser;

/// The binary takes no options; `--help` and `--version` are provided by clap.
#[derive(Parser)]
#[command(name = "v2ex-tui")]
#[command(about = "Browse V2EX topics and replies in the terminal", long_about = None)]
#[command(version)]
pub struct Cli {}
