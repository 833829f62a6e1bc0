//! CLI argument definitions using clap
//!
//! Commands:
//! - shelfd serve [--host <host>] [--port <port>]

use clap::{Parser, Subcommand};

/// shelfd - A small book catalog HTTP API
#[derive(Parser, Debug)]
#[command(name = "shelfd")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the HTTP server
    Serve {
        /// Host to bind to (overrides BIND_HOST)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to (overrides BIND_PORT)
        #[arg(long)]
        port: Option<u16>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
