//! CLI command implementations

use std::sync::Arc;

use crate::api::{ApiConfig, ApiServer};
use crate::observability::{Logger, Severity};
use crate::store::MemoryStore;

use super::args::{Cli, Command};
use super::errors::{CliError, CliResult};

/// Dispatch a parsed CLI invocation
pub fn run_command(cli: Cli) -> CliResult<()> {
    match cli.command {
        Command::Serve { host, port } => serve(host, port),
    }
}

/// Run the HTTP server until ctrl-c.
///
/// Config comes from the environment; flags override the bind address.
fn serve(host: Option<String>, port: Option<u16>) -> CliResult<()> {
    let mut config = ApiConfig::from_env().map_err(|err| {
        Logger::error("config_load_failed", &[("detail", &err.to_string())]);
        CliError::from(err)
    })?;
    if let Some(host) = host {
        config.host = host;
    }
    if let Some(port) = port {
        config.port = port;
    }
    Logger::log(
        Severity::Info,
        "config_loaded",
        &[("addr", &config.socket_addr())],
    );

    let store = Arc::new(MemoryStore::new());
    let server = ApiServer::new(config, store);

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::server_error(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(server.start())?;

    Ok(())
}
