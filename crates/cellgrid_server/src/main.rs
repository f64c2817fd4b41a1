//! Server entry point.
//!
//! Configuration comes from `CELLGRID_*` environment variables; see
//! `cellgrid_server::config`.

use cellgrid_core::init_logging;
use cellgrid_server::{run, ServerConfig};
use log::error;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("cellgrid_server: invalid configuration: {err}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(err) = init_logging(&config.log_level, config.log_dir.as_deref()) {
        eprintln!("cellgrid_server: logging setup failed: {err}");
        return ExitCode::FAILURE;
    }

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=server_stop module=server status=error error={err}");
            ExitCode::FAILURE
        }
    }
}
