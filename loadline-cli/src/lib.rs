//! Command-line interface for the Loadline engine.
//!
//! Every subcommand reads a JSON request from disk and prints a JSON result
//! on stdout. Settings layer from configuration files, environment variables
//! (`LOADLINE_CMDS_<COMMAND>_<FIELD>`) and flags, in increasing precedence.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod chain;
mod error;
mod fs;
mod input;
mod matching;
mod optimize;

use chain::{ChainArgs, run_chain};
pub use error::CliError;
use matching::{MatchArgs, run_match};
use optimize::{OptimizeArgs, run_optimize};

const ARG_REQUEST: &str = "request";
const ARG_TRANSPORTERS: &str = "transporters";
const ARG_OPTIMIZER_URL: &str = "optimizer-url";
const ARG_OPTIMIZER_TIMEOUT_MS: &str = "optimizer-timeout-ms";
const ARG_OSRM_BASE_URL: &str = "osrm-base-url";
const ARG_AVERAGE_SPEED_KMH: &str = "average-speed-kmh";
const ARG_MAX_DEVIATION_KM: &str = "max-deviation-km";
const ARG_COMPATIBILITY_THRESHOLD: &str = "compatibility-threshold";
const ENV_OPTIMIZE_REQUEST: &str = "LOADLINE_CMDS_OPTIMIZE_REQUEST_PATH";
const ENV_MATCH_REQUEST: &str = "LOADLINE_CMDS_MATCH_REQUEST_PATH";
const ENV_CHAIN_REQUEST: &str = "LOADLINE_CMDS_CHAIN_REQUEST_PATH";
const ENV_CHAIN_TRANSPORTERS: &str = "LOADLINE_CMDS_CHAIN_TRANSPORTERS";

/// Run the Loadline CLI with the current process arguments and environment.
///
/// # Errors
/// Returns [`CliError`] when arguments or configuration are invalid, an input
/// cannot be read, the engine rejects the request, or output cannot be
/// written.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Optimize(args) => run_optimize(args),
        Command::Match(args) => run_match(args),
        Command::Chain(args) => run_chain(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "loadline",
    about = "Route optimisation and load matching for freight fleets",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Plan vehicle routes for an optimisation request.
    Optimize(OptimizeArgs),
    /// Rank candidate routes for a batch of shipments.
    Match(MatchArgs),
    /// Plan single or two-leg transporter chains.
    Chain(ChainArgs),
}

#[cfg(test)]
mod tests;
