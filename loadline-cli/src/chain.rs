//! `chain` command: plan transporter chains for a consignment.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use loadline_matching::{ChainPlan, ChainRequest, Transporter, plan_chains};
use log::info;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::input::{load_json, require_existing, write_json};
use crate::{ARG_REQUEST, ARG_TRANSPORTERS, CliError, ENV_CHAIN_REQUEST, ENV_CHAIN_TRANSPORTERS};

/// CLI arguments for the `chain` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "chain",
    long_about = "Plan direct and two-leg transporter chains for a JSON \
                 chain request. Transporters are read from a separate JSON \
                 array so one roster can serve many requests.",
    about = "Plan single or two-leg transporter chains"
)]
#[ortho_config(prefix = "LOADLINE")]
pub(crate) struct ChainArgs {
    /// Path to a JSON file containing a chain request.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) request_path: Option<Utf8PathBuf>,
    /// Path to a JSON array of transporters.
    #[arg(long = ARG_TRANSPORTERS, value_name = "path")]
    #[serde(default)]
    pub(crate) transporters: Option<Utf8PathBuf>,
}

impl ChainArgs {
    pub(crate) fn into_config(self) -> Result<ChainConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        ChainConfig::try_from(merged)
    }
}

/// Resolved `chain` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ChainConfig {
    pub(crate) request_path: Utf8PathBuf,
    pub(crate) transporters: Utf8PathBuf,
}

impl ChainConfig {
    fn validate_sources(&self) -> Result<(), CliError> {
        require_existing(&self.request_path, ARG_REQUEST)?;
        require_existing(&self.transporters, ARG_TRANSPORTERS)
    }
}

impl TryFrom<ChainArgs> for ChainConfig {
    type Error = CliError;

    fn try_from(args: ChainArgs) -> Result<Self, Self::Error> {
        let request_path = args.request_path.ok_or(CliError::MissingArgument {
            field: ARG_REQUEST,
            env: ENV_CHAIN_REQUEST,
        })?;
        let transporters = args.transporters.ok_or(CliError::MissingArgument {
            field: ARG_TRANSPORTERS,
            env: ENV_CHAIN_TRANSPORTERS,
        })?;
        Ok(Self {
            request_path,
            transporters,
        })
    }
}

pub(crate) fn run_chain(args: ChainArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_chain_with(args, &mut stdout)
}

pub(crate) fn run_chain_with(args: ChainArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let plans = execute_chain(args)?;
    write_json(writer, &plans)
}

fn execute_chain(args: ChainArgs) -> Result<Vec<ChainPlan>, CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    let request: ChainRequest = load_json(&config.request_path, ARG_REQUEST)?;
    let transporters: Vec<Transporter> = load_json(&config.transporters, ARG_TRANSPORTERS)?;
    info!(
        "planning chains over {} transporters for {}",
        transporters.len(),
        config.request_path
    );
    plan_chains(&request, &transporters).map_err(|source| CliError::Chain {
        path: config.request_path,
        source,
    })
}
