//! `match` command: rank candidate routes for a batch of shipments.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use loadline_matching::{MatchConfig, MatchReport, MatchRequest, match_shipments};
use log::info;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::input::{load_json, require_existing, write_json};
use crate::{
    ARG_COMPATIBILITY_THRESHOLD, ARG_MAX_DEVIATION_KM, ARG_REQUEST, CliError, ENV_MATCH_REQUEST,
};

/// CLI arguments for the `match` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "match",
    long_about = "Score every available route against every shipment in a \
                 JSON matching request and print the ranked matches.",
    about = "Rank candidate routes for a batch of shipments"
)]
#[ortho_config(prefix = "LOADLINE")]
pub(crate) struct MatchArgs {
    /// Path to a JSON file with `shipments` and `available_routes`.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) request_path: Option<Utf8PathBuf>,
    /// Deviation at which a candidate's score reaches zero.
    #[arg(long = ARG_MAX_DEVIATION_KM, value_name = "km")]
    #[serde(default)]
    pub(crate) max_deviation_km: Option<f64>,
    /// Minimum score, 0 to 100, for a candidate to be kept.
    #[arg(long = ARG_COMPATIBILITY_THRESHOLD, value_name = "score")]
    #[serde(default)]
    pub(crate) compatibility_threshold: Option<f64>,
}

impl MatchArgs {
    pub(crate) fn into_config(self) -> Result<MatchCommandConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        MatchCommandConfig::try_from(merged)
    }
}

/// Resolved `match` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct MatchCommandConfig {
    pub(crate) request_path: Utf8PathBuf,
    pub(crate) matching: MatchConfig,
}

impl TryFrom<MatchArgs> for MatchCommandConfig {
    type Error = CliError;

    fn try_from(args: MatchArgs) -> Result<Self, Self::Error> {
        let request_path = args.request_path.ok_or(CliError::MissingArgument {
            field: ARG_REQUEST,
            env: ENV_MATCH_REQUEST,
        })?;
        let mut matching = MatchConfig::default();
        if let Some(km) = args.max_deviation_km {
            matching = matching.with_max_deviation_km(km);
        }
        if let Some(threshold) = args.compatibility_threshold {
            matching = matching.with_compatibility_threshold(threshold);
        }
        matching.validate().map_err(CliError::InvalidMatchConfig)?;
        Ok(Self {
            request_path,
            matching,
        })
    }
}

pub(crate) fn run_match(args: MatchArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_match_with(args, &mut stdout)
}

pub(crate) fn run_match_with(args: MatchArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let report = execute_match(args)?;
    write_json(writer, &report)
}

fn execute_match(args: MatchArgs) -> Result<MatchReport, CliError> {
    let config = args.into_config()?;
    require_existing(&config.request_path, ARG_REQUEST)?;
    let request: MatchRequest = load_json(&config.request_path, ARG_REQUEST)?;
    request
        .validate()
        .map_err(|source| CliError::InvalidMatchRequest {
            path: config.request_path.clone(),
            source,
        })?;
    info!(
        "matching {} shipments against {} routes",
        request.shipments.len(),
        request.available_routes.len()
    );
    Ok(match_shipments(
        &request.shipments,
        &request.available_routes,
        &config.matching,
    ))
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<MatchCommandConfig, CliError> {
    let merged = MatchArgs::merge_from_layers(layers).map_err(CliError::from)?;
    MatchCommandConfig::try_from(merged)
}
