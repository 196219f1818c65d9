//! `optimize` command: plan vehicle routes for a JSON optimisation request.

use std::io::Write;
use std::time::Duration;

use camino::Utf8PathBuf;
use clap::Parser;
use loadline_core::{OptimizeRequest, OptimizeResponse};
use loadline_external::{ExternalOptimizer, ExternalOptimizerConfig, OsrmDistanceProvider};
use loadline_solver::{Planner, PlannerConfig};
use log::info;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::input::{load_json, require_existing, write_json};
use crate::{
    ARG_AVERAGE_SPEED_KMH, ARG_OPTIMIZER_TIMEOUT_MS, ARG_OPTIMIZER_URL, ARG_OSRM_BASE_URL,
    ARG_REQUEST, CliError, ENV_OPTIMIZE_REQUEST,
};

/// CLI arguments for the `optimize` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "optimize",
    long_about = "Plan routes for a JSON optimisation request. A remote \
                 optimiser is tried first when its URL is configured; the \
                 local capacity solver answers otherwise. Road distances \
                 come from OSRM when a base URL is set and from great-circle \
                 estimates when not.",
    about = "Plan vehicle routes for an optimisation request"
)]
#[ortho_config(prefix = "LOADLINE")]
pub(crate) struct OptimizeArgs {
    /// Path to a JSON file containing an optimisation request.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) request_path: Option<Utf8PathBuf>,
    /// Base URL of the remote optimiser (e.g. "http://localhost:8000").
    #[arg(long = ARG_OPTIMIZER_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) optimizer_url: Option<String>,
    /// Per-request timeout for the remote optimiser in milliseconds.
    #[arg(long = ARG_OPTIMIZER_TIMEOUT_MS, value_name = "ms")]
    #[serde(default)]
    pub(crate) optimizer_timeout_ms: Option<u64>,
    /// Base URL of an OSRM server (e.g. "http://localhost:5000").
    #[arg(long = ARG_OSRM_BASE_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) osrm_base_url: Option<String>,
    /// Speed used for the travel time estimate.
    #[arg(long = ARG_AVERAGE_SPEED_KMH, value_name = "kmh")]
    #[serde(default)]
    pub(crate) average_speed_kmh: Option<f64>,
}

impl OptimizeArgs {
    pub(crate) fn into_config(self) -> Result<OptimizeConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        OptimizeConfig::try_from(merged)
    }
}

/// Resolved `optimize` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct OptimizeConfig {
    pub(crate) request_path: Utf8PathBuf,
    pub(crate) optimizer_url: Option<String>,
    pub(crate) optimizer_timeout: Option<Duration>,
    pub(crate) osrm_base_url: Option<String>,
    pub(crate) average_speed_kmh: f64,
}

impl TryFrom<OptimizeArgs> for OptimizeConfig {
    type Error = CliError;

    fn try_from(args: OptimizeArgs) -> Result<Self, Self::Error> {
        let request_path = args.request_path.ok_or(CliError::MissingArgument {
            field: ARG_REQUEST,
            env: ENV_OPTIMIZE_REQUEST,
        })?;
        let optimizer_timeout = match args.optimizer_timeout_ms {
            Some(0) => {
                return Err(CliError::InvalidSetting {
                    field: ARG_OPTIMIZER_TIMEOUT_MS,
                    reason: "must be greater than zero",
                });
            }
            other => other.map(Duration::from_millis),
        };
        let average_speed_kmh = args
            .average_speed_kmh
            .unwrap_or(PlannerConfig::default().average_speed_kmh);
        if !average_speed_kmh.is_finite() || average_speed_kmh <= 0.0 {
            return Err(CliError::InvalidSetting {
                field: ARG_AVERAGE_SPEED_KMH,
                reason: "must be a positive number",
            });
        }
        Ok(Self {
            request_path,
            optimizer_url: args.optimizer_url,
            optimizer_timeout,
            osrm_base_url: args.osrm_base_url,
            average_speed_kmh,
        })
    }
}

/// Builds the planner for the current `optimize` invocation.
pub(crate) trait PlannerBuilder {
    fn build(&self, config: &OptimizeConfig) -> Result<Planner, CliError>;
}

pub(crate) struct DefaultPlannerBuilder;

impl PlannerBuilder for DefaultPlannerBuilder {
    fn build(&self, config: &OptimizeConfig) -> Result<Planner, CliError> {
        let settings = PlannerConfig::default().with_average_speed_kmh(config.average_speed_kmh);
        let mut planner = Planner::new(settings);
        if let Some(base_url) = &config.osrm_base_url {
            let provider = OsrmDistanceProvider::new(base_url.as_str()).map_err(|source| {
                CliError::BuildClient {
                    base_url: base_url.clone(),
                    source,
                }
            })?;
            planner = planner.with_provider(provider);
        }
        if let Some(base_url) = &config.optimizer_url {
            let mut external = ExternalOptimizerConfig::new(base_url.as_str());
            if let Some(timeout) = config.optimizer_timeout {
                external = external.with_timeout(timeout);
            }
            let optimizer =
                ExternalOptimizer::with_config(external).map_err(|source| CliError::BuildClient {
                    base_url: base_url.clone(),
                    source,
                })?;
            planner = planner.with_external(optimizer);
        }
        Ok(planner)
    }
}

pub(crate) fn run_optimize(args: OptimizeArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_optimize_with(args, &DefaultPlannerBuilder, &mut stdout)
}

pub(crate) fn run_optimize_with(
    args: OptimizeArgs,
    builder: &dyn PlannerBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let response = execute_optimize(args, builder)?;
    write_json(writer, &response)
}

fn execute_optimize(
    args: OptimizeArgs,
    builder: &dyn PlannerBuilder,
) -> Result<OptimizeResponse, CliError> {
    let config = args.into_config()?;
    require_existing(&config.request_path, ARG_REQUEST)?;
    let request: OptimizeRequest = load_json(&config.request_path, ARG_REQUEST)?;
    let planner = builder.build(&config)?;
    info!(
        "optimising {} stops from {}",
        request.stops.len(),
        config.request_path
    );
    planner
        .plan(&request)
        .map_err(|source| CliError::Plan {
            path: config.request_path,
            source,
        })
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<OptimizeConfig, CliError> {
    let merged = OptimizeArgs::merge_from_layers(layers).map_err(CliError::from)?;
    OptimizeConfig::try_from(merged)
}
