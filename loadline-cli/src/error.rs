//! Error types emitted by the Loadline CLI.
//!
//! Keep this error type reasonably small, as many CLI helpers return
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use loadline_external::ClientBuildError;
use loadline_matching::{ChainError, MatchError};
use loadline_solver::PlanError;
use thiserror::Error;

/// Errors emitted by the Loadline CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        /// Flag name of the option.
        field: &'static str,
        /// Environment variable that can supply it.
        env: &'static str,
    },
    /// A numeric setting is out of range.
    #[error("{field} {reason}")]
    InvalidSetting {
        /// Flag name of the setting.
        field: &'static str,
        /// What is wrong with it.
        reason: &'static str,
    },
    /// A referenced input path does not exist on disk.
    #[error("{field} path {path} does not exist")]
    MissingSourceFile {
        /// Flag name of the input.
        field: &'static str,
        /// Missing path.
        path: Utf8PathBuf,
    },
    /// A referenced input path exists but is not a regular file.
    #[error("{field} path {path} is not a file")]
    SourcePathNotFile {
        /// Flag name of the input.
        field: &'static str,
        /// Offending path.
        path: Utf8PathBuf,
    },
    /// Inspecting an input path failed for a reason other than absence.
    #[error("failed to inspect {field} path {path}: {source}")]
    InspectSourcePath {
        /// Flag name of the input.
        field: &'static str,
        /// Path being inspected.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// An input file could not be opened.
    #[error("failed to open {field} file {path}: {source}")]
    OpenInput {
        /// Flag name of the input.
        field: &'static str,
        /// Path being opened.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// An input file did not hold the expected JSON document.
    #[error("failed to parse {field} file {path}: {source}")]
    ParseInput {
        /// Flag name of the input.
        field: &'static str,
        /// Path being parsed.
        path: Utf8PathBuf,
        /// Decoder error.
        #[source]
        source: serde_json::Error,
    },
    /// An HTTP collaborator could not be constructed.
    #[error("failed to configure client for {base_url}: {source}")]
    BuildClient {
        /// Service the client would talk to.
        base_url: String,
        /// Construction error.
        #[source]
        source: ClientBuildError,
    },
    /// Route optimisation rejected or failed the request.
    #[error("failed to optimise {path}: {source}")]
    Plan {
        /// Request file.
        path: Utf8PathBuf,
        /// Planner error.
        #[source]
        source: PlanError,
    },
    /// Matching settings are out of range.
    #[error("invalid matching settings: {0}")]
    InvalidMatchConfig(#[source] MatchError),
    /// A matching request failed validation.
    #[error("invalid matching request {path}: {source}")]
    InvalidMatchRequest {
        /// Request file.
        path: Utf8PathBuf,
        /// Validation error.
        #[source]
        source: MatchError,
    },
    /// Chain planning rejected the request or found nothing.
    #[error("failed to plan chains for {path}: {source}")]
    Chain {
        /// Request file.
        path: Utf8PathBuf,
        /// Planner error.
        #[source]
        source: ChainError,
    },
    /// Serialising the result failed.
    #[error("failed to serialise output: {0}")]
    SerialiseOutput(#[source] serde_json::Error),
    /// Writing the result failed.
    #[error("failed to write output: {0}")]
    WriteOutput(#[source] std::io::Error),
}
