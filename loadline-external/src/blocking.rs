//! A reqwest client paired with the runtime that drives it.

use std::future::Future;
use std::time::Duration;

use reqwest::Client;
use thiserror::Error;
use tokio::runtime::{Handle, Runtime, RuntimeFlavor};

/// Errors raised while constructing an HTTP collaborator.
#[derive(Debug, Error)]
pub enum ClientBuildError {
    /// The base URL could not be parsed or joined.
    #[error("invalid service URL `{url}`: {source}")]
    InvalidUrl {
        /// Offending URL text.
        url: String,
        /// Parser error.
        #[source]
        source: url::ParseError,
    },
    /// Failed to build the HTTP client.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
    /// Failed to build the Tokio runtime.
    #[error("failed to build Tokio runtime: {0}")]
    Runtime(#[source] std::io::Error),
}

/// HTTP client plus an owned current-thread runtime.
pub(crate) struct BlockingClient {
    client: Client,
    runtime: Runtime,
}

impl std::fmt::Debug for BlockingClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlockingClient")
            .field("client", &self.client)
            .field("runtime", &"<tokio::runtime::Runtime>")
            .finish()
    }
}

impl BlockingClient {
    /// Build a client whose connect and total timeouts are both `timeout`.
    pub(crate) fn new(timeout: Duration, user_agent: &str) -> Result<Self, ClientBuildError> {
        let client = Client::builder()
            .user_agent(user_agent)
            .connect_timeout(timeout)
            .timeout(timeout)
            .build()
            .map_err(ClientBuildError::HttpClient)?;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(ClientBuildError::Runtime)?;
        Ok(Self { client, runtime })
    }

    pub(crate) const fn client(&self) -> &Client {
        &self.client
    }

    /// Drive `future` to completion from synchronous code.
    ///
    /// Inside a multi-threaded runtime the caller's handle is used through
    /// `block_in_place`. A current-thread runtime cannot be re-entered, so
    /// there the owned runtime runs on a scoped helper thread while the
    /// caller blocks. Outside any runtime the owned runtime runs inline.
    pub(crate) fn block_on<F>(&self, future: F) -> F::Output
    where
        F: Future + Send,
        F::Output: Send,
    {
        match Handle::try_current() {
            Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
                tokio::task::block_in_place(|| handle.block_on(future))
            }
            Ok(_) => std::thread::scope(|scope| {
                match scope.spawn(|| self.runtime.block_on(future)).join() {
                    Ok(output) => output,
                    Err(payload) => std::panic::resume_unwind(payload),
                }
            }),
            Err(_) => self.runtime.block_on(future),
        }
    }
}
