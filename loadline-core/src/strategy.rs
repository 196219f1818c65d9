//! Ordered fallback across routing strategies.
//!
//! A [`FallbackChain`] holds solvers from most to least preferred. It asks
//! each in turn and returns the first result. An
//! [`ExternalUnavailable`](SolveError::ExternalUnavailable) failure moves on
//! to the next solver; any other error ends the chain.

use log::{debug, warn};

use crate::{RouteSolver, RoutingProblem, SolveError, SolveResult};

/// What a [`FallbackChain`] does when a strategy reports cancellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CancellationPolicy {
    /// Skip to the next strategy and return its result.
    #[default]
    Fallback,
    /// Return [`SolveError::Cancelled`] to the caller immediately.
    Propagate,
}

/// Strategies tried in order until one succeeds.
///
/// # Examples
/// ```
/// use loadline_core::{CancellationPolicy, FallbackChain};
///
/// let chain = FallbackChain::new().with_policy(CancellationPolicy::Propagate);
/// assert!(chain.is_empty());
/// assert_eq!(chain.policy(), CancellationPolicy::Propagate);
/// ```
#[derive(Default)]
pub struct FallbackChain {
    strategies: Vec<Box<dyn RouteSolver>>,
    policy: CancellationPolicy,
}

impl FallbackChain {
    /// Create an empty chain with the default cancellation policy.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a strategy after those already present.
    #[must_use]
    pub fn with_strategy(mut self, strategy: impl RouteSolver + 'static) -> Self {
        self.push(Box::new(strategy));
        self
    }

    /// Append a boxed strategy.
    pub fn push(&mut self, strategy: Box<dyn RouteSolver>) {
        self.strategies.push(strategy);
    }

    /// Set how cancellation is handled.
    #[must_use]
    pub const fn with_policy(mut self, policy: CancellationPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Current cancellation policy.
    #[must_use]
    pub const fn policy(&self) -> CancellationPolicy {
        self.policy
    }

    /// Number of strategies.
    #[must_use]
    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    /// Return `true` when no strategy is configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }

    /// Run strategies in order and return the first success.
    ///
    /// # Errors
    /// Returns the error of the last strategy tried when every strategy
    /// falls through, [`SolveError::Cancelled`] under
    /// [`CancellationPolicy::Propagate`], any error other than
    /// unavailability or cancellation immediately, and
    /// [`SolveError::InvalidProblem`] for an empty chain.
    pub fn solve(&self, problem: &RoutingProblem) -> Result<SolveResult, SolveError> {
        let mut last_error = SolveError::invalid("no routing strategy configured");
        for strategy in &self.strategies {
            let kind = strategy.kind();
            debug!("trying {kind} strategy");
            match strategy.solve(problem) {
                Ok(result) => return Ok(result),
                Err(err @ SolveError::ExternalUnavailable { .. }) => {
                    warn!("{kind} strategy failed, falling back: {err}");
                    last_error = err;
                }
                Err(SolveError::Cancelled) => match self.policy {
                    CancellationPolicy::Fallback => {
                        warn!("{kind} strategy cancelled, falling back");
                        last_error = SolveError::Cancelled;
                    }
                    CancellationPolicy::Propagate => return Err(SolveError::Cancelled),
                },
                Err(err) => return Err(err),
            }
        }
        Err(last_error)
    }
}

impl std::fmt::Debug for FallbackChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kinds: Vec<_> = self.strategies.iter().map(|s| s.kind()).collect();
        f.debug_struct("FallbackChain")
            .field("strategies", &kinds)
            .field("policy", &self.policy)
            .finish()
    }
}
