//! Search strategies
//!
//! [`TradeFinder`] holds the read-only inputs shared by every strategy: the
//! valuation table, the search configuration and an optional cancellation
//! token. Each strategy lives in its own module and returns candidates that are
//! already ranked and capped.

mod buy_low;
mod consolidation;
mod custom;
mod improvement;
mod target;

use crate::candidate::{TradeCandidate, TradeKind};
use crate::combinations::Combinations;
use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::fairness::FairnessRule;
use crate::filter::{KeepRules, Proposal};
use crate::pricer::{price, TradeValue};
use crate::types::{PlayerId, Roster, ValuationTable};
use rayon::prelude::*;
use serde::Serialize;
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

/// Shared flag for stopping a running search from another thread
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Deadline and cancellation state for one search call
#[derive(Debug)]
struct SearchGuard {
    started: Instant,
    deadline: Option<Duration>,
    cancel: Option<CancelToken>,
}

impl SearchGuard {
    fn check(&self) -> Result<(), SearchError> {
        if self.cancel.as_ref().is_some_and(CancelToken::is_cancelled) {
            return Err(SearchError::Cancelled);
        }
        if let Some(deadline) = self.deadline {
            if self.started.elapsed() > deadline {
                return Err(SearchError::DeadlineExceeded { limit_ms: deadline.as_millis() as u64 });
            }
        }
        Ok(())
    }
}

/// One (give size, receive size) pass of an enumerating search
#[derive(Debug, Clone)]
struct Shape {
    give: usize,
    receive: usize,
    kind: TradeKind,
}

/// Fairness verdict for an arbitrary give/receive selection
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Assessment {
    pub value: TradeValue,
    /// Larger side over smaller side, `None` if either side is worthless
    pub ratio: Option<f64>,
    pub fair: bool,
}

/// Entry point for every trade search
pub struct TradeFinder<'a> {
    values: &'a ValuationTable,
    config: SearchConfig,
    cancel: Option<CancelToken>,
}

impl<'a> TradeFinder<'a> {
    /// Create a finder over a valuation snapshot
    pub fn new(values: &'a ValuationTable, config: SearchConfig) -> Result<Self, SearchError> {
        config.validate()?;
        Ok(Self { values, config, cancel: None })
    }

    /// Stop searches when `token` is cancelled
    pub fn with_cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn values(&self) -> &ValuationTable {
        self.values
    }

    pub fn fairness(&self) -> FairnessRule {
        FairnessRule::new(self.config.fairness_threshold)
    }

    /// Price a selection and judge it, without searching
    pub fn assess(&self, give: &[PlayerId], receive: &[PlayerId]) -> Assessment {
        let value = price(give, receive, self.values);
        Assessment {
            value,
            ratio: FairnessRule::ratio(value.give_value, value.receive_value),
            fair: self.fairness().is_fair(value.give_value, value.receive_value),
        }
    }

    fn guard(&self) -> SearchGuard {
        SearchGuard {
            started: Instant::now(),
            deadline: self.config.deadline(),
            cancel: self.cancel.clone(),
        }
    }

    fn check_pool(&self, side: &'static str, roster: &Roster) -> Result<(), SearchError> {
        if roster.len() > self.config.max_pool_size {
            return Err(SearchError::PoolTooLarge {
                side,
                size: roster.len(),
                limit: self.config.max_pool_size,
            });
        }
        Ok(())
    }

    /// Enumerate every shape, price each pair and keep what the rules admit
    ///
    /// Output follows generation order: shape, then give subset, then receive
    /// subset. The parallel path collects in the same order.
    fn sweep(
        &self,
        guard: &SearchGuard,
        mine: &[PlayerId],
        theirs: &[PlayerId],
        shapes: &[Shape],
        rules: &KeepRules,
    ) -> Result<Vec<TradeCandidate>, SearchError> {
        // Both sides of a trade are disjoint; a player I hold is never received
        let owned: HashSet<&PlayerId> = mine.iter().collect();
        let theirs: Vec<PlayerId> = theirs.iter().filter(|p| !owned.contains(p)).cloned().collect();
        let theirs = theirs.as_slice();

        let units: Vec<(&Shape, Vec<&PlayerId>)> = shapes
            .iter()
            .flat_map(|shape| Combinations::new(mine, shape.give).map(move |give| (shape, give)))
            .collect();

        debug!(
            units = units.len(),
            mine = mine.len(),
            theirs = theirs.len(),
            parallel = self.config.parallel,
            "Sweeping give subsets"
        );

        let evaluate = |(shape, give): &(&Shape, Vec<&PlayerId>)| {
            guard.check()?;
            let mut kept = Vec::new();
            for receive in Combinations::new(theirs, shape.receive) {
                let value = price(give.iter().copied(), receive.iter().copied(), self.values);
                let proposal =
                    Proposal { give_count: give.len(), receive_count: receive.len(), value };
                if rules.admits(&proposal) {
                    kept.push(TradeCandidate::new(
                        give.iter().map(|&p| p.clone()).collect(),
                        receive.into_iter().cloned().collect(),
                        value,
                        shape.kind.clone(),
                    ));
                }
            }
            Ok::<_, SearchError>(kept)
        };

        let batches: Vec<Vec<TradeCandidate>> = if self.config.parallel {
            units.par_iter().map(evaluate).collect::<Result<_, _>>()?
        } else {
            units.iter().map(evaluate).collect::<Result<_, _>>()?
        };

        Ok(batches.into_iter().flatten().collect())
    }
}
