//! Keep-rule pipeline
//!
//! Every strategy filters through the same [`FairnessRule`] first, then through
//! its own ordered list of [`KeepRule`]s. A new strategy composes rules instead
//! of writing another enumeration loop.

use crate::fairness::FairnessRule;
use crate::pricer::TradeValue;
use serde::{Deserialize, Serialize};

/// A priced give/receive pair awaiting the keep rules
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Proposal {
    pub give_count: usize,
    pub receive_count: usize,
    pub value: TradeValue,
}

/// Strategy-specific condition applied after the fairness check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeepRule {
    /// receive_value > give_value
    GainsValue,
    /// receive_value > 0
    ReceivesValue,
    /// At most as many players received as given
    NoMoreReceivedThanGiven,
}

impl KeepRule {
    pub fn admits(&self, proposal: &Proposal) -> bool {
        match self {
            KeepRule::GainsValue => proposal.value.receive_value > proposal.value.give_value,
            KeepRule::ReceivesValue => proposal.value.receive_value > 0.0,
            KeepRule::NoMoreReceivedThanGiven => proposal.receive_count <= proposal.give_count,
        }
    }
}

/// Fairness plus an ordered list of keep rules
#[derive(Debug, Clone, PartialEq)]
pub struct KeepRules {
    fairness: FairnessRule,
    rules: Vec<KeepRule>,
}

impl KeepRules {
    pub fn new(fairness: FairnessRule) -> Self {
        Self { fairness, rules: Vec::new() }
    }

    pub fn with(mut self, rule: KeepRule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn fairness(&self) -> &FairnessRule {
        &self.fairness
    }

    pub fn rules(&self) -> &[KeepRule] {
        &self.rules
    }

    /// True when the proposal is fair and every rule admits it
    pub fn admits(&self, proposal: &Proposal) -> bool {
        self.fairness.is_fair(proposal.value.give_value, proposal.value.receive_value)
            && self.rules.iter().all(|rule| rule.admits(proposal))
    }

    /// Rules only, for candidates already known to be fair
    pub fn admits_without_fairness(&self, proposal: &Proposal) -> bool {
        self.rules.iter().all(|rule| rule.admits(proposal))
    }
}
