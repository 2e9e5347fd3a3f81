use crate::pricer::TradeValue;
use crate::types::{PlayerId, RosterId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Player-count shape of a consolidation trade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConsolidationShape {
    /// Give 2, receive 1
    TwoForOne,
    /// Give 3, receive 2
    ThreeForTwo,
}

impl ConsolidationShape {
    pub const ALL: [ConsolidationShape; 2] =
        [ConsolidationShape::TwoForOne, ConsolidationShape::ThreeForTwo];

    /// (give, receive) player counts
    pub fn sizes(&self) -> (usize, usize) {
        match self {
            ConsolidationShape::TwoForOne => (2, 1),
            ConsolidationShape::ThreeForTwo => (3, 2),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ConsolidationShape::TwoForOne => "2-for-1",
            ConsolidationShape::ThreeForTwo => "3-for-2",
        }
    }
}

impl fmt::Display for ConsolidationShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Which search produced a candidate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TradeKind {
    /// Acquire one specific player
    Target { target: PlayerId },
    /// Gain value while staying fair
    ValueImprovement,
    /// Give more players than received
    Consolidation { shape: ConsolidationShape },
    /// Value improvement receiving no more players than given
    BuyLow,
    /// Operator-picked players, optionally balanced with one extra player
    Custom { roster_id: RosterId, added: Option<PlayerId> },
}

impl TradeKind {
    pub fn label(&self) -> &'static str {
        match self {
            TradeKind::Target { .. } => "target",
            TradeKind::ValueImprovement => "value-improvement",
            TradeKind::Consolidation { .. } => "consolidation",
            TradeKind::BuyLow => "buy-low",
            TradeKind::Custom { .. } => "custom",
        }
    }
}

/// One proposed trade
///
/// Built once a give/receive pair passes its strategy's filters and never
/// changed afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeCandidate {
    give: Vec<PlayerId>,
    receive: Vec<PlayerId>,
    give_value: f64,
    receive_value: f64,
    net_value: f64,
    kind: TradeKind,
}

impl TradeCandidate {
    pub fn new(give: Vec<PlayerId>, receive: Vec<PlayerId>, value: TradeValue, kind: TradeKind) -> Self {
        Self {
            give,
            receive,
            give_value: value.give_value,
            receive_value: value.receive_value,
            net_value: value.net(),
            kind,
        }
    }

    /// Same trade under a different strategy tag
    pub fn relabeled(self, kind: TradeKind) -> Self {
        Self { kind, ..self }
    }

    /// Players the operator gives up, in roster order
    pub fn give(&self) -> &[PlayerId] {
        &self.give
    }

    /// Players the operator receives, in roster order
    pub fn receive(&self) -> &[PlayerId] {
        &self.receive
    }

    pub fn give_value(&self) -> f64 {
        self.give_value
    }

    pub fn receive_value(&self) -> f64 {
        self.receive_value
    }

    /// receive_value - give_value
    pub fn net_value(&self) -> f64 {
        self.net_value
    }

    pub fn kind(&self) -> &TradeKind {
        &self.kind
    }

    pub fn value(&self) -> TradeValue {
        TradeValue { give_value: self.give_value, receive_value: self.receive_value }
    }

    /// Consolidation shape, if this is a consolidation trade
    pub fn shape(&self) -> Option<ConsolidationShape> {
        match self.kind {
            TradeKind::Consolidation { shape } => Some(shape),
            _ => None,
        }
    }
}
