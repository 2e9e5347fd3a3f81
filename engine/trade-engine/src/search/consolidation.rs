use super::{Shape, TradeFinder};
use crate::candidate::{ConsolidationShape, TradeCandidate, TradeKind};
use crate::error::SearchError;
use crate::filter::{KeepRule, KeepRules};
use crate::ranking::rank_and_truncate;
use crate::types::Roster;
use tracing::info;

impl TradeFinder<'_> {
    /// Fair 2-for-1 and 3-for-2 trades, turning depth into fewer better players
    ///
    /// Both shapes are generated independently, ranked together by net value and
    /// capped at `limits.consolidation`. Use
    /// [`filter_shape`](crate::ranking::filter_shape) to narrow to one shape.
    pub fn consolidation_trades(
        &self,
        mine: &Roster,
        theirs: &Roster,
    ) -> Result<Vec<TradeCandidate>, SearchError> {
        self.check_pool("my", mine)?;
        self.check_pool("their", theirs)?;

        let guard = self.guard();
        let shapes: Vec<Shape> = ConsolidationShape::ALL
            .iter()
            .map(|&shape| {
                let (give, receive) = shape.sizes();
                Shape { give, receive, kind: TradeKind::Consolidation { shape } }
            })
            .collect();
        let rules = KeepRules::new(self.fairness()).with(KeepRule::ReceivesValue);

        let trades = self.sweep(&guard, mine.players(), theirs.players(), &shapes, &rules)?;
        let trades = rank_and_truncate(trades, self.config.limits.consolidation);

        info!(roster_id = theirs.roster_id, found = trades.len(), "Consolidation search complete");
        Ok(trades)
    }
}
