use super::{Shape, TradeFinder};
use crate::candidate::{TradeCandidate, TradeKind};
use crate::error::SearchError;
use crate::filter::{KeepRule, KeepRules};
use crate::ranking::rank_and_truncate;
use crate::types::Roster;
use tracing::info;

impl TradeFinder<'_> {
    /// Fair trades where I receive more value than I give
    ///
    /// Every pair of subsets up to `max_players_per_side` on each side, ranked by
    /// net value and capped at `limits.value_improvement`.
    pub fn value_improvement_trades(
        &self,
        mine: &Roster,
        theirs: &Roster,
    ) -> Result<Vec<TradeCandidate>, SearchError> {
        let trades = self.improvement_pass(mine, theirs, self.config.max_players_per_side)?;
        info!(
            roster_id = theirs.roster_id,
            found = trades.len(),
            "Value improvement search complete"
        );
        Ok(trades)
    }

    /// Ranked and capped value-improvement pass with subsets up to `max_players`
    pub(super) fn improvement_pass(
        &self,
        mine: &Roster,
        theirs: &Roster,
        max_players: usize,
    ) -> Result<Vec<TradeCandidate>, SearchError> {
        self.check_pool("my", mine)?;
        self.check_pool("their", theirs)?;

        let guard = self.guard();
        let shapes: Vec<Shape> = (1..=max_players)
            .flat_map(|give| {
                (1..=max_players).map(move |receive| Shape {
                    give,
                    receive,
                    kind: TradeKind::ValueImprovement,
                })
            })
            .collect();
        let rules = KeepRules::new(self.fairness()).with(KeepRule::GainsValue);

        let trades = self.sweep(&guard, mine.players(), theirs.players(), &shapes, &rules)?;
        Ok(rank_and_truncate(trades, self.config.limits.value_improvement))
    }
}
