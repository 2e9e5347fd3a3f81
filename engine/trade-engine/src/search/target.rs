use super::{Shape, TradeFinder};
use crate::candidate::{TradeCandidate, TradeKind};
use crate::error::SearchError;
use crate::filter::KeepRules;
use crate::types::{PlayerId, Roster};
use tracing::{debug, info};

impl TradeFinder<'_> {
    /// Fair packages of my players for one player on their roster
    ///
    /// Tries every subset of my roster up to `max_players_per_side` against the
    /// target alone. Results keep generation order and are not capped; callers
    /// show the first `limits.target_display`. A target that is not on `theirs`
    /// or has no value yields nothing.
    pub fn target_trades(
        &self,
        target: &PlayerId,
        mine: &Roster,
        theirs: &Roster,
    ) -> Result<Vec<TradeCandidate>, SearchError> {
        if !theirs.contains(target) {
            debug!(%target, roster_id = theirs.roster_id, "Target not on counterpart roster");
            return Ok(Vec::new());
        }
        if self.values.value_of(target) <= 0.0 {
            debug!(%target, "Target has no value");
            return Ok(Vec::new());
        }
        self.check_pool("my", mine)?;

        let guard = self.guard();
        let kind = TradeKind::Target { target: target.clone() };
        let shapes: Vec<Shape> = (1..=self.config.max_players_per_side)
            .map(|give| Shape { give, receive: 1, kind: kind.clone() })
            .collect();
        let rules = KeepRules::new(self.fairness());

        let trades =
            self.sweep(&guard, mine.players(), std::slice::from_ref(target), &shapes, &rules)?;

        info!(%target, found = trades.len(), "Target search complete");
        Ok(trades)
    }
}
