use super::TradeFinder;
use crate::candidate::{TradeCandidate, TradeKind};
use crate::error::SearchError;
use crate::filter::{KeepRule, KeepRules, Proposal};
use crate::types::Roster;
use tracing::{debug, info};

impl TradeFinder<'_> {
    /// Value-improvement trades that bring back no more players than they send
    ///
    /// Runs the value-improvement pass with subsets up to `buy_low_max_players`,
    /// keeps its ranked, capped output where `receive.len() <= give.len()`, and
    /// caps that at `limits.buy_low`. Order is inherited from the improvement
    /// pass.
    pub fn buy_low_trades(
        &self,
        mine: &Roster,
        theirs: &Roster,
    ) -> Result<Vec<TradeCandidate>, SearchError> {
        let improvements = self.improvement_pass(mine, theirs, self.config.buy_low_max_players)?;
        debug!(candidates = improvements.len(), "Filtering improvement pass for buy-low shape");

        let rules = KeepRules::new(self.fairness()).with(KeepRule::NoMoreReceivedThanGiven);
        let trades: Vec<TradeCandidate> = improvements
            .into_iter()
            .filter(|trade| {
                rules.admits_without_fairness(&Proposal {
                    give_count: trade.give().len(),
                    receive_count: trade.receive().len(),
                    value: trade.value(),
                })
            })
            .take(self.config.limits.buy_low)
            .map(|trade| trade.relabeled(TradeKind::BuyLow))
            .collect();

        info!(roster_id = theirs.roster_id, found = trades.len(), "Buy-low search complete");
        Ok(trades)
    }
}
