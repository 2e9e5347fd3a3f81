use super::TradeFinder;
use crate::candidate::{TradeCandidate, TradeKind};
use crate::error::SearchError;
use crate::pricer::price;
use crate::types::{PlayerId, Roster};
use std::collections::HashSet;
use tracing::{debug, info, warn};

impl TradeFinder<'_> {
    /// Trade partners for a hand-picked give/receive selection
    ///
    /// Every counterpart roster holding all of `receive` is considered, in the
    /// order given; `mine` itself is skipped. A fair selection yields one
    /// candidate for that roster. An unfair one where I would receive more value
    /// is balanced greedily: each unused player of mine, in roster order, is
    /// tried as a single extra player and every fair result is kept. Balancing
    /// never adds more than one player.
    pub fn custom_trades(
        &self,
        give: &[PlayerId],
        receive: &[PlayerId],
        mine: &Roster,
        counterparts: &[Roster],
    ) -> Result<Vec<TradeCandidate>, SearchError> {
        let give = dedup(give);
        let receive = dedup(receive);

        if receive.is_empty() {
            debug!("No players requested, skipping custom search");
            return Ok(Vec::new());
        }
        if let Some(stray) = give.iter().find(|p| !mine.contains(p)) {
            warn!(player_id = %stray, "Requested give player is not on my roster");
            return Ok(Vec::new());
        }

        if let Some(owned) = receive.iter().find(|p| mine.contains(p)) {
            warn!(player_id = %owned, "Requested receive player is already on my roster");
            return Ok(Vec::new());
        }

        let guard = self.guard();
        let fairness = self.fairness();
        let base = price(&give, &receive, self.values);
        let mut trades = Vec::new();

        for roster in counterparts {
            guard.check()?;
            if roster.roster_id == mine.roster_id || !roster.holds_all(&receive) {
                continue;
            }

            if fairness.is_fair(base.give_value, base.receive_value) {
                trades.push(TradeCandidate::new(
                    give.clone(),
                    receive.clone(),
                    base,
                    TradeKind::Custom { roster_id: roster.roster_id, added: None },
                ));
                continue;
            }

            if base.receive_value <= base.give_value {
                debug!(roster_id = roster.roster_id, "Selection overpays, nothing to balance");
                continue;
            }

            for extra in mine.players().iter().filter(|p| !give.contains(p)) {
                let balanced: Vec<PlayerId> = give.iter().chain(Some(extra)).cloned().collect();
                let value = price(&balanced, &receive, self.values);
                if fairness.is_fair(value.give_value, value.receive_value) {
                    trades.push(TradeCandidate::new(
                        balanced,
                        receive.clone(),
                        value,
                        TradeKind::Custom { roster_id: roster.roster_id, added: Some(extra.clone()) },
                    ));
                }
            }
        }

        info!(found = trades.len(), "Custom trade search complete");
        Ok(trades)
    }
}

fn dedup(players: &[PlayerId]) -> Vec<PlayerId> {
    let mut seen = HashSet::new();
    players.iter().filter(|p| seen.insert(*p)).cloned().collect()
}

#[cfg(test)]
mod tests {
    use crate::{PlayerId, Roster, SearchConfig, TradeFinder, TradeKind, ValuationTable};

    fn ids(raw: &[&str]) -> Vec<PlayerId> {
        raw.iter().map(|&p| PlayerId::from(p)).collect()
    }

    fn setup() -> (ValuationTable, Roster, Vec<Roster>) {
        let values = ValuationTable::try_from_values(vec![
            (PlayerId::from("m1"), 100.0),
            (PlayerId::from("m2"), 40.0),
            (PlayerId::from("m3"), 10.0),
            (PlayerId::from("m4"), 45.0),
            (PlayerId::from("t1"), 150.0),
            (PlayerId::from("t2"), 105.0),
        ])
        .unwrap();
        let mine = Roster::new(1, "me", ids(&["m1", "m2", "m3", "m4"]));
        let rosters = vec![
            mine.clone(),
            Roster::new(2, "a", ids(&["t1", "x"])),
            Roster::new(3, "b", ids(&["t1", "t2"])),
            Roster::new(4, "c", ids(&["t2"])),
        ];
        (values, mine, rosters)
    }

    #[test]
    fn test_fair_selection_one_per_roster() {
        let (values, mine, rosters) = setup();
        let finder = TradeFinder::new(&values, SearchConfig::default()).unwrap();

        let trades = finder.custom_trades(&ids(&["m1"]), &ids(&["t2"]), &mine, &rosters).unwrap();
        let roster_ids: Vec<_> = trades
            .iter()
            .map(|t| match t.kind() {
                TradeKind::Custom { roster_id, added: None } => *roster_id,
                other => panic!("unexpected kind {other:?}"),
            })
            .collect();
        assert_eq!(roster_ids, vec![3, 4]);
        assert_eq!(trades[0].net_value(), 5.0);
    }

    #[test]
    fn test_balancing_adds_one_player() {
        let (values, mine, rosters) = setup();
        let finder = TradeFinder::new(&values, SearchConfig::default()).unwrap();

        // m1 (100) for t1 (150) is unfair; adding m2 (140) or m4 (145) fixes it, m3 (110) does not
        let trades = finder.custom_trades(&ids(&["m1"]), &ids(&["t1"]), &mine, &rosters).unwrap();
        assert_eq!(trades.len(), 4);

        let first = &trades[0];
        assert_eq!(first.give(), ids(&["m1", "m2"]).as_slice());
        assert_eq!(first.give_value(), 140.0);
        assert_eq!(first.kind(), &TradeKind::Custom { roster_id: 2, added: Some(PlayerId::from("m2")) });

        let added: Vec<_> = trades
            .iter()
            .map(|t| match t.kind() {
                TradeKind::Custom { roster_id, added: Some(p) } => (*roster_id, p.as_str().to_string()),
                other => panic!("unexpected kind {other:?}"),
            })
            .collect();
        assert_eq!(
            added,
            vec![
                (2, "m2".to_string()),
                (2, "m4".to_string()),
                (3, "m2".to_string()),
                (3, "m4".to_string()),
            ]
        );
    }

    #[test]
    fn test_one_extra_player_only() {
        let (values, mine, rosters) = setup();
        let finder = TradeFinder::new(&values, SearchConfig::default()).unwrap();

        // m3 (10) for t1 (150) would need several extra players
        let trades = finder.custom_trades(&ids(&["m3"]), &ids(&["t1"]), &mine, &rosters).unwrap();
        assert!(trades.is_empty());
    }

    #[test]
    fn test_overpaying_selection_is_not_balanced() {
        let (values, mine, rosters) = setup();
        let finder = TradeFinder::new(&values, SearchConfig::default()).unwrap();

        let trades = finder
            .custom_trades(&ids(&["m1", "m2", "m4"]), &ids(&["t2"]), &mine, &rosters)
            .unwrap();
        assert!(trades.is_empty());
    }

    #[test]
    fn test_no_roster_holds_everything() {
        let (values, mine, rosters) = setup();
        let finder = TradeFinder::new(&values, SearchConfig::default()).unwrap();

        let trades = finder
            .custom_trades(&ids(&["m1"]), &ids(&["t1", "x", "t2"]), &mine, &rosters)
            .unwrap();
        assert!(trades.is_empty());

        let trades = finder.custom_trades(&ids(&["m1"]), &[], &mine, &rosters).unwrap();
        assert!(trades.is_empty());
    }

    #[test]
    fn test_empty_give_is_balanced_from_scratch() {
        let (values, mine, rosters) = setup();
        let finder = TradeFinder::new(&values, SearchConfig::default()).unwrap();

        let trades = finder.custom_trades(&[], &ids(&["t2"]), &mine, &rosters).unwrap();
        // Only m1 (100) alone is within 15% of t2 (105), for rosters 3 and 4
        assert_eq!(trades.len(), 2);
        assert!(trades.iter().all(|t| t.give() == ids(&["m1"]).as_slice()));
    }

    #[test]
    fn test_give_player_off_roster() {
        let (values, mine, rosters) = setup();
        let finder = TradeFinder::new(&values, SearchConfig::default()).unwrap();

        let trades = finder.custom_trades(&ids(&["t2"]), &ids(&["t1"]), &mine, &rosters).unwrap();
        assert!(trades.is_empty());
    }

    #[test]
    fn test_receive_player_already_mine() {
        let (values, mine, mut rosters) = setup();
        rosters.push(Roster::new(5, "d", ids(&["m2", "t2"])));
        let finder = TradeFinder::new(&values, SearchConfig::default()).unwrap();

        let trades =
            finder.custom_trades(&ids(&["m1"]), &ids(&["m2", "t2"]), &mine, &rosters).unwrap();
        assert!(trades.is_empty());
    }
}
