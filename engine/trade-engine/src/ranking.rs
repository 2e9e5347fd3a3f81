use crate::candidate::{ConsolidationShape, TradeCandidate};

/// Sort by net value, highest first, and keep at most `limit`
///
/// The sort is stable: candidates with equal net value stay in generation
/// order, so sequential and parallel runs rank identically.
pub fn rank_and_truncate(mut candidates: Vec<TradeCandidate>, limit: usize) -> Vec<TradeCandidate> {
    candidates.sort_by(|a, b| b.net_value().total_cmp(&a.net_value()));
    candidates.truncate(limit);
    candidates
}

/// Consolidation candidates of one shape, order preserved
pub fn filter_shape(candidates: &[TradeCandidate], shape: ConsolidationShape) -> Vec<TradeCandidate> {
    candidates.iter().filter(|c| c.shape() == Some(shape)).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::candidate::TradeKind;
    use crate::pricer::TradeValue;
    use crate::types::PlayerId;

    fn candidate(id: &str, give: f64, receive: f64, kind: TradeKind) -> TradeCandidate {
        TradeCandidate::new(
            vec![PlayerId::from(id)],
            vec![PlayerId::from(format!("{id}-r"))],
            TradeValue { give_value: give, receive_value: receive },
            kind,
        )
    }

    #[test]
    fn test_rank_descending_and_stable() {
        let candidates = vec![
            candidate("a", 100.0, 101.0, TradeKind::ValueImprovement),
            candidate("b", 100.0, 110.0, TradeKind::ValueImprovement),
            candidate("c", 200.0, 201.0, TradeKind::ValueImprovement),
            candidate("d", 100.0, 105.0, TradeKind::ValueImprovement),
        ];
        let ranked = rank_and_truncate(candidates, 10);
        let order: Vec<&str> = ranked.iter().map(|c| c.give()[0].as_str()).collect();
        // a and c tie at +1 and keep their input order
        assert_eq!(order, vec!["b", "d", "a", "c"]);
    }

    #[test]
    fn test_truncate() {
        let candidates: Vec<_> = (0..30)
            .map(|i| candidate(&i.to_string(), 100.0, 100.0 + i as f64, TradeKind::ValueImprovement))
            .collect();
        let ranked = rank_and_truncate(candidates, 20);
        assert_eq!(ranked.len(), 20);
        assert_eq!(ranked[0].net_value(), 29.0);
        assert_eq!(ranked[19].net_value(), 10.0);
    }

    #[test]
    fn test_filter_shape() {
        let two = TradeKind::Consolidation { shape: ConsolidationShape::TwoForOne };
        let three = TradeKind::Consolidation { shape: ConsolidationShape::ThreeForTwo };
        let candidates = vec![
            candidate("a", 100.0, 110.0, two.clone()),
            candidate("b", 100.0, 105.0, three),
            candidate("c", 100.0, 101.0, two),
        ];
        let only_two = filter_shape(&candidates, ConsolidationShape::TwoForOne);
        assert_eq!(only_two.len(), 2);
        assert_eq!(only_two[0].give()[0].as_str(), "a");
        assert_eq!(only_two[1].give()[0].as_str(), "c");
    }
}
