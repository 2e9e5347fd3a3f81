use crate::types::{PlayerId, ValuationTable};
use serde::{Deserialize, Serialize};

/// Totals for both sides of a proposed trade
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TradeValue {
    pub give_value: f64,
    pub receive_value: f64,
}

impl TradeValue {
    /// Value gained by the operator (negative when overpaying)
    pub fn net(&self) -> f64 {
        self.receive_value - self.give_value
    }
}

/// Price a give/receive pair; unvalued players count as 0
pub fn price<'a, G, R>(give: G, receive: R, values: &ValuationTable) -> TradeValue
where
    G: IntoIterator<Item = &'a PlayerId>,
    R: IntoIterator<Item = &'a PlayerId>,
{
    TradeValue { give_value: values.total(give), receive_value: values.total(receive) }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> ValuationTable {
        ValuationTable::try_from_values(vec![
            (PlayerId::from("a"), 1200.0),
            (PlayerId::from("b"), 800.5),
            (PlayerId::from("c"), 3000.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_price_is_additive() {
        let values = table();
        let give = [PlayerId::from("a"), PlayerId::from("b")];
        let priced = price(&give, &[], &values);
        assert_eq!(priced.give_value, 1200.0 + 800.5);
        assert_eq!(priced.receive_value, 0.0);
    }

    #[test]
    fn test_net_value() {
        let values = table();
        let give = [PlayerId::from("a"), PlayerId::from("b")];
        let receive = [PlayerId::from("c")];
        let priced = price(&give, &receive, &values);
        assert_eq!(priced.net(), 3000.0 - 2000.5);
    }

    #[test]
    fn test_unvalued_players_count_zero() {
        let values = table();
        let give = [PlayerId::from("a"), PlayerId::from("unknown")];
        let receive = [PlayerId::from("nobody")];
        let priced = price(&give, &receive, &values);
        assert_eq!(priced.give_value, 1200.0);
        assert_eq!(priced.receive_value, 0.0);
    }
}
