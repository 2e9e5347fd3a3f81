//! Text and JSON output

use anyhow::Result;
use colored::*;
use player_registry::{LabeledTrade, PlayerView};
use serde::Serialize;
use std::fmt::Write;
use trade_engine::{Assessment, TradeKind};

/// One trade plus the team on the other side
#[derive(Debug, Clone, Serialize)]
pub struct ReportEntry {
    #[serde(flatten)]
    pub trade: LabeledTrade,
    pub partner: String,
}

/// Output of one search command
#[derive(Debug, Clone)]
pub struct TradeReport {
    pub heading: String,
    /// "Found N {found_label}"
    pub found_label: &'static str,
    /// Printed instead of trades when nothing was found
    pub empty_notice: &'static str,
    pub entries: Vec<ReportEntry>,
}

impl TradeReport {
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", self.heading.bold());
        let _ = writeln!(out, "{}", "=".repeat(50));

        if self.entries.is_empty() {
            let _ = writeln!(out, "{}", self.empty_notice.yellow());
            return out;
        }

        let _ = writeln!(out, "{}", format!("Found {} {}", self.entries.len(), self.found_label).green());
        for (i, entry) in self.entries.iter().enumerate() {
            out.push('\n');
            out.push_str(&render_entry(i + 1, entry));
        }
        out
    }

    pub fn render_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.entries)?)
    }
}

fn render_entry(number: usize, entry: &ReportEntry) -> String {
    let trade = &entry.trade;
    let title = match &trade.kind {
        TradeKind::Custom { added: Some(_), .. } => format!("Trade with {} (Balanced)", entry.partner),
        TradeKind::Custom { added: None, .. } => format!("Trade with {}", entry.partner),
        _ => format!("Trade Option {} with {} (Net: {:+.0})", number, entry.partner, trade.net_value),
    };

    let mut out = String::new();
    let _ = writeln!(out, "{}", title.cyan().bold());
    push_side(&mut out, "You Give", &trade.give, trade.give_value);
    push_side(&mut out, "You Receive", &trade.receive, trade.receive_value);
    let _ = writeln!(out, "  Net Value: {}", colored_net(trade.net_value));
    out
}

fn push_side(out: &mut String, label: &str, players: &[PlayerView], total: f64) {
    let _ = writeln!(out, "  {}:", label.bold());
    for player in players {
        let _ = writeln!(out, "    - {} [{:.0}]", player.headline(), player.value);
    }
    let _ = writeln!(out, "    Total Value: {:.0}", total);
}

fn colored_net(net: f64) -> ColoredString {
    let text = format!("{net:+.0}");
    if net > 0.0 {
        text.green()
    } else if net < 0.0 {
        text.red()
    } else {
        text.normal()
    }
}

/// Result of `check`
#[derive(Debug, Clone, Serialize)]
pub struct CheckReport {
    pub give: Vec<PlayerView>,
    pub receive: Vec<PlayerView>,
    pub assessment: Assessment,
    pub threshold: f64,
}

impl CheckReport {
    pub fn render_text(&self) -> String {
        let value = self.assessment.value;
        let mut out = String::new();
        let _ = writeln!(out, "{}", "Trade Check".bold());
        let _ = writeln!(out, "{}", "=".repeat(50));
        push_side(&mut out, "You Give", &self.give, value.give_value);
        push_side(&mut out, "You Receive", &self.receive, value.receive_value);
        let _ = writeln!(out, "  Net Value: {}", colored_net(value.net()));

        let percent = (self.threshold * 100.0).round();
        match self.assessment.ratio {
            None => {
                let _ = writeln!(out, "{}", "One side has no value; pick players on both sides.".yellow());
            }
            Some(_) if self.assessment.fair => {
                let _ = writeln!(out, "{}", "This trade is within fair range!".green());
            }
            Some(_) => {
                let _ = writeln!(
                    out,
                    "{}",
                    format!("This trade is outside the {percent}% fair range. Consider adjusting.").yellow()
                );
            }
        }
        out
    }

    pub fn render_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// `players` listing, one line per player
pub fn render_players(players: &[(PlayerView, String)]) -> String {
    let mut out = String::new();
    for (i, (player, owner)) in players.iter().enumerate() {
        let _ = writeln!(
            out,
            "{:>3}. {} - Value: {:.0} - Owner: {}",
            i + 1,
            player.headline(),
            player.value,
            owner
        );
    }
    out
}
