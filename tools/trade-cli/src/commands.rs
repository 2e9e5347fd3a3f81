//! Command handling against a loaded league

use crate::cli::{Cli, Commands, FormatArg};
use crate::render::{render_players, CheckReport, ReportEntry, TradeReport};
use anyhow::{anyhow, bail, Context, Result};
use league_data::{FantasyCalcClient, LeagueDataConfig, LeagueFormat, LeagueSnapshot, SleeperClient};
use player_registry::PlayerDirectory;
use std::path::Path;
use tracing::{info, warn};
use trade_engine::{
    filter_shape, CancelToken, ConsolidationShape, PlayerId, Roster, SearchConfig, SearchError,
    TradeCandidate, TradeFinder, TradeKind, ValuationTable,
};

/// Everything a search command needs, loaded once per run
pub struct CliHandler {
    snapshot: LeagueSnapshot,
    values: ValuationTable,
    directory: PlayerDirectory,
    config: SearchConfig,
    cancel: CancelToken,
    json: bool,
}

/// Search settings from `--config` or the environment, then CLI overrides
pub fn search_config(cli: &Cli) -> Result<SearchConfig> {
    let mut config = match &cli.config {
        Some(path) => SearchConfig::from_file(path)
            .with_context(|| format!("Failed to load search config from {}", path.display()))?,
        None => SearchConfig::from_env()?,
    };
    if let Some(threshold) = cli.threshold {
        config.fairness_threshold = threshold;
    }
    if cli.parallel {
        config.parallel = true;
    }
    config.validate()?;
    Ok(config)
}

/// League format from the preset, the league's settings and CLI overrides
fn league_format(cli: &Cli, inferred: Option<LeagueFormat>) -> LeagueFormat {
    let preset = match cli.format {
        FormatArg::Dynasty => LeagueFormat::dynasty(),
        FormatArg::Redraft => LeagueFormat::redraft(),
    };
    let mut format = match inferred {
        Some(inferred) => LeagueFormat { dynasty: preset.dynasty, ..inferred },
        None => preset,
    };
    if let Some(num_qbs) = cli.num_qbs {
        format.num_qbs = num_qbs;
    }
    if let Some(num_teams) = cli.num_teams {
        format.num_teams = num_teams;
    }
    if let Some(ppr) = cli.ppr {
        format.ppr = ppr;
    }
    format
}

async fn load_directory(sleeper: &SleeperClient, players_file: Option<&Path>) -> Result<PlayerDirectory> {
    if let Some(path) = players_file.filter(|p| p.exists()) {
        return Ok(PlayerDirectory::load_from_file(path).await?);
    }

    let players = sleeper.get_players().await?;
    if let Some(path) = players_file {
        if let Err(e) = PlayerDirectory::save_to_file(&players, path).await {
            warn!("Could not cache player data: {}", e);
        }
    }
    Ok(PlayerDirectory::from_sleeper(&players))
}

impl CliHandler {
    /// Fetch league, values and player metadata
    pub async fn load(cli: &Cli, config: SearchConfig, cancel: CancelToken) -> Result<Self> {
        if cli.username.is_empty() || cli.league_id.is_empty() {
            bail!("--username and --league-id (or SLEEPER_USERNAME / SLEEPER_LEAGUE_ID) are required");
        }

        let data_config = LeagueDataConfig::from_env()?;
        let sleeper = SleeperClient::new(&data_config)?;
        let fantasycalc = FantasyCalcClient::new(&data_config)?;

        // Inference needs the league up front; the snapshot reuses it
        let league = if cli.infer_format {
            Some(
                sleeper
                    .get_league(&cli.league_id)
                    .await
                    .context("Could not load league data. Please check your League ID.")?,
            )
        } else {
            None
        };
        let format = league_format(cli, league.as_ref().map(LeagueFormat::infer_from));
        info!("Using {} values ({})", format.label(), format.query());

        let (snapshot, values, directory) = tokio::try_join!(
            async {
                let snapshot = match league {
                    Some(league) => LeagueSnapshot::load_for_league(&sleeper, &cli.username, league).await,
                    None => LeagueSnapshot::load(&sleeper, &cli.username, &cli.league_id).await,
                };
                snapshot.context("Could not load league data. Please check your League ID.")
            },
            async { fantasycalc.get_values(&format).await.context("Could not load player values") },
            load_directory(&sleeper, cli.players_file.as_deref()),
        )?;

        eprintln!(
            "Loaded {} ({}) | Your Team: {} | Roster Size: {} players",
            snapshot.league_name,
            format.label(),
            snapshot.owner_name(snapshot.my_roster_id()),
            snapshot.my_roster().len()
        );

        Ok(Self { snapshot, values, directory, config, cancel, json: cli.json })
    }

    /// Handle CLI commands
    pub fn handle_command(&self, command: Commands) -> Result<()> {
        match command {
            Commands::Target { player } => self.target(&player),
            Commands::Improve { opponent } => self.improve(&opponent),
            Commands::Consolidate { opponent, shape } => {
                self.consolidate(&opponent, shape.map(ConsolidationShape::from))
            }
            Commands::BuyLow { opponent } => self.buy_low(&opponent),
            Commands::Custom { give, receive } => self.custom(&give, &receive),
            Commands::Check { give, receive } => self.check(&give, &receive),
            Commands::Players { query, limit } => self.players(query.as_deref(), limit),
            Commands::InitConfig { .. } => Err(anyhow!("init-config does not need a league")),
        }
    }

    fn finder(&self) -> Result<TradeFinder<'_>> {
        Ok(TradeFinder::new(&self.values, self.config.clone())?.with_cancel_token(self.cancel.clone()))
    }

    fn opponent(&self, name: &str) -> Result<&Roster> {
        let roster = self
            .snapshot
            .roster_by_owner_name(name)
            .ok_or_else(|| anyhow!("No team owned by '{}' in {}", name, self.snapshot.league_name))?;
        if roster.roster_id == self.snapshot.my_roster_id() {
            bail!("'{}' is your own team", name);
        }
        Ok(roster)
    }

    fn resolve_player(&self, query: &str) -> Result<PlayerId> {
        match self.directory.resolve(query) {
            Ok(id) => Ok(id),
            // IDs missing from the player dump can still be on rosters
            Err(e) => {
                let raw = PlayerId::from(query.trim());
                if self.snapshot.roster_holding(&raw).is_some() {
                    Ok(raw)
                } else {
                    Err(e.into())
                }
            }
        }
    }

    fn resolve_all(&self, queries: &[String]) -> Result<Vec<PlayerId>> {
        queries.iter().filter(|q| !q.trim().is_empty()).map(|q| self.resolve_player(q)).collect()
    }

    fn target(&self, player: &str) -> Result<()> {
        let target = self.resolve_player(player)?;
        let name = self.directory.display_name(&target);
        let holder = self
            .snapshot
            .roster_holding(&target)
            .ok_or_else(|| anyhow!("{} is not on any roster in this league", name))?;
        if holder.roster_id == self.snapshot.my_roster_id() {
            bail!("{} is already on your roster", name);
        }

        let mut trades = self.finder()?.target_trades(&target, self.snapshot.my_roster(), holder)?;
        trades.truncate(self.config.limits.target_display);

        self.emit(TradeReport {
            heading: format!("Target: {}", name),
            found_label: "possible trades!",
            empty_notice: "No fair trades found for this player.",
            entries: self.entries(&trades, holder),
        })
    }

    fn improve(&self, opponent: &str) -> Result<()> {
        let theirs = self.opponent(opponent)?;
        let trades = self.finder()?.value_improvement_trades(self.snapshot.my_roster(), theirs)?;
        self.emit(TradeReport {
            heading: format!("Value Improvement Trades with {}", self.partner_name(theirs)),
            found_label: "trades that improve your value!",
            empty_notice: "No value-improving trades found with this team.",
            entries: self.entries(&trades, theirs),
        })
    }

    fn consolidate(&self, opponent: &str, shape: Option<ConsolidationShape>) -> Result<()> {
        let theirs = self.opponent(opponent)?;
        let mut trades = self.finder()?.consolidation_trades(self.snapshot.my_roster(), theirs)?;
        if let Some(shape) = shape {
            trades = filter_shape(&trades, shape);
        }
        let heading = match shape {
            Some(shape) => format!("{} Consolidation Trades with {}", shape, self.partner_name(theirs)),
            None => format!("Consolidation Trades with {}", self.partner_name(theirs)),
        };
        self.emit(TradeReport {
            heading,
            found_label: "consolidation trades!",
            empty_notice: "No consolidation trades found with this team.",
            entries: self.entries(&trades, theirs),
        })
    }

    fn buy_low(&self, opponent: &str) -> Result<()> {
        let theirs = self.opponent(opponent)?;
        let trades = self.finder()?.buy_low_trades(self.snapshot.my_roster(), theirs)?;
        self.emit(TradeReport {
            heading: format!("Buy Low Opportunities with {}", self.partner_name(theirs)),
            found_label: "buy low opportunities!",
            empty_notice: "No buy low trades found with this team.",
            entries: self.entries(&trades, theirs),
        })
    }

    fn custom(&self, give: &[String], receive: &[String]) -> Result<()> {
        let give = self.resolve_all(give)?;
        let receive = self.resolve_all(receive)?;
        if receive.is_empty() {
            bail!("Select players you want to receive first!");
        }
        let mine = self.snapshot.my_roster();
        if let Some(stray) = give.iter().find(|p| !mine.contains(p)) {
            bail!("{} is not on your roster", self.directory.display_name(stray));
        }

        let trades = self.finder()?.custom_trades(&give, &receive, mine, self.snapshot.rosters())?;
        let entries = trades
            .iter()
            .map(|trade| {
                let partner = match trade.kind() {
                    TradeKind::Custom { roster_id, .. } => self.snapshot.owner_name(*roster_id),
                    _ => "Unknown",
                };
                ReportEntry {
                    trade: self.directory.label(trade, &self.values),
                    partner: partner.to_string(),
                }
            })
            .collect();

        self.emit(TradeReport {
            heading: "Custom Trade Builder".to_string(),
            found_label: "possible trade partner(s)!",
            empty_notice: "No teams have all the players you want, or no fair trades possible.",
            entries,
        })
    }

    fn check(&self, give: &[String], receive: &[String]) -> Result<()> {
        let give = self.resolve_all(give)?;
        let receive = self.resolve_all(receive)?;
        let finder = self.finder()?;

        let report = CheckReport {
            give: give.iter().map(|id| self.directory.describe(id, &self.values)).collect(),
            receive: receive.iter().map(|id| self.directory.describe(id, &self.values)).collect(),
            assessment: finder.assess(&give, &receive),
            threshold: finder.config().fairness_threshold,
        };

        if self.json {
            println!("{}", report.render_json()?);
        } else {
            print!("{}", report.render_text());
        }
        Ok(())
    }

    fn players(&self, query: Option<&str>, limit: usize) -> Result<()> {
        let query = query.map(str::to_lowercase);
        let listed: Vec<_> = self
            .directory
            .tradeable_players(self.snapshot.other_rosters(), &self.values)
            .into_iter()
            .filter(|p| query.as_ref().map_or(true, |q| p.name.to_lowercase().contains(q.as_str())))
            .take(limit)
            .map(|p| {
                let owner = self
                    .snapshot
                    .roster_holding(&p.player_id)
                    .map(|r| self.snapshot.owner_name(r.roster_id))
                    .unwrap_or("Unknown")
                    .to_string();
                (p, owner)
            })
            .collect();

        if self.json {
            let views: Vec<_> = listed.iter().map(|(p, _)| p).collect();
            println!("{}", serde_json::to_string_pretty(&views)?);
        } else if listed.is_empty() {
            println!("No players found.");
        } else {
            print!("{}", render_players(&listed));
        }
        Ok(())
    }

    fn partner_name(&self, roster: &Roster) -> &str {
        self.snapshot.owner_name(roster.roster_id)
    }

    fn entries(&self, trades: &[TradeCandidate], partner: &Roster) -> Vec<ReportEntry> {
        trades
            .iter()
            .map(|trade| ReportEntry {
                trade: self.directory.label(trade, &self.values),
                partner: self.partner_name(partner).to_string(),
            })
            .collect()
    }

    fn emit(&self, report: TradeReport) -> Result<()> {
        if self.json {
            println!("{}", report.render_json()?);
        } else {
            print!("{}", report.render_text());
        }
        Ok(())
    }
}

/// Map search failures to user-facing messages
pub fn describe_search_error(error: &anyhow::Error) -> Option<String> {
    match error.downcast_ref::<SearchError>()? {
        SearchError::Cancelled => Some("Search cancelled.".to_string()),
        SearchError::DeadlineExceeded { limit_ms } => {
            Some(format!("Search stopped after {limit_ms} ms; raise TRADE_DEADLINE_MS or deadline_ms."))
        }
        other => Some(other.to_string()),
    }
}
