use std::collections::HashMap;

use common::{HeroAggregate, PlayerAggregate, TeamAggregate};
use serde_json::{Map, Value};

use crate::coerce::{bool_field, long_field, text_field};
use crate::{objectives, stats};

/// Bucket for every player without a known pro name
pub const UNKNOWN_PLAYER: &str = "Unknown";

/// Aggregates computed over the matches of one team
#[derive(Debug, Clone, PartialEq)]
pub struct TeamAnalysis {
    pub aggregates: TeamAggregate,
    pub players: Vec<PlayerAggregate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Radiant,
    Dire,
}

impl Side {
    fn is_radiant(self) -> bool {
        matches!(self, Side::Radiant)
    }

    fn won(self, did_radiant_win: bool) -> bool {
        self.is_radiant() == did_radiant_win
    }
}

/// Analyzes a raw `{"data": {"team": ...}}` document for a single tournament.
///
/// The team's `matches` are replaced by the ones played in `tournament_id`, every
/// tower death in them gets an `npcName` and the team gains `aggregates` and
/// `playerAggregates`. Everything else in the document is left as is.
///
/// Missing structure is not an error:
/// * no `data` object: `{"data": {}}` is returned
/// * no `team` object: the document is returned unchanged
/// * no `matches` array: `matches` is set to `[]` and nothing else is added
pub fn analyze(mut doc: Value, tournament_id: i64) -> Value {
    match doc.get_mut("data") {
        Some(Value::Object(data)) => {
            if let Some(Value::Object(team)) = data.get_mut("team") {
                analyze_team(team, tournament_id);
            }
        }
        _ => return serde_json::json!({ "data": {} }),
    };

    doc
}

fn analyze_team(team: &mut Map<String, Value>, tournament_id: i64) {
    let team_id = team.get("id").and_then(crate::coerce::to_long);

    let matches = match team.get_mut("matches").map(Value::take) {
        Some(Value::Array(matches)) => matches,
        _ => {
            team.insert("matches".to_owned(), Value::Array(Vec::new()));
            return;
        }
    };

    let total = matches.len();
    let mut matches: Vec<Value> = matches
        .into_iter()
        .filter(|m| in_tournament(m, tournament_id))
        .collect();
    tracing::debug!(
        ?team_id,
        tournament_id,
        "Kept {} of {} matches",
        matches.len(),
        total
    );

    for m in matches.iter_mut() {
        label_tower_deaths(m);
    }

    let analysis = aggregate(team_id, &matches);

    team.insert("matches".to_owned(), Value::Array(matches));
    // plain structs of numbers and strings, serializing them can't fail
    team.insert(
        "aggregates".to_owned(),
        serde_json::to_value(analysis.aggregates).unwrap_or_default(),
    );
    team.insert(
        "playerAggregates".to_owned(),
        serde_json::to_value(analysis.players).unwrap_or_default(),
    );
}

fn in_tournament(m: &Value, tournament_id: i64) -> bool {
    m.get("league").and_then(|league| long_field(league, "id")) == Some(tournament_id)
}

fn label_tower_deaths(m: &mut Value) {
    let events = match m.get_mut("towerDeaths") {
        Some(Value::Array(events)) => events,
        _ => return,
    };

    for event in events.iter_mut() {
        let npc_id = match long_field(event, "npcId") {
            Some(id) => id,
            None => continue,
        };

        if let Value::Object(event) = event {
            event.insert(
                "npcName".to_owned(),
                Value::String(objectives::label(npc_id).into_owned()),
            );
        }
    }
}

/// Folds `matches` into team and per player aggregates for the team `team_id`.
///
/// Matches are expected to be filtered already, `matchesCount` is simply the
/// number of matches passed in. Matches where the team plays on neither side
/// still count towards it but contribute nothing else.
pub fn aggregate(team_id: Option<i64>, matches: &[Value]) -> TeamAnalysis {
    let mut fold = TeamFold::default();
    for m in matches {
        fold.add_match(team_id, m);
    }

    fold.finish(matches.len())
}

fn team_side(team_id: Option<i64>, m: &Value) -> Option<Side> {
    let team_id = team_id?;

    let radiant = m.get("radiantTeam").and_then(|t| long_field(t, "id"));
    let dire = m.get("direTeam").and_then(|t| long_field(t, "id"));

    if radiant == Some(team_id) {
        Some(Side::Radiant)
    } else if dire == Some(team_id) {
        Some(Side::Dire)
    } else {
        None
    }
}

#[derive(Debug)]
struct PlayerSlot<'v> {
    is_radiant: bool,
    victory: bool,
    kills: i64,
    deaths: i64,
    player_name: &'v str,
    hero: Option<(i64, &'v str)>,
}

impl<'v> PlayerSlot<'v> {
    /// `None` if the slot can't be placed on a side
    fn read(player: &'v Value) -> Option<Self> {
        let is_radiant = bool_field(player, "isRadiant")?;

        let player_name = player
            .get("steamAccount")
            .and_then(|account| account.get("proSteamAccount"))
            .and_then(|pro| text_field(pro, "name"))
            .filter(|name| !name.is_empty())
            .unwrap_or(UNKNOWN_PLAYER);

        let hero = player.get("hero").and_then(|hero| {
            let id = long_field(hero, "id")?;
            Some((id, text_field(hero, "displayName").unwrap_or("")))
        });

        Some(Self {
            is_radiant,
            victory: bool_field(player, "isVictory").unwrap_or(false),
            kills: long_field(player, "kills").unwrap_or(0),
            deaths: long_field(player, "deaths").unwrap_or(0),
            player_name,
            hero,
        })
    }
}

#[derive(Debug)]
struct HeroAgg {
    hero_id: i64,
    hero_name: String,
    matches: u32,
    wins: u32,
    kills: Vec<i64>,
    deaths: Vec<i64>,
}

impl HeroAgg {
    fn new(hero_id: i64, hero_name: &str) -> Self {
        Self {
            hero_id,
            hero_name: hero_name.to_owned(),
            matches: 0,
            wins: 0,
            kills: Vec::new(),
            deaths: Vec::new(),
        }
    }

    fn win_rate(&self) -> f64 {
        if self.matches > 0 {
            self.wins as f64 / self.matches as f64
        } else {
            0.0
        }
    }

    fn into_aggregate(self) -> HeroAggregate {
        HeroAggregate {
            win_rate: self.win_rate(),
            kills: stats::summarize(&self.kills),
            deaths: stats::summarize(&self.deaths),
            hero_id: self.hero_id,
            hero_name: self.hero_name,
            matches: self.matches,
            wins: self.wins,
        }
    }
}

/// Win rate descending, then picks descending, then name ascending by UTF-16 code unit.
fn best_first(a: &HeroAgg, b: &HeroAgg) -> std::cmp::Ordering {
    b.win_rate()
        .total_cmp(&a.win_rate())
        .then_with(|| b.matches.cmp(&a.matches))
        .then_with(|| a.hero_name.encode_utf16().cmp(b.hero_name.encode_utf16()))
}

#[derive(Debug)]
struct PlayerAgg {
    name: String,
    matches: u32,
    wins: u32,
    kills: Vec<i64>,
    deaths: Vec<i64>,
    heroes: Vec<HeroAgg>,
    hero_index: HashMap<i64, usize>,
}

impl PlayerAgg {
    const BEST_HEROES: usize = 3;

    fn new(name: String) -> Self {
        Self {
            name,
            matches: 0,
            wins: 0,
            kills: Vec::new(),
            deaths: Vec::new(),
            heroes: Vec::new(),
            hero_index: HashMap::new(),
        }
    }

    fn record(&mut self, slot: &PlayerSlot<'_>) {
        self.kills.push(slot.kills);
        self.deaths.push(slot.deaths);
        self.matches += 1;
        if slot.victory {
            self.wins += 1;
        }

        let (hero_id, hero_name) = match slot.hero {
            Some(h) => h,
            None => return,
        };

        let idx = match self.hero_index.get(&hero_id) {
            Some(idx) => *idx,
            None => {
                self.heroes.push(HeroAgg::new(hero_id, hero_name));
                self.hero_index.insert(hero_id, self.heroes.len() - 1);
                self.heroes.len() - 1
            }
        };

        let hero = &mut self.heroes[idx];
        hero.matches += 1;
        if slot.victory {
            hero.wins += 1;
        }
        hero.kills.push(slot.kills);
        hero.deaths.push(slot.deaths);
    }

    fn into_aggregate(mut self) -> PlayerAggregate {
        self.heroes.sort_by(best_first);

        PlayerAggregate {
            kills: stats::summarize(&self.kills),
            deaths: stats::summarize(&self.deaths),
            best_heroes: self
                .heroes
                .into_iter()
                .take(Self::BEST_HEROES)
                .map(HeroAgg::into_aggregate)
                .collect(),
            player_name: self.name,
            matches_count: self.matches,
            wins: self.wins,
        }
    }
}

#[derive(Debug, Default)]
struct TeamFold {
    wins: u32,
    losses: u32,
    durations: Vec<i64>,
    kills: Vec<i64>,
    deaths: Vec<i64>,
    players: Vec<PlayerAgg>,
    player_index: HashMap<String, usize>,
}

impl TeamFold {
    fn add_match(&mut self, team_id: Option<i64>, m: &Value) {
        let side = match team_side(team_id, m) {
            Some(s) => s,
            None => {
                tracing::debug!(
                    match_id = ?long_field(m, "id"),
                    ?team_id,
                    "Team is on neither side, skipping match"
                );
                return;
            }
        };

        if let Some(did_radiant_win) = bool_field(m, "didRadiantWin") {
            if side.won(did_radiant_win) {
                self.wins += 1;
            } else {
                self.losses += 1;
            }
        }

        if let Some(duration) = long_field(m, "durationSeconds") {
            self.durations.push(duration);
        }

        let mut kills: i64 = 0;
        let mut deaths: i64 = 0;
        let players = m.get("players").and_then(Value::as_array);
        for slot in players.into_iter().flatten().filter_map(PlayerSlot::read) {
            if slot.is_radiant != side.is_radiant() {
                continue;
            }

            kills = kills.saturating_add(slot.kills);
            deaths = deaths.saturating_add(slot.deaths);

            self.player(slot.player_name).record(&slot);
        }

        self.kills.push(kills);
        self.deaths.push(deaths);
    }

    fn player(&mut self, name: &str) -> &mut PlayerAgg {
        let idx = match self.player_index.get(name) {
            Some(idx) => *idx,
            None => {
                self.players.push(PlayerAgg::new(name.to_owned()));
                self.player_index.insert(name.to_owned(), self.players.len() - 1);
                self.players.len() - 1
            }
        };

        &mut self.players[idx]
    }

    fn finish(self, matches_count: usize) -> TeamAnalysis {
        TeamAnalysis {
            aggregates: TeamAggregate {
                matches_count,
                wins: self.wins,
                losses: self.losses,
                duration_seconds: stats::summarize(&self.durations),
                kills: stats::summarize(&self.kills),
                deaths: stats::summarize(&self.deaths),
            },
            players: self
                .players
                .into_iter()
                .map(PlayerAgg::into_aggregate)
                .collect(),
        }
    }
}
