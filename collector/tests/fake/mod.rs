// Shared by several test binaries, not all of them use everything
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;

use collector::stratz::Upstream;
use collector::{Error, Result};
use serde_json::{json, Value};

pub const TOURNAMENT: i64 = 18324;

#[derive(Default)]
pub struct FakeUpstream {
    pub teams: HashMap<i64, Value>,
    pub careers: HashMap<i64, Value>,
    /// Any career slice containing one of these ids fails
    pub failing: Vec<i64>,
    pub slices: Mutex<Vec<Vec<i64>>>,
}

impl FakeUpstream {
    pub fn with_team(mut self, doc: Value) -> Self {
        let id = doc["data"]["team"]["id"].as_i64().unwrap();
        self.teams.insert(id, doc);
        self
    }

    pub fn with_career(mut self, steam_id: i64) -> Self {
        self.careers.insert(steam_id, career(steam_id));
        self
    }

    pub fn slices(&self) -> Vec<Vec<i64>> {
        self.slices.lock().unwrap().clone()
    }
}

fn not_found(what: String) -> Error {
    Error::Io {
        path: what.into(),
        source: std::io::Error::new(std::io::ErrorKind::NotFound, "unknown"),
    }
}

#[async_trait::async_trait]
impl Upstream for FakeUpstream {
    async fn team_with_matches(&self, team_id: i64, _take: u32, _skip: u32) -> Result<Value> {
        self.teams
            .get(&team_id)
            .cloned()
            .ok_or_else(|| not_found(format!("team {}", team_id)))
    }

    async fn players_career(&self, steam_ids: &[i64], _take_heroes: u32) -> Result<Value> {
        self.slices.lock().unwrap().push(steam_ids.to_vec());

        if steam_ids.iter().any(|id| self.failing.contains(id)) {
            return Err(not_found(format!("slice {:?}", steam_ids)));
        }

        let players: Vec<Value> = steam_ids
            .iter()
            .filter_map(|id| self.careers.get(id).cloned())
            .collect();

        Ok(json!({ "data": { "players": players } }))
    }
}

pub fn career(steam_id: i64) -> Value {
    json!({
        "steamAccount": { "id": steam_id, "proSteamAccount": { "id": steam_id, "name": format!("Pro {}", steam_id) } },
        "heroesPerformance": [
            { "hero": { "id": 1, "displayName": "Anti-Mage" }, "matchCount": 40, "winCount": 25 },
        ],
    })
}

pub fn team_doc(team_id: i64, name: &str, steam_ids: &[i64]) -> Value {
    let players: Vec<Value> = steam_ids
        .iter()
        .map(|id| {
            json!({
                "isRadiant": true,
                "isVictory": true,
                "kills": 5,
                "deaths": 2,
                "hero": { "id": 1, "displayName": "Anti-Mage" },
                "steamAccount": { "id": id, "proSteamAccount": { "name": format!("Pro {}", id) } },
            })
        })
        .collect();

    json!({
        "data": {
            "team": {
                "id": team_id,
                "name": name,
                "tag": "TAG",
                "matches": [
                    {
                        "id": team_id * 10,
                        "durationSeconds": 2000,
                        "didRadiantWin": true,
                        "radiantTeam": { "id": team_id },
                        "direTeam": { "id": 1 },
                        "league": { "id": TOURNAMENT },
                        "towerDeaths": [{ "time": 100, "npcId": 16, "isRadiant": true }],
                        "players": players,
                    },
                    {
                        "id": team_id * 10 + 1,
                        "durationSeconds": 1000,
                        "didRadiantWin": false,
                        "radiantTeam": { "id": team_id },
                        "direTeam": { "id": 1 },
                        "league": { "id": 1 },
                        "players": [],
                    },
                ],
            }
        }
    })
}
