//! Career hero performance for every player seen in the raw team documents.
//!
//! The upstream rejects more than [`MAX_IDS_PER_REQUEST`] steam ids per call,
//! so ids are fetched slice by slice and the results merged into a single
//! `{"data": {"players": [...]}}` document.

use std::collections::{HashMap, HashSet};

use analysis::coerce::{long_field, to_long};
use serde_json::{json, Value};

use crate::stratz::Upstream;
use crate::{Error, Result};

pub const MAX_IDS_PER_REQUEST: usize = 5;

const STEAM64_OFFSET: i64 = 76561197960265728;

/// 32 bit account id for a steam id, 64 bit ids are converted.
pub fn to_account_id(steam_id: i64) -> i64 {
    if steam_id >= STEAM64_OFFSET {
        steam_id - STEAM64_OFFSET
    } else {
        steam_id
    }
}

/// Account ids in first seen order without duplicates.
pub fn normalize_steam_ids<I>(steam_ids: I) -> Vec<i64>
where
    I: IntoIterator<Item = i64>,
{
    let mut seen = HashSet::new();
    steam_ids
        .into_iter()
        .map(to_account_id)
        .filter(|id| seen.insert(*id))
        .collect()
}

/// Every `steamAccount.id` in the matches of the given raw team documents, in first seen order.
pub fn collect_steam_ids<'d, I>(docs: I) -> Vec<i64>
where
    I: IntoIterator<Item = &'d Value>,
{
    let mut seen = HashSet::new();
    let mut ids = Vec::new();

    for doc in docs {
        let matches = match doc.pointer("/data/team/matches").and_then(Value::as_array) {
            Some(m) => m,
            None => continue,
        };

        let players = matches
            .iter()
            .filter_map(|m| m.get("players").and_then(Value::as_array))
            .flatten();
        for player in players {
            let id = match player.get("steamAccount").and_then(|a| long_field(a, "id")) {
                Some(id) => id,
                None => continue,
            };

            if seen.insert(id) {
                ids.push(id);
            }
        }
    }

    ids
}

/// Drops players without a steam id and keeps one entry per id.
///
/// A later entry replaces the payload of an earlier one but keeps its position.
pub fn dedup_players(players: Vec<Value>) -> Vec<Value> {
    let mut merged: Vec<Value> = Vec::new();
    let mut index: HashMap<i64, usize> = HashMap::new();

    for player in players {
        let id = match player
            .get("steamAccount")
            .and_then(|a| a.get("id"))
            .and_then(to_long)
        {
            Some(id) => id,
            None => continue,
        };

        match index.get(&id) {
            Some(&idx) => merged[idx] = player,
            None => {
                index.insert(id, merged.len());
                merged.push(player);
            }
        }
    }

    merged
}

/// Fetches career data for `steam_ids` in slices of [`MAX_IDS_PER_REQUEST`].
///
/// A failing slice is logged and skipped, the remaining slices are still fetched.
#[tracing::instrument(skip(upstream, steam_ids))]
pub async fn fetch_careers<I>(upstream: &dyn Upstream, steam_ids: I, take_heroes: u32) -> Result<Value>
where
    I: IntoIterator<Item = i64>,
{
    let ids = normalize_steam_ids(steam_ids);
    if ids.is_empty() {
        return Err(Error::NoSteamIds);
    }

    tracing::info!("Fetching careers for {} players", ids.len());

    let mut players = Vec::new();
    for slice in ids.chunks(MAX_IDS_PER_REQUEST) {
        let mut response = match upstream.players_career(slice, take_heroes).await {
            Ok(r) => r,
            Err(e) => {
                tracing::error!(?slice, "Fetching careers: {}", e);
                continue;
            }
        };

        if let Some(errors) = response.get("errors").filter(|e| !e.is_null()) {
            tracing::warn!(?slice, "GraphQL errors: {}", errors);
        }

        if let Some(Value::Array(found)) = response.pointer_mut("/data/players").map(Value::take) {
            players.extend(found);
        }
    }

    Ok(json!({ "data": { "players": dedup_players(players) } }))
}

/// Career entries of a `{"data": {"players": [...]}}` document by account id.
///
/// Later entries replace earlier ones with the same id.
pub fn careers_by_account(careers: &Value) -> HashMap<i64, &Value> {
    careers
        .pointer("/data/players")
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(|player| {
            let id = player.get("steamAccount").and_then(|a| long_field(a, "id"))?;
            Some((to_account_id(id), player))
        })
        .collect()
}

/// Attaches a `proCareer` block to every match player of a team document
/// whose account has a career entry, returning how many were attached.
pub fn attach_careers(doc: &mut Value, careers: &HashMap<i64, &Value>) -> usize {
    let matches = match doc.pointer_mut("/data/team/matches") {
        Some(Value::Array(matches)) => matches,
        _ => return 0,
    };

    let mut attached = 0;
    for m in matches.iter_mut() {
        let players = match m.get_mut("players") {
            Some(Value::Array(players)) => players,
            _ => continue,
        };

        for player in players.iter_mut() {
            let account = player.get("steamAccount");
            let id = match account.and_then(|a| long_field(a, "id")) {
                Some(id) => to_account_id(id),
                None => continue,
            };
            let career = match careers.get(&id) {
                Some(c) => c,
                None => continue,
            };

            let pro_career = json!({
                "steamId": id,
                "proName": account
                    .and_then(|a| a.get("proSteamAccount"))
                    .and_then(|pro| pro.get("name"))
                    .cloned()
                    .unwrap_or(Value::Null),
                "heroesPerformance": career.get("heroesPerformance").cloned().unwrap_or(Value::Null),
            });

            if let Value::Object(player) = player {
                player.insert("proCareer".to_owned(), pro_career);
                attached += 1;
            }
        }
    }

    attached
}
