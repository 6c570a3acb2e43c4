use serde::Serialize;
use serde_json::{json, Value};

use crate::{Error, Result};

pub const DEFAULT_ENDPOINT: &str = "https://api.stratz.com/graphql";

// Raw team data for offline use, no server side filtering or aggregation
const TEAM_WITH_MATCHES: &str = r#"
query GetTeamWithMatches($teamId: Int!, $take: Int!, $skip: Int!) {
  team(teamId: $teamId) {
    id
    name
    tag
    matches(request: { take: $take, skip: $skip }) {
      id
      startDateTime
      durationSeconds
      didRadiantWin
      radiantTeam { id name tag }
      direTeam    { id name tag }
      league { id displayName }

      towerStatusRadiant
      towerStatusDire
      barracksStatusRadiant
      barracksStatusDire

      towerDeaths { time npcId isRadiant }

      players {
        isRadiant
        isVictory
        kills
        deaths
        assists
        goldPerMinute
        experiencePerMinute
        networth

        playbackData {
          killEvents { time target }
          deathEvents {
            time
            attacker
            goldFed
            xpFed
            goldLost
            isFeed
            positionX
            positionY
          }
        }

        stats { itemPurchases { time itemId } }
        hero { id displayName }
        steamAccount {
          id
          name
          proSteamAccount { id name teamId }
        }
      }
    }
  }
  constants {
    items { id displayName name }
  }
}
"#;

const PLAYERS_CAREER: &str = r#"
query PlayersProAllTime($ids: [Long!]!, $takeHeroes: Int = 10) {
  players(steamAccountIds: $ids) {
    steamAccount { id proSteamAccount { id name } }
    heroesPerformance(
      request: { isLeague: true, matchGroupOrderBy: MATCH_COUNT, orderBy: DESC, take: 5000 },
      take: $takeHeroes
    ) {
      hero { id displayName }
      matchCount
      winCount
      avgKills
      avgDeaths
      avgAssists
      goldPerMinute
      experiencePerMinute
      lastPlayedDateTime
    }
  }
}
"#;

/// The two queries the collector needs from the upstream API.
///
/// Both return the raw response envelope, including a GraphQL `errors` member
/// if the upstream reported any.
#[async_trait::async_trait]
pub trait Upstream: Send + Sync {
    async fn team_with_matches(&self, team_id: i64, take: u32, skip: u32) -> Result<Value>;

    /// At most five ids are accepted per call upstream, see [`crate::career`]
    async fn players_career(&self, steam_ids: &[i64], take_heroes: u32) -> Result<Value>;
}

#[derive(Debug, Serialize)]
struct Request<'q> {
    query: &'q str,
    variables: Value,
}

pub struct Client {
    http: reqwest::Client,
    endpoint: String,
    token: String,
}

impl Client {
    pub fn new<E, T>(endpoint: E, token: T) -> Self
    where
        E: Into<String>,
        T: Into<String>,
    {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into(),
            token: token.into(),
        }
    }

    async fn post(&self, query: &str, variables: Value) -> Result<Value> {
        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.token)
            .header(reqwest::header::ACCEPT, "application/json")
            .header(reqwest::header::USER_AGENT, "STRATZ_API")
            .json(&Request { query, variables })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::debug!(%status, "Request rejected: {}", body);
            return Err(Error::Status { status, body });
        }

        Ok(response.json::<Value>().await?)
    }
}

#[async_trait::async_trait]
impl Upstream for Client {
    async fn team_with_matches(&self, team_id: i64, take: u32, skip: u32) -> Result<Value> {
        self.post(
            TEAM_WITH_MATCHES,
            json!({ "teamId": team_id, "take": take, "skip": skip }),
        )
        .await
    }

    async fn players_career(&self, steam_ids: &[i64], take_heroes: u32) -> Result<Value> {
        self.post(
            PLAYERS_CAREER,
            json!({ "ids": steam_ids, "takeHeroes": take_heroes }),
        )
        .await
    }
}
