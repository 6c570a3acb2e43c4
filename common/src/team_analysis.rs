/// Mean and median over one series of per-match values.
#[derive(Debug, Clone, Copy, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Summary {
    pub average: f64,
    pub median: f64,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamAggregate {
    pub matches_count: usize,
    pub wins: u32,
    pub losses: u32,
    pub duration_seconds: Summary,
    pub kills: Summary,
    pub deaths: Summary,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerAggregate {
    pub player_name: String,
    pub matches_count: u32,
    pub wins: u32,
    pub kills: Summary,
    pub deaths: Summary,
    pub best_heroes: Vec<HeroAggregate>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeroAggregate {
    pub hero_id: i64,
    pub hero_name: String,
    pub matches: u32,
    pub wins: u32,
    /// `wins / matches`, or `0.0` for a hero without matches
    pub win_rate: f64,
    pub kills: Summary,
    pub deaths: Summary,
}
