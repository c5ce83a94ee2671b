use super::constants::is_allowed_aggregation_key;
use crate::error::{ProxyError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const MAX_MOST_PLAYED_HEROES: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatedMatchStats {
    pub winrate: f64,
    pub matches_played: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avg_kda: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverviewHero {
    pub hero_name: String,
    pub match_stats: AggregatedMatchStats,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerProfile {
    pub player_id: i64,
    pub nickname: String,
    pub most_played_heroes: Vec<OverviewHero>,
    pub match_stats: HashMap<String, AggregatedMatchStats>,
}

impl PlayerProfile {
    pub fn new(
        player_id: i64,
        nickname: String,
        most_played_heroes: Vec<OverviewHero>,
        match_stats: HashMap<String, AggregatedMatchStats>,
    ) -> Result<Self> {
        if most_played_heroes.len() > MAX_MOST_PLAYED_HEROES {
            return Err(ProxyError::Validation(format!(
                "most played heroes should be {MAX_MOST_PLAYED_HEROES} heroes max, got {}",
                most_played_heroes.len()
            )));
        }

        if let Some(key) = match_stats.keys().find(|key| !is_allowed_aggregation_key(key)) {
            return Err(ProxyError::Validation(format!(
                "{key} is not allowed as match aggregation key"
            )));
        }

        Ok(Self {
            player_id,
            nickname,
            most_played_heroes,
            match_stats,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats() -> AggregatedMatchStats {
        AggregatedMatchStats {
            winrate: 51.5,
            matches_played: 200,
            avg_kda: None,
        }
    }

    fn hero(name: &str) -> OverviewHero {
        OverviewHero {
            hero_name: name.to_string(),
            match_stats: AggregatedMatchStats {
                avg_kda: Some(3.2),
                ..stats()
            },
        }
    }

    #[test]
    fn accepts_ten_heroes_and_known_keys() {
        let heroes = (0..10).map(|i| hero(&format!("Hero {i}"))).collect();
        let match_stats = HashMap::from([
            ("Ranked".to_string(), stats()),
            ("Radiant".to_string(), stats()),
            ("Other".to_string(), stats()),
        ]);

        let profile = PlayerProfile::new(1, "nick".into(), heroes, match_stats).unwrap();
        assert_eq!(profile.most_played_heroes.len(), 10);
    }

    #[test]
    fn rejects_eleven_heroes() {
        let heroes = (0..11).map(|i| hero(&format!("Hero {i}"))).collect();
        let result = PlayerProfile::new(1, "nick".into(), heroes, HashMap::new());
        assert!(matches!(result, Err(ProxyError::Validation(_))));
    }

    #[test]
    fn rejects_unknown_aggregation_key() {
        let match_stats = HashMap::from([("Lifetime".to_string(), stats())]);
        let result = PlayerProfile::new(1, "nick".into(), vec![], match_stats);
        assert!(matches!(result, Err(ProxyError::Validation(msg)) if msg.contains("Lifetime")));
    }
}
