use super::constants::{GameMode, GameResult, LobbyType, Team};
use super::hero::{AdvancedMatchHero, BaseMatchHero};
use crate::error::{ProxyError, Result};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const TEAM_SIZE: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchInfo {
    pub duration: NaiveTime,
    pub timestamp: DateTime<FixedOffset>,
    pub lobby_type: LobbyType,
    pub game_mode: GameMode,
}

impl MatchInfo {
    /// Calendar date of the match in the offset the site reported.
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date_naive()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerMatch {
    pub result: GameResult,
    pub hero: BaseMatchHero,
    pub match_info: MatchInfo,
}

impl PlayerMatch {
    pub fn date(&self) -> NaiveDate {
        self.match_info.date()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub winner: Team,
    pub players: BTreeMap<Team, Vec<AdvancedMatchHero>>,
    pub match_info: MatchInfo,
}

impl Match {
    pub fn new(
        winner: Team,
        radiant: Vec<AdvancedMatchHero>,
        dire: Vec<AdvancedMatchHero>,
        match_info: MatchInfo,
    ) -> Result<Self> {
        for (team, heroes) in [(Team::Radiant, &radiant), (Team::Dire, &dire)] {
            if heroes.len() != TEAM_SIZE {
                return Err(ProxyError::Validation(format!(
                    "{team} has {} players, expected {TEAM_SIZE}",
                    heroes.len()
                )));
            }
        }

        let players = BTreeMap::from([(Team::Radiant, radiant), (Team::Dire, dire)]);
        Ok(Self {
            winner,
            players,
            match_info,
        })
    }

    pub fn team(&self, team: Team) -> &[AdvancedMatchHero] {
        self.players.get(&team).map(Vec::as_slice).unwrap_or_default()
    }
}
