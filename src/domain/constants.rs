use crate::error::ProxyError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// List pages render lobby labels cut to this many characters.
const LOBBY_LABEL_WIDTH: usize = 6;

pub const OTHER_AGGREGATION_KEY: &str = "Other";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LobbyType {
    Ranked,
    Normal,
    Tournament,
    Unknown,
    Bot,
}

impl LobbyType {
    pub const ALL: [Self; 5] = [
        Self::Ranked,
        Self::Normal,
        Self::Tournament,
        Self::Unknown,
        Self::Bot,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Ranked => "Ranked",
            Self::Normal => "Normal",
            Self::Tournament => "Tournament",
            Self::Unknown => "Unknown",
            Self::Bot => "Bot",
        }
    }

    fn short_label(self) -> &'static str {
        let label = self.label();
        &label[..label.len().min(LOBBY_LABEL_WIDTH)]
    }
}

impl FromStr for LobbyType {
    type Err = ProxyError;

    /// Accepts both the full label and the truncated form used on list pages.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        Self::ALL
            .into_iter()
            .find(|lobby| !text.is_empty() && text.starts_with(lobby.short_label()))
            .ok_or_else(|| ProxyError::Validation(format!("'{text}' is not a known lobby type")))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameMode {
    #[serde(rename = "All Pick")]
    AllPick,
    Turbo,
    Mutation,
    #[serde(rename = "Captains Mode")]
    CaptainsMode,
    #[serde(rename = "Random Draft")]
    RandomDraft,
    #[serde(rename = "Single Draft")]
    SingleDraft,
    #[serde(rename = "1v1 Solo Mid")]
    SoloMid,
    #[serde(rename = "Ability Draft")]
    AbilityDraft,
    #[serde(rename = "All Random")]
    AllRandom,
    #[serde(rename = "All Random Deathmatch")]
    AllRandomDeathmatch,
    #[serde(rename = "Least Played")]
    LeastPlayed,
    #[serde(rename = "Limited Hero Pool")]
    LimitedHeroPool,
    #[serde(rename = "Custom Game")]
    CustomGame,
}

impl GameMode {
    pub const ALL: [Self; 13] = [
        Self::AllPick,
        Self::Turbo,
        Self::Mutation,
        Self::CaptainsMode,
        Self::RandomDraft,
        Self::SingleDraft,
        Self::SoloMid,
        Self::AbilityDraft,
        Self::AllRandom,
        Self::AllRandomDeathmatch,
        Self::LeastPlayed,
        Self::LimitedHeroPool,
        Self::CustomGame,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::AllPick => "All Pick",
            Self::Turbo => "Turbo",
            Self::Mutation => "Mutation",
            Self::CaptainsMode => "Captains Mode",
            Self::RandomDraft => "Random Draft",
            Self::SingleDraft => "Single Draft",
            Self::SoloMid => "1v1 Solo Mid",
            Self::AbilityDraft => "Ability Draft",
            Self::AllRandom => "All Random",
            Self::AllRandomDeathmatch => "All Random Deathmatch",
            Self::LeastPlayed => "Least Played",
            Self::LimitedHeroPool => "Limited Hero Pool",
            Self::CustomGame => "Custom Game",
        }
    }
}

impl FromStr for GameMode {
    type Err = ProxyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        Self::ALL
            .into_iter()
            .find(|mode| mode.label() == text)
            .ok_or_else(|| ProxyError::Validation(format!("'{text}' is not a known game mode")))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Team {
    Radiant,
    Dire,
}

impl Team {
    pub const ALL: [Self; 2] = [Self::Radiant, Self::Dire];

    pub fn label(self) -> &'static str {
        match self {
            Self::Radiant => "Radiant",
            Self::Dire => "Dire",
        }
    }
}

impl FromStr for Team {
    type Err = ProxyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        Self::ALL
            .into_iter()
            .find(|team| team.label() == text)
            .ok_or_else(|| ProxyError::Validation(format!("'{text}' is not a known team")))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameResult {
    Won,
    Lost,
    Abandoned,
}

impl GameResult {
    pub const ALL: [Self; 3] = [Self::Won, Self::Lost, Self::Abandoned];

    pub fn label(self) -> &'static str {
        match self {
            Self::Won => "Won",
            Self::Lost => "Lost",
            Self::Abandoned => "Abandoned",
        }
    }
}

impl FromStr for GameResult {
    type Err = ProxyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        Self::ALL
            .into_iter()
            .find(|result| result.label() == text)
            .ok_or_else(|| ProxyError::Validation(format!("'{text}' is not a known game result")))
    }
}

macro_rules! impl_display_label {
    ($($ty:ty),*) => {
        $(impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        })*
    };
}

impl_display_label!(LobbyType, GameMode, Team, GameResult);

/// Every label a profile may group its match statistics under.
pub fn allowed_aggregation_keys() -> Vec<&'static str> {
    Team::ALL
        .iter()
        .map(|team| team.label())
        .chain(LobbyType::ALL.iter().map(|lobby| lobby.label()))
        .chain(GameMode::ALL.iter().map(|mode| mode.label()))
        .chain(std::iter::once(OTHER_AGGREGATION_KEY))
        .collect()
}

pub fn is_allowed_aggregation_key(key: &str) -> bool {
    allowed_aggregation_keys().contains(&key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lobby_accepts_truncated_labels() {
        assert_eq!("Tourna".parse::<LobbyType>().unwrap(), LobbyType::Tournament);
        assert_eq!("Tournament".parse::<LobbyType>().unwrap(), LobbyType::Tournament);
        assert_eq!("Unknow".parse::<LobbyType>().unwrap(), LobbyType::Unknown);
        assert_eq!(" Ranked ".parse::<LobbyType>().unwrap(), LobbyType::Ranked);
        assert_eq!("Bot".parse::<LobbyType>().unwrap(), LobbyType::Bot);
        assert!(matches!(
            "Casual".parse::<LobbyType>(),
            Err(ProxyError::Validation(_))
        ));
        assert!("".parse::<LobbyType>().is_err());
    }

    #[test]
    fn game_mode_requires_exact_label() {
        assert_eq!("All Pick".parse::<GameMode>().unwrap(), GameMode::AllPick);
        assert_eq!(
            "All Random Deathmatch".parse::<GameMode>().unwrap(),
            GameMode::AllRandomDeathmatch
        );
        assert!("All".parse::<GameMode>().is_err());
    }

    #[test]
    fn serializes_as_labels() {
        assert_eq!(serde_json::to_string(&GameMode::SoloMid).unwrap(), "\"1v1 Solo Mid\"");
        assert_eq!(serde_json::to_string(&LobbyType::Ranked).unwrap(), "\"Ranked\"");
        for mode in GameMode::ALL {
            assert_eq!(
                serde_json::to_string(&mode).unwrap(),
                format!("\"{}\"", mode.label())
            );
        }
    }

    #[test]
    fn aggregation_keys_are_closed() {
        assert!(is_allowed_aggregation_key("Radiant"));
        assert!(is_allowed_aggregation_key("Turbo"));
        assert!(is_allowed_aggregation_key("Ranked"));
        assert!(is_allowed_aggregation_key("Other"));
        assert!(!is_allowed_aggregation_key("Lifetime"));
        assert_eq!(allowed_aggregation_keys().len(), 2 + 5 + 13 + 1);
    }
}
