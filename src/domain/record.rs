use super::constants::GameResult;
use super::matches::MatchInfo;
use serde::{Deserialize, Serialize};

/// A personal best such as "Most Kills", with the match it was set in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub match_info: MatchInfo,
    pub result: GameResult,
    pub record_name: String,
    pub hero_name: String,
    /// Kept as rendered; its unit depends on the record.
    pub value: String,
}
