use serde::{Deserialize, Serialize};

/// Player id the site shows for players who hide their identity.
pub const ANONYMOUS_PLAYER_ID: i64 = -1;

/// Hero line as shown on a player's match list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseMatchHero {
    pub hero_name: String,
    pub kills: u32,
    pub deaths: u32,
    pub assists: u32,
}

/// Hero line from a match detail page, including the player's economy and damage numbers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvancedMatchHero {
    #[serde(flatten)]
    pub base: BaseMatchHero,
    pub player_id: i64,
    pub net_worth: u64,
    pub gpm: u32,
    pub xpm: u32,
    pub hero_damage: u64,
    pub tower_damage: u64,
    pub heal: u64,
    pub last_hits: u32,
    pub denies: u32,
}

impl AdvancedMatchHero {
    pub fn is_anonymous(&self) -> bool {
        self.player_id == ANONYMOUS_PLAYER_ID
    }
}
