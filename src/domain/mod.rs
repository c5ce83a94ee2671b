mod constants;
mod hero;
mod matches;
mod profile;
mod record;

pub use constants::{GameMode, GameResult, LobbyType, Team};
pub use hero::{AdvancedMatchHero, BaseMatchHero, ANONYMOUS_PLAYER_ID};
pub use matches::{Match, MatchInfo, PlayerMatch, TEAM_SIZE};
pub use profile::{AggregatedMatchStats, OverviewHero, PlayerProfile};
pub use record::Record;
