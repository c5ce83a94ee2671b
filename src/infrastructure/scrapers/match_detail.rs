use super::{link_href, nth, parse_timestamp, required, DocumentExtractor, DomNode, Query};
use crate::domain::{
    AdvancedMatchHero, BaseMatchHero, GameMode, LobbyType, Match, MatchInfo, Team,
    ANONYMOUS_PLAYER_ID,
};
use crate::error::{ProxyError, Result};
use crate::utils::{
    first_word, humanize_slug, last_path_segment, parse_count, parse_duration, parse_magnitude,
};
use tracing::debug;

const LOBBY_ENTRY: usize = 0;
const MODE_ENTRY: usize = 1;
const DURATION_ENTRY: usize = 3;
const TIMESTAMP_ENTRY: usize = 4;

const HERO_COLUMN: usize = 0;
const PLAYER_COLUMN: usize = 3;

/// Stat column positions for a row whose player is identified.
struct StatColumns {
    kills: usize,
    deaths: usize,
    assists: usize,
    net_worth: usize,
    last_hits: usize,
    denies: usize,
    gpm: usize,
    xpm: usize,
    hero_damage: usize,
    heal: usize,
    tower_damage: usize,
}

const STAT_COLUMNS: StatColumns = StatColumns {
    kills: 5,
    deaths: 6,
    assists: 7,
    net_worth: 8,
    last_hits: 9,
    denies: 11,
    gpm: 12,
    xpm: 14,
    hero_damage: 15,
    heal: 16,
    tower_damage: 17,
};

/// The site drops the player and party cells for anonymous players.
const ANONYMOUS_COLUMN_SHIFT: usize = 2;

/// Extracts a single match page.
pub struct MatchDetailExtractor;

impl DocumentExtractor for MatchDetailExtractor {
    type Output = Match;

    fn extract<N: DomNode>(&self, root: N) -> Result<Match> {
        let match_info = parse_match_info(root)?;

        let team_results = required(
            root.find_first(Query::tag("div").with_class("team-results")),
            "match detail: team results",
        )?;
        let radiant = parse_team(team_results, Team::Radiant)?;
        let dire = parse_team(team_results, Team::Dire)?;

        let result_label = required(
            root.find_first(Query::tag("div").with_class("match-result")),
            "match detail: match result",
        )?;
        let winner: Team = first_word(&result_label.text_content()).parse()?;

        let parsed = Match::new(winner, radiant, dire, match_info)?;
        let anonymous = Team::ALL
            .iter()
            .flat_map(|&team| parsed.team(team))
            .filter(|hero| hero.is_anonymous())
            .count();
        debug!(%winner, anonymous, "Parsed match detail page");
        Ok(parsed)
    }
}

fn parse_match_info<N: DomNode>(root: N) -> Result<MatchInfo> {
    let context = "match detail header";
    let header = required(
        root.find_first(Query::tag("div").with_class("header-content-secondary")),
        context,
    )?;
    let entries = header.find_all(Query::tag("dl"));

    let value = |index: usize| -> Result<N> {
        let entry = nth(&entries, index, context)?;
        required(
            entry.find_first(Query::tag("dd")),
            format!("{context}: entry {index} value"),
        )
    };

    let lobby_type: LobbyType = value(LOBBY_ENTRY)?.trimmed_text().parse()?;
    let game_mode: GameMode = value(MODE_ENTRY)?.trimmed_text().parse()?;
    let duration = parse_duration(&value(DURATION_ENTRY)?.text_content())?;
    let timestamp = parse_timestamp(value(TIMESTAMP_ENTRY)?, context)?;

    Ok(MatchInfo {
        duration,
        timestamp,
        lobby_type,
        game_mode,
    })
}

fn parse_team<N: DomNode>(team_results: N, team: Team) -> Result<Vec<AdvancedMatchHero>> {
    let section_class = match team {
        Team::Radiant => "radiant",
        Team::Dire => "dire",
    };
    let context = format!("match detail {section_class} section");

    let section = required(
        team_results.find_first(Query::tag("section").with_class(section_class)),
        context.clone(),
    )?;
    let body = required(
        section.find_first(Query::tag("tbody")),
        format!("{context}: table body"),
    )?;

    body.find_all(Query::tag("tr"))
        .into_iter()
        .enumerate()
        .map(|(index, row)| parse_player_row(row, &format!("{context} row {index}")))
        .collect()
}

fn parse_player_row<N: DomNode>(row: N, context: &str) -> Result<AdvancedMatchHero> {
    let columns = row.find_all(Query::tag("td"));

    let hero_link = required(
        nth(&columns, HERO_COLUMN, context)?.find_first(Query::tag("a")),
        format!("{context}: hero link"),
    )?;
    let hero_name = humanize_slug(last_path_segment(link_href(&hero_link, context)?));

    let player_link = nth(&columns, PLAYER_COLUMN, context)?.find_first(Query::tag("a"));
    let (player_id, shift) = match player_link {
        Some(link) => {
            let segment = last_path_segment(link_href(&link, context)?);
            let id = segment.parse::<i64>().map_err(|e| {
                ProxyError::malformed(format!("{context}: player id '{segment}'"), e)
            })?;
            (id, 0)
        }
        None => (ANONYMOUS_PLAYER_ID, ANONYMOUS_COLUMN_SHIFT),
    };

    let cell = |index: usize| -> Result<String> {
        Ok(nth(&columns, index - shift, context)?.trimmed_text())
    };
    let count = |index: usize| -> Result<u32> { parse_count(&cell(index)?) };
    let magnitude = |index: usize| -> Result<u64> { parse_magnitude(&cell(index)?) };

    Ok(AdvancedMatchHero {
        base: BaseMatchHero {
            hero_name,
            kills: count(STAT_COLUMNS.kills)?,
            deaths: count(STAT_COLUMNS.deaths)?,
            assists: count(STAT_COLUMNS.assists)?,
        },
        player_id,
        net_worth: magnitude(STAT_COLUMNS.net_worth)?,
        gpm: count(STAT_COLUMNS.gpm)?,
        xpm: count(STAT_COLUMNS.xpm)?,
        hero_damage: magnitude(STAT_COLUMNS.hero_damage)?,
        tower_damage: magnitude(STAT_COLUMNS.tower_damage)?,
        heal: magnitude(STAT_COLUMNS.heal)?,
        last_hits: count(STAT_COLUMNS.last_hits)?,
        denies: count(STAT_COLUMNS.denies)?,
    })
}
