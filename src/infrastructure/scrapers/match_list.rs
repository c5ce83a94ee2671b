use super::{nth, parse_timestamp, required, DocumentExtractor, DomNode, Query};
use crate::domain::{BaseMatchHero, GameMode, GameResult, LobbyType, MatchInfo, PlayerMatch};
use crate::error::{ProxyError, Result};
use crate::utils::{first_word, parse_duration};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

/// Party-size marker the site appends to the lobby label, e.g. `x2`.
static REPETITION_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"x[1-5]").unwrap());

const LOBBY_PREFIX_WIDTH: usize = 6;

const HERO_COLUMN: usize = 1;
const RESULT_COLUMN: usize = 3;
const MODE_COLUMN: usize = 4;
const DURATION_COLUMN: usize = 5;
const KDA_COLUMN: usize = 6;

/// Extracts a player's match history page.
pub struct MatchListExtractor;

impl DocumentExtractor for MatchListExtractor {
    type Output = Vec<PlayerMatch>;

    fn extract<N: DomNode>(&self, root: N) -> Result<Vec<PlayerMatch>> {
        let table = required(root.find_first(Query::tag("table")), "match list: results table")?;
        let body = required(table.find_first(Query::tag("tbody")), "match list: table body")?;

        let rows = body.find_all(Query::tag("tr"));
        if rows.is_empty() {
            return Err(ProxyError::missing("match list: rows"));
        }

        let matches = rows
            .into_iter()
            .enumerate()
            .map(|(index, row)| parse_row(row, index))
            .collect::<Result<Vec<_>>>()?;

        debug!(rows = matches.len(), "Parsed match list page");
        Ok(matches)
    }
}

fn parse_row<N: DomNode>(row: N, index: usize) -> Result<PlayerMatch> {
    let context = format!("match list row {index}");
    let columns = row.find_all(Query::tag("td"));

    let hero_link = required(
        nth(&columns, HERO_COLUMN, &context)?.find_first(Query::tag("a")),
        format!("{context}: hero link"),
    )?;
    let hero_name = hero_link.trimmed_text();

    let result_column = nth(&columns, RESULT_COLUMN, &context)?;
    let result_link = required(
        result_column.find_first(Query::tag("a")),
        format!("{context}: result link"),
    )?;
    let result: GameResult = first_word(&result_link.text_content()).parse()?;
    let timestamp = parse_timestamp(result_column, &context)?;

    let mode_column = nth(&columns, MODE_COLUMN, &context)?;
    let mode_label = required(
        mode_column.find_first(Query::tag("div")),
        format!("{context}: game mode label"),
    )?
    .trimmed_text();
    let game_mode: GameMode = mode_label.parse()?;
    let lobby_type = lobby_from_column(&mode_column.text_content(), &mode_label)?;

    let duration = parse_duration(&nth(&columns, DURATION_COLUMN, &context)?.text_content())?;

    let kda = nth(&columns, KDA_COLUMN, &context)?.trimmed_text();
    let (kills, deaths, assists) = parse_kda(&kda)
        .ok_or_else(|| ProxyError::malformed(format!("{context}: KDA"), format!("'{kda}'")))?;

    Ok(PlayerMatch {
        result,
        hero: BaseMatchHero {
            hero_name,
            kills,
            deaths,
            assists,
        },
        match_info: MatchInfo {
            duration,
            timestamp,
            lobby_type,
            game_mode,
        },
    })
}

/// The lobby shares its column with the game mode label and a party marker.
fn lobby_from_column(column_text: &str, mode_label: &str) -> Result<LobbyType> {
    let remainder = column_text.replacen(mode_label, "", 1);
    let prefix: String = remainder.trim().chars().take(LOBBY_PREFIX_WIDTH).collect();
    REPETITION_MARKER.replace_all(&prefix, "").parse()
}

fn parse_kda(text: &str) -> Option<(u32, u32, u32)> {
    let mut parts = text.split('/').map(|part| part.trim().parse::<u32>());
    match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(Ok(kills)), Some(Ok(deaths)), Some(Ok(assists)), None) => {
            Some((kills, deaths, assists))
        }
        _ => None,
    }
}
