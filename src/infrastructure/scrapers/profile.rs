use super::{link_href, nth, required, DocumentExtractor, DomNode, Query};
use crate::domain::{AggregatedMatchStats, OverviewHero, PlayerProfile};
use crate::error::{ProxyError, Result};
use crate::utils::{
    humanize_slug, last_path_segment, parse_count, parse_decimal, parse_percentage,
};
use std::collections::HashMap;
use tracing::debug;

const TITLE_SUFFIX: &str = "Overview";

/// Overall, lobby type, game mode, team.
const STAT_GROUPS: usize = 4;

/// Extracts a player's overview page.
pub struct ProfileExtractor;

impl DocumentExtractor for ProfileExtractor {
    type Output = PlayerProfile;

    fn extract<N: DomNode>(&self, root: N) -> Result<PlayerProfile> {
        let (player_id, nickname) = parse_header(root)?;
        let most_played_heroes = parse_most_played(root)?;
        let match_stats = parse_match_stats(root)?;

        debug!(
            player_id,
            heroes = most_played_heroes.len(),
            groups = match_stats.len(),
            "Parsed profile page"
        );
        PlayerProfile::new(player_id, nickname, most_played_heroes, match_stats)
    }
}

fn parse_header<N: DomNode>(root: N) -> Result<(i64, String)> {
    let context = "profile header";
    let header = required(
        root.find_first(Query::tag("div").with_class("header-content-primary")),
        context,
    )?;
    let parts = header.element_children();

    let profile_link = required(
        nth(&parts, 0, context)?.find_first(Query::tag("a")),
        format!("{context}: profile link"),
    )?;
    let segment = last_path_segment(link_href(&profile_link, context)?);
    let player_id = segment
        .parse::<i64>()
        .map_err(|e| ProxyError::malformed(format!("{context}: player id '{segment}'"), e))?;

    let title = required(
        nth(&parts, 1, context)?.find_first(Query::tag("h1")),
        format!("{context}: title"),
    )?;
    let text = title.text_content();
    let text = text.trim();
    let nickname = text.strip_suffix(TITLE_SUFFIX).unwrap_or(text).trim().to_string();

    Ok((player_id, nickname))
}

fn parse_most_played<N: DomNode>(root: N) -> Result<Vec<OverviewHero>> {
    let overview = required(
        root.find_first(Query::tag("div").with_class("heroes-overview")),
        "profile heroes overview",
    )?;

    overview
        .element_children()
        .into_iter()
        .enumerate()
        .map(|(index, entry)| parse_overview_hero(entry, &format!("profile hero {index}")))
        .collect()
}

/// Every column of a hero entry holds a label followed by its value.
fn column_value<N: DomNode>(columns: &[N], index: usize, context: &str) -> Result<N> {
    let cells = nth(columns, index, context)?.element_children();
    nth(&cells, 1, &format!("{context} column {index}"))
}

fn parse_overview_hero<N: DomNode>(entry: N, context: &str) -> Result<OverviewHero> {
    let columns = entry.element_children();

    let hero_link = required(
        column_value(&columns, 0, context)?.find_first(Query::tag("a")),
        format!("{context}: hero link"),
    )?;
    let hero_name = humanize_slug(last_path_segment(link_href(&hero_link, context)?));

    let matches_played = parse_count(&column_value(&columns, 1, context)?.text_content())?;
    let winrate = parse_percentage(&column_value(&columns, 2, context)?.text_content())?;
    let avg_kda = parse_decimal(&column_value(&columns, 3, context)?.text_content())?;

    Ok(OverviewHero {
        hero_name,
        match_stats: AggregatedMatchStats {
            winrate,
            matches_played,
            avg_kda: Some(avg_kda),
        },
    })
}

fn parse_match_stats<N: DomNode>(root: N) -> Result<HashMap<String, AggregatedMatchStats>> {
    let context = "profile stats table";
    let table = required(root.find_first(Query::tag("table")), context)?;
    let groups = table.find_all(Query::tag("tbody"));

    let mut match_stats = HashMap::new();
    for group_index in 0..STAT_GROUPS {
        let group = nth(&groups, group_index, context)?;
        for (row_index, row) in group.find_all(Query::tag("tr")).into_iter().enumerate() {
            let row_context = format!("{context} group {group_index} row {row_index}");
            let columns = row.find_all(Query::tag("td"));

            let label = nth(&columns, 0, &row_context)?.trimmed_text();
            let stats = AggregatedMatchStats {
                matches_played: parse_count(&nth(&columns, 1, &row_context)?.text_content())?,
                winrate: parse_percentage(&nth(&columns, 2, &row_context)?.text_content())?,
                avg_kda: None,
            };
            match_stats.insert(label, stats);
        }
    }

    Ok(match_stats)
}
