use super::{nth, parse_timestamp, required, DocumentExtractor, DomNode, Query};
use crate::domain::{GameMode, GameResult, LobbyType, MatchInfo, Record};
use crate::error::{ProxyError, Result};
use crate::utils::{first_word, parse_duration};
use tracing::debug;

/// Position of the records article inside the page content.
const RECORDS_ARTICLE: usize = 3;

/// Extracts a player's records page.
pub struct RecordsExtractor;

impl DocumentExtractor for RecordsExtractor {
    type Output = Vec<Record>;

    fn extract<N: DomNode>(&self, root: N) -> Result<Vec<Record>> {
        let content = required(
            root.find_first(Query::tag("div").with_class("content-inner")),
            "records content",
        )?;
        let articles = content.find_all(Query::tag("article"));
        let article = nth(&articles, RECORDS_ARTICLE, "records article")?;

        let titles = article.find_all(Query::tag("div").with_class("title"));
        let values = article.find_all(Query::tag("div").with_class("value"));
        let heroes = article.find_all(Query::tag("div").with_class("hero"));
        let details = article.find_all(Query::tag("div").with_class("details"));

        if titles.is_empty() {
            return Err(ProxyError::missing("records: entries"));
        }
        let counts = [titles.len(), values.len(), heroes.len(), details.len()];
        if counts.iter().any(|&count| count != titles.len()) {
            return Err(ProxyError::malformed(
                "records article",
                format!(
                    "title/value/hero/details counts differ: {}/{}/{}/{}",
                    counts[0], counts[1], counts[2], counts[3]
                ),
            ));
        }

        let records = titles
            .into_iter()
            .zip(values)
            .zip(heroes)
            .zip(details)
            .enumerate()
            .map(|(index, (((title, value), hero), detail))| {
                parse_record(title, value, hero, detail, &format!("record {index}"))
            })
            .collect::<Result<Vec<_>>>()?;

        debug!(records = records.len(), "Parsed records page");
        Ok(records)
    }
}

fn parse_record<N: DomNode>(
    title: N,
    value: N,
    hero: N,
    detail: N,
    context: &str,
) -> Result<Record> {
    let hero_text = hero.text_content();
    let (hero_name, duration) = split_hero_label(&hero_text).ok_or_else(|| {
        ProxyError::malformed(format!("{context}: hero label"), hero_text.trim())
    })?;
    let duration = parse_duration(duration)?;

    let timestamp = parse_timestamp(detail, context)?;
    let detail_text = detail.text_content();
    let segments: Vec<&str> = detail_text.split(',').map(str::trim).collect();
    let [outcome, lobby, mode] = segments.as_slice() else {
        return Err(ProxyError::malformed(
            format!("{context}: details"),
            format!("expected 3 comma separated parts, got {}", segments.len()),
        ));
    };

    let result: GameResult = first_word(outcome).parse()?;
    let lobby_type: LobbyType = lobby.parse()?;
    let game_mode: GameMode = mode.parse()?;

    Ok(Record {
        match_info: MatchInfo {
            duration,
            timestamp,
            lobby_type,
            game_mode,
        },
        result,
        record_name: title.trimmed_text(),
        hero_name,
        value: value.trimmed_text(),
    })
}

/// Splits `Shadow Fiend (41:07)` into the hero name and the bare duration.
fn split_hero_label(text: &str) -> Option<(String, &str)> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    let (duration, name) = tokens.split_last()?;
    let duration = duration.trim_start_matches('(').trim_end_matches(')');
    Some((name.join(" "), duration))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::scrapers::parse_document;
    use chrono::NaiveTime;

    fn record(title: &str, value: &str, hero: &str, details: &str) -> String {
        format!(
            r#"<div class="record"><div class="title">{title}</div><div class="value">{value}</div><div class="hero">{hero}</div><div class="details"><time datetime="2023-09-14T21:03:11+00:00"></time>{details}</div></div>"#
        )
    }

    fn records_page(records: &str) -> String {
        format!(
            r#"<html><body><div class="content-inner">
<article>summary</article><article>heroes</article><article>items</article>
<article>{records}</article>
</div></body></html>"#
        )
    }

    #[test]
    fn zips_parallel_lists() {
        let html = records_page(&format!(
            "{}{}",
            record("Most Kills", "27", "Shadow Fiend (41:07)", "Won Match, Ranked, All Pick"),
            record("Most Gold", "41,022", "Anti-Mage (1:05:33)", "Lost Match, Normal, Turbo"),
        ));

        let records = parse_document(&RecordsExtractor, &html).unwrap();
        assert_eq!(records.len(), 2);

        assert_eq!(records[0].record_name, "Most Kills");
        assert_eq!(records[0].value, "27");
        assert_eq!(records[0].hero_name, "Shadow Fiend");
        assert_eq!(records[0].result, GameResult::Won);
        assert_eq!(records[0].match_info.lobby_type, LobbyType::Ranked);
        assert_eq!(records[0].match_info.game_mode, GameMode::AllPick);
        assert_eq!(
            records[0].match_info.duration,
            NaiveTime::from_hms_opt(0, 41, 7).unwrap()
        );
        assert_eq!(
            records[0].match_info.timestamp.to_rfc3339(),
            "2023-09-14T21:03:11+00:00"
        );

        assert_eq!(records[1].hero_name, "Anti-Mage");
        assert_eq!(records[1].value, "41,022");
        assert_eq!(records[1].result, GameResult::Lost);
        assert_eq!(
            records[1].match_info.duration,
            NaiveTime::from_hms_opt(1, 5, 33).unwrap()
        );
    }

    #[test]
    fn details_need_three_segments() {
        let html = records_page(&record("Most Kills", "27", "Axe (30:00)", "Won Match, Ranked"));
        let err = parse_document(&RecordsExtractor, &html).unwrap_err();
        assert!(matches!(err, ProxyError::Parse { ref context, .. } if context.contains("record 0")));
    }

    #[test]
    fn missing_article_is_a_parse_error() {
        let html = r#"<div class="content-inner"><article></article></div>"#;
        let err = parse_document(&RecordsExtractor, html).unwrap_err();
        assert!(err.to_string().contains("records article"));
    }

    #[test]
    fn empty_records_article_is_a_parse_error() {
        let err = parse_document(&RecordsExtractor, &records_page("")).unwrap_err();
        assert!(matches!(err, ProxyError::Parse { ref context, .. } if context == "records: entries"));
    }

    #[test]
    fn uneven_lists_are_a_parse_error() {
        let html = records_page(&format!(
            "{}{}",
            record("Most Kills", "27", "Shadow Fiend (41:07)", "Won Match, Ranked, All Pick"),
            r#"<div class="record"><div class="title">Most Gold</div><div class="value">41,022</div></div>"#,
        ));

        let err = parse_document(&RecordsExtractor, &html).unwrap_err();
        match err {
            ProxyError::Parse { context, reason } => {
                assert_eq!(context, "records article");
                assert!(reason.contains("2/2/1/1"), "{reason}");
            }
            other => panic!("expected a parse error, got {other:?}"),
        }
    }

    #[test]
    fn hero_label_split() {
        assert_eq!(
            split_hero_label("Queen of Pain (12:34)"),
            Some(("Queen of Pain".to_string(), "12:34"))
        );
        assert_eq!(split_hero_label("   "), None);
    }
}
