use super::pagination::{DateWindow, PaginationAggregator};
use crate::domain::{Match, PlayerMatch, PlayerProfile, Record};
use crate::error::Result;
use crate::infrastructure::{
    parse_document, DotabuffClient, MatchDetailExtractor, MatchListExtractor, ProfileExtractor,
    RecordsExtractor,
};
use chrono::Local;
use tracing::info;

/// Fetches upstream pages and turns them into domain records.
pub struct DotabuffService {
    client: DotabuffClient,
    aggregator: PaginationAggregator,
}

impl DotabuffService {
    pub fn new(client: DotabuffClient, page_size: usize) -> Self {
        info!(page_size, "Created new Dotabuff service");
        Self {
            client,
            aggregator: PaginationAggregator::new(page_size),
        }
    }

    pub async fn get_match(&self, match_id: u64) -> Result<Match> {
        let body = self
            .client
            .fetch_document(&format!("matches/{match_id}"), &[])
            .await?;
        parse_document(&MatchDetailExtractor, &body)
    }

    pub async fn get_records(&self, player_id: u64) -> Result<Vec<Record>> {
        let body = self
            .client
            .fetch_document(&format!("players/{player_id}/records"), &[])
            .await?;
        parse_document(&RecordsExtractor, &body)
    }

    pub async fn get_profile(&self, player_id: u64) -> Result<PlayerProfile> {
        let body = self
            .client
            .fetch_document(&format!("players/{player_id}"), &[])
            .await?;
        parse_document(&ProfileExtractor, &body)
    }

    pub async fn get_matches(&self, player_id: u64, window: DateWindow) -> Result<Vec<PlayerMatch>> {
        let path = format!("players/{player_id}/matches");
        let path = path.as_str();
        let today = Local::now().date_naive();

        self.aggregator
            .collect(|page| self.fetch_match_page(path, page), window, today)
            .await
    }

    async fn fetch_match_page(&self, path: &str, page: u32) -> Result<Vec<PlayerMatch>> {
        let body = self
            .client
            .fetch_document(path, &[("page", page.to_string())])
            .await?;
        parse_document(&MatchListExtractor, &body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProxyError;
    use axum::extract::Query;
    use axum::http::StatusCode;
    use axum::response::Html;
    use axum::routing::get;
    use axum::Router;
    use chrono::NaiveDate;
    use std::collections::HashMap;

    const PAGE_SIZE: usize = 2;

    fn row(day: &str) -> String {
        format!(
            r#"<tr><td></td><td><a href="/matches/1">Lina</a></td><td></td><td><a href="/matches/1">Won Match</a><div><time datetime="{day}T10:00:00+00:00">ago</time></div></td><td>Ranked<div>All Pick</div></td><td>35:00</td><td>10/2/8</td></tr>"#
        )
    }

    async fn match_page(Query(params): Query<HashMap<String, String>>) -> Html<String> {
        let rows = match params.get("page").map(String::as_str) {
            Some("1") => row("2024-03-20") + &row("2024-03-19"),
            Some("2") => row("2024-03-18"),
            _ => String::new(),
        };
        Html(format!("<html><body><table><tbody>{rows}</tbody></table></body></html>"))
    }

    async fn spawn_upstream() -> DotabuffService {
        let app = Router::new()
            .route("/players/:player_id/matches", get(match_page))
            .route("/players/:player_id", get(|| async { StatusCode::TOO_MANY_REQUESTS }))
            .route("/matches/:match_id", get(|| async { StatusCode::NOT_FOUND }));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });

        let client = DotabuffClient::new(reqwest::Client::new(), &format!("http://{addr}"));
        DotabuffService::new(client, PAGE_SIZE)
    }

    #[tokio::test]
    async fn get_matches_walks_pages_and_filters() {
        let service = spawn_upstream().await;
        let window = DateWindow {
            start_date: NaiveDate::from_ymd_opt(2024, 3, 1),
            end_date: NaiveDate::from_ymd_opt(2024, 3, 19),
        };

        let matches = service.get_matches(42, window).await.unwrap();
        let days: Vec<u32> = matches.iter().map(|m| chrono::Datelike::day(&m.date())).collect();
        assert_eq!(days, vec![19, 18]);
        assert_eq!(matches[0].hero.hero_name, "Lina");
    }

    #[tokio::test]
    async fn upstream_statuses_surface_as_typed_errors() {
        let service = spawn_upstream().await;

        assert!(matches!(service.get_match(1).await, Err(ProxyError::NotFound(_))));
        assert!(matches!(service.get_profile(1).await, Err(ProxyError::RateLimited)));
    }
}
