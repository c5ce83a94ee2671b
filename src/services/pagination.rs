use crate::domain::PlayerMatch;
use crate::error::{ProxyError, Result};
use chrono::NaiveDate;
use serde::Deserialize;
use std::future::Future;
use tracing::{debug, info};

/// Inclusive date bounds requested by a caller. Missing bounds are resolved
/// after all pages are fetched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct DateWindow {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

/// Walks a player's match list page by page until the requested window is covered.
#[derive(Debug, Clone, Copy)]
pub struct PaginationAggregator {
    page_size: usize,
}

impl PaginationAggregator {
    pub fn new(page_size: usize) -> Self {
        Self { page_size }
    }

    /// Pages are fetched one after another starting at 1. Each page must be
    /// ordered newest first. Without a start date only page 1 is fetched.
    /// A page without matches is a parse failure, never an empty window.
    pub async fn collect<F, Fut>(
        &self,
        mut fetch_page: F,
        window: DateWindow,
        today: NaiveDate,
    ) -> Result<Vec<PlayerMatch>>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<Vec<PlayerMatch>>>,
    {
        let mut collected = Vec::new();
        let mut page = 1;

        loop {
            let matches = fetch_page(page).await?;
            let Some(oldest) = matches.last().map(PlayerMatch::date) else {
                return Err(ProxyError::missing(format!("match list page {page}: rows")));
            };
            let full_page = matches.len() == self.page_size;
            debug!(page, count = matches.len(), ?oldest, "Fetched match page");
            collected.extend(matches);

            let keep_going = window
                .start_date
                .is_some_and(|start_date| oldest >= start_date && full_page);
            if !keep_going {
                break;
            }
            page += 1;
        }

        let start_date = window
            .start_date
            .or_else(|| collected.iter().map(PlayerMatch::date).min())
            .ok_or_else(|| ProxyError::missing("match list: rows"))?;
        let end_date = window.end_date.unwrap_or(today);

        let in_window: Vec<PlayerMatch> = collected
            .into_iter()
            .filter(|m| (start_date..=end_date).contains(&m.date()))
            .collect();

        info!(
            pages = page,
            matches = in_window.len(),
            %start_date,
            %end_date,
            "Collected matches in window"
        );
        Ok(in_window)
    }
}
