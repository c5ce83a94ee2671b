mod clients;
mod scrapers;

pub use clients::dotabuff::DotabuffClient;
pub use scrapers::{
    match_detail::MatchDetailExtractor, match_list::MatchListExtractor, parse_document,
    profile::ProfileExtractor, records::RecordsExtractor,
};
