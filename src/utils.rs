use crate::error::{ProxyError, Result};
use chrono::NaiveTime;

/// Decodes an elapsed time rendered as `MM:SS` or `HH:MM:SS`.
pub fn parse_duration(raw: &str) -> Result<NaiveTime> {
    let invalid = || ProxyError::Decode(format!("invalid duration '{raw}'"));

    let segments = raw
        .trim()
        .split(':')
        .map(|segment| segment.trim().parse::<u32>())
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|_| invalid())?;

    let (hours, minutes, seconds) = match segments.as_slice() {
        [minutes, seconds] => (0, *minutes, *seconds),
        [hours, minutes, seconds] => (*hours, *minutes, *seconds),
        _ => return Err(invalid()),
    };

    NaiveTime::from_hms_opt(hours, minutes, seconds).ok_or_else(invalid)
}

/// Decodes the site's magnitude shorthand, e.g. `24.1k` -> 24100 and `-` -> 0.
///
/// Only the first digit after the separator is read, so precision stops at
/// hundreds. Values without a separator are read as plain integers.
pub fn parse_magnitude(raw: &str) -> Result<u64> {
    let invalid = || ProxyError::Decode(format!("invalid magnitude value '{raw}'"));

    let cleaned = raw.trim().replace(['k', 'K'], "");
    let cleaned = if cleaned == "-" {
        "0.0".to_string()
    } else {
        cleaned
    };

    match cleaned.split_once('.') {
        Some((thousands, tenths)) => {
            let thousands: u64 = thousands.parse().map_err(|_| invalid())?;
            let tenths = tenths
                .chars()
                .next()
                .and_then(|digit| digit.to_digit(10))
                .ok_or_else(invalid)?;
            thousands
                .checked_mul(1000)
                .and_then(|value| value.checked_add(u64::from(tenths) * 100))
                .ok_or_else(invalid)
        }
        None => cleaned.parse().map_err(|_| invalid()),
    }
}

/// Turns a URL slug such as `anti-mage` into a display name (`Anti Mage`).
pub fn humanize_slug(slug: &str) -> String {
    slug.split('-')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// Reads a count column. Thousands separators are dropped and a bare `-` means zero.
pub fn parse_count(raw: &str) -> Result<u32> {
    let cleaned = raw.trim().replace(',', "");
    if cleaned == "-" {
        return Ok(0);
    }
    cleaned
        .parse()
        .map_err(|_| ProxyError::Decode(format!("invalid count '{raw}'")))
}

pub fn parse_percentage(raw: &str) -> Result<f64> {
    raw.trim()
        .trim_end_matches('%')
        .trim()
        .parse()
        .map_err(|_| ProxyError::Decode(format!("invalid percentage '{raw}'")))
}

pub fn parse_decimal(raw: &str) -> Result<f64> {
    raw.trim()
        .parse()
        .map_err(|_| ProxyError::Decode(format!("invalid number '{raw}'")))
}

pub fn first_word(text: &str) -> &str {
    text.split_whitespace().next().unwrap_or_default()
}

/// Trailing segment of a link path, e.g. `/players/123` -> `123`.
pub fn last_path_segment(href: &str) -> &str {
    href.trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or_default()
}
