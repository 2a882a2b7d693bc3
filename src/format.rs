//! Display formatting in the app's Japanese conventions

use chrono::{DateTime, Datelike, FixedOffset, Timelike};

use forecast_rust_schema::OutfitPost;

/// Round half up, the way the web UI rounds for display
fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

fn parse_timestamp(value: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(value).ok()
}

/// `21.6` → `22°C`
pub fn temperature(value: f64) -> String {
    format!("{}°C", round_half_up(value))
}

/// One decimal at most: `3.25` → `3.3 m/s`, `3.0` → `3 m/s`
pub fn wind_speed(value: f64) -> String {
    format!("{} m/s", round_half_up(value * 10.0) / 10.0)
}

pub fn humidity(value: f64) -> String {
    format!("{}%", round_half_up(value))
}

/// `YYYY年M月D日 HH:MM` in the timestamp's own offset; unparseable input is returned as is
pub fn date_time(value: &str) -> String {
    match parse_timestamp(value) {
        Some(time) => format!(
            "{}年{}月{}日 {:02}:{:02}",
            time.year(),
            time.month(),
            time.day(),
            time.hour(),
            time.minute()
        ),
        None => value.to_string(),
    }
}

/// `YYYY年M月D日`; unparseable input is returned as is
pub fn date(value: &str) -> String {
    match parse_timestamp(value) {
        Some(time) => format!("{}年{}月{}日", time.year(), time.month(), time.day()),
        None => value.to_string(),
    }
}

/// Summary line data for an outfit card
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutfitDisplay {
    pub formatted_date: String,
    /// `"{temperature}°C、{condition}"`
    pub weather_summary: String,
    pub item_count: usize,
}

impl From<&OutfitPost> for OutfitDisplay {
    fn from(post: &OutfitPost) -> Self {
        Self {
            formatted_date: date(&post.created_at),
            weather_summary: format!(
                "{}、{}",
                temperature(post.temperature),
                post.weather.condition
            ),
            item_count: post.items.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbers() {
        assert_eq!(temperature(21.5), "22°C");
        assert_eq!(temperature(-2.5), "-2°C");
        assert_eq!(wind_speed(3.25), "3.3 m/s");
        assert_eq!(wind_speed(3.0), "3 m/s");
        assert_eq!(humidity(54.4), "54%");
    }

    #[test]
    fn test_dates() {
        assert_eq!(date_time("2024-05-01T09:05:00+09:00"), "2024年5月1日 09:05");
        assert_eq!(date("2024-12-24T23:00:00Z"), "2024年12月24日");
        assert_eq!(date("yesterday"), "yesterday");
    }
}
