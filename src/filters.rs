//! Client-side filtering, sorting and statistics
//!
//! Empty filter text disables that filter. All active filters must match.

use std::cmp::Reverse;
use std::collections::BTreeMap;

use chrono::DateTime;
use serde::{Deserialize, Serialize};

use forecast_rust_schema::{ClothingItem, OutfitPost};

/// Temperature window, in degrees, of the outfit temperature filter
pub const TEMPERATURE_TOLERANCE: f64 = 5.0;

/// Field of [`ClothingFilters`] addressed by [`ClothingFilters::set`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClothingField {
    Category,
    Size,
    Color,
    Season,
    SearchText,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClothingFilters {
    pub category: String,
    pub size: String,
    pub color: String,
    pub season: String,
    pub search_text: String,
}

impl ClothingFilters {
    pub fn set(&mut self, field: ClothingField, value: impl Into<String>) {
        let value = value.into();
        match field {
            ClothingField::Category => self.category = value,
            ClothingField::Size => self.size = value,
            ClothingField::Color => self.color = value,
            ClothingField::Season => self.season = value,
            ClothingField::SearchText => self.search_text = value,
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn matches(&self, item: &ClothingItem) -> bool {
        if !self.category.is_empty() && item.category != self.category {
            return false;
        }
        if !self.size.is_empty() && item.size != self.size {
            return false;
        }
        if !self.color.is_empty() && item.color != self.color {
            return false;
        }
        if !self.season.is_empty() && !item.season.iter().any(|s| s == &self.season) {
            return false;
        }
        if !self.search_text.is_empty() {
            let needle = self.search_text.to_lowercase();
            let hit = |text: &str| text.to_lowercase().contains(&needle);
            return hit(&item.name)
                || hit(&item.brand)
                || item.description.as_deref().map_or(false, hit);
        }
        true
    }

    /// Items matching every active filter, in their original order
    pub fn apply(&self, items: &[ClothingItem]) -> Vec<ClothingItem> {
        items
            .iter()
            .filter(|item| self.matches(item))
            .cloned()
            .collect()
    }
}

/// Order of filtered outfit posts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    #[default]
    Newest,
    Oldest,
    Likes,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutfitFilters {
    /// Target temperature as typed by the user; read up to the first non-numeric
    /// character, so `"12度"` targets 12 and `"warm"` disables the filter
    pub temperature: String,
    /// Substring of the post description
    pub weather: String,
    /// Comma separated; a post matches when it carries any of them
    pub tags: String,
    pub search_text: String,
    pub sort_by: SortBy,
}

impl OutfitFilters {
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    fn target_temperature(&self) -> Option<f64> {
        leading_number(&self.temperature)
    }

    pub fn matches(&self, post: &OutfitPost) -> bool {
        if let Some(target) = self.target_temperature() {
            if (post.temperature - target).abs() > TEMPERATURE_TOLERANCE {
                return false;
            }
        }
        if !self.weather.is_empty()
            && !post
                .description
                .to_lowercase()
                .contains(&self.weather.to_lowercase())
        {
            return false;
        }
        if !self.tags.is_empty() {
            let wanted: Vec<String> = self
                .tags
                .to_lowercase()
                .split(',')
                .map(|tag| tag.trim().to_string())
                .collect();
            let carried: Vec<String> = post.tags.iter().map(|t| t.to_lowercase()).collect();
            if !wanted.iter().any(|tag| carried.contains(tag)) {
                return false;
            }
        }
        if !self.search_text.is_empty() {
            let needle = self.search_text.to_lowercase();
            return post.description.to_lowercase().contains(&needle)
                || post.tags.iter().any(|t| t.to_lowercase().contains(&needle));
        }
        true
    }

    /// Matching posts in the selected order. Sorting is stable.
    pub fn apply(&self, posts: &[OutfitPost]) -> Vec<OutfitPost> {
        let mut result: Vec<OutfitPost> = posts
            .iter()
            .filter(|post| self.matches(post))
            .cloned()
            .collect();

        match self.sort_by {
            SortBy::Newest => result.sort_by_key(|post| Reverse(created_millis(post))),
            SortBy::Oldest => result.sort_by_key(created_millis),
            SortBy::Likes => result.sort_by_key(|post| Reverse(post.likes)),
        }
        result
    }
}

/// `createdAt` in epoch milliseconds; unparseable timestamps count as the epoch
fn created_millis(post: &OutfitPost) -> i64 {
    DateTime::parse_from_rfc3339(&post.created_at)
        .map(|time| time.timestamp_millis())
        .unwrap_or(0)
}

/// Closet counts per category, season and color
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClothingStats {
    pub total: usize,
    pub by_category: BTreeMap<String, usize>,
    pub by_season: BTreeMap<String, usize>,
    pub by_color: BTreeMap<String, usize>,
}

impl ClothingStats {
    pub fn from_items(items: &[ClothingItem]) -> Self {
        let mut stats = Self {
            total: items.len(),
            ..Self::default()
        };
        for item in items {
            *stats.by_category.entry(item.category.clone()).or_default() += 1;
            *stats.by_color.entry(item.color.clone()).or_default() += 1;
            for season in &item.season {
                *stats.by_season.entry(season.clone()).or_default() += 1;
            }
        }
        stats
    }
}

/// Longest numeric prefix of `text` after leading whitespace
fn leading_number(text: &str) -> Option<f64> {
    let text = text.trim_start();
    let end = text
        .char_indices()
        .take_while(|(_, c)| c.is_ascii_digit() || matches!(c, '.' | '+' | '-' | 'e' | 'E'))
        .map(|(i, c)| i + c.len_utf8())
        .last()?;
    (1..=end)
        .rev()
        .filter(|&i| text.is_char_boundary(i))
        .find_map(|i| text[..i].parse::<f64>().ok())
        .filter(|n| n.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use forecast_rust_schema::WeatherCondition;

    fn item(id: &str, category: &str, size: &str, color: &str, seasons: &[&str]) -> ClothingItem {
        ClothingItem {
            id: id.into(),
            user_id: "1".into(),
            name: format!("{} {}", color, category),
            kind: category.into(),
            color: color.into(),
            size: size.into(),
            season: seasons.iter().map(|s| s.to_string()).collect(),
            description: None,
            category: category.into(),
            brand: "Uniqlo".into(),
            warmth_level: 3,
            image_url: String::new(),
            created_at: "2024-01-01T00:00:00Z".into(),
            updated_at: None,
        }
    }

    fn closet() -> Vec<ClothingItem> {
        let mut coat = item("4", "outerwear", "L", "black", &["winter"]);
        coat.description = Some("Warm Wool coat".into());
        vec![
            item("1", "tops", "M", "white", &["spring", "summer"]),
            item("2", "tops", "L", "black", &["winter"]),
            item("3", "bottoms", "M", "black", &["autumn", "winter"]),
            coat,
        ]
    }

    fn post(id: &str, temperature: f64, likes: u32, created_at: &str, tags: &[&str]) -> OutfitPost {
        OutfitPost {
            id: id.into(),
            user_id: "1".into(),
            user_name: "テストユーザー".into(),
            title: String::new(),
            items: vec![],
            description: format!("Sunny day outfit {}", id),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            weather: WeatherCondition {
                temperature,
                feels_like: temperature,
                description: "晴れ".into(),
                wind_direction: 0.0,
                visibility: 10.0,
                uv_index: 1.0,
                condition: "sunny".into(),
                humidity: 40.0,
                wind_speed: 1.0,
                cloud_cover: 0.0,
                location: "東京".into(),
                date_time: created_at.into(),
                pressure: 1013.0,
            },
            temperature,
            location: "東京".into(),
            image_url: String::new(),
            created_at: created_at.into(),
            likes,
        }
    }

    fn timeline() -> Vec<OutfitPost> {
        vec![
            post("a", 10.0, 3, "2024-03-01T10:00:00Z", &["カジュアル", "春コーデ"]),
            post("b", 18.0, 9, "2024-05-01T10:00:00Z", &["オフィス"]),
            post("c", 22.0, 0, "2024-04-01T10:00:00Z", &["デート", "カジュアル"]),
            post("d", 30.0, 9, "not a date", &[]),
        ]
    }

    #[test]
    fn test_clothing_filters_require_every_active_field() {
        let items = closet();
        let mut filters = ClothingFilters::default();
        assert_eq!(filters.apply(&items).len(), 4);

        filters.set(ClothingField::Color, "black");
        filters.set(ClothingField::Season, "winter");
        let ids: Vec<_> = filters.apply(&items).into_iter().map(|i| i.id).collect();
        assert_eq!(ids, vec!["2", "3", "4"]);

        filters.set(ClothingField::Size, "L");
        for found in filters.apply(&items) {
            assert_eq!(found.color, "black");
            assert_eq!(found.size, "L");
            assert!(found.season.contains(&"winter".to_string()));
        }

        filters.set(ClothingField::SearchText, "WOOL");
        let ids: Vec<_> = filters.apply(&items).into_iter().map(|i| i.id).collect();
        assert_eq!(ids, vec!["4"]);

        filters.clear();
        filters.set(ClothingField::SearchText, "uniqlo");
        assert_eq!(filters.apply(&items).len(), 4);
    }

    #[test]
    fn test_temperature_filter_keeps_posts_within_five_degrees() {
        let posts = timeline();
        for target in [0.0, 13.0, 17.5, 25.0, 40.0] {
            let filters = OutfitFilters {
                temperature: target.to_string(),
                ..OutfitFilters::default()
            };
            for found in filters.apply(&posts) {
                assert!((found.temperature - target).abs() <= 5.0);
            }
        }

        let unparseable = OutfitFilters {
            temperature: "warm".into(),
            ..OutfitFilters::default()
        };
        assert_eq!(unparseable.apply(&posts).len(), posts.len());
    }

    #[test]
    fn test_temperature_with_unit_suffix_uses_leading_number() {
        let posts = timeline();
        for input in ["12度", "12c", " 12.0°C"] {
            let filters = OutfitFilters {
                temperature: input.into(),
                ..OutfitFilters::default()
            };
            let ids: Vec<_> = filters.apply(&posts).into_iter().map(|p| p.id).collect();
            assert_eq!(ids, vec!["a"], "input {:?}", input);
        }

        assert_eq!(leading_number("-3.5度"), Some(-3.5));
        assert_eq!(leading_number("1e1x"), Some(10.0));
        assert_eq!(leading_number("12-"), Some(12.0));
        assert_eq!(leading_number("度12"), None);
        assert_eq!(leading_number(""), None);
    }

    #[test]
    fn test_tag_and_text_filters() {
        let posts = timeline();
        let filters = OutfitFilters {
            tags: "デート, オフィス".into(),
            ..OutfitFilters::default()
        };
        let mut ids: Vec<_> = filters.apply(&posts).into_iter().map(|p| p.id).collect();
        ids.sort();
        assert_eq!(ids, vec!["b", "c"]);

        let filters = OutfitFilters {
            search_text: "春".into(),
            ..OutfitFilters::default()
        };
        let ids: Vec<_> = filters.apply(&posts).into_iter().map(|p| p.id).collect();
        assert_eq!(ids, vec!["a"]);

        let filters = OutfitFilters {
            weather: "SUNNY".into(),
            ..OutfitFilters::default()
        };
        assert_eq!(filters.apply(&posts).len(), 4);
    }

    #[test]
    fn test_sort_orders() {
        let posts = timeline();
        let mut filters = OutfitFilters::default();

        let newest: Vec<_> = filters.apply(&posts).iter().map(created_millis).collect();
        assert!(newest.windows(2).all(|w| w[0] >= w[1]));

        filters.sort_by = SortBy::Oldest;
        let oldest: Vec<_> = filters.apply(&posts).iter().map(created_millis).collect();
        assert!(oldest.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(oldest[0], 0);

        filters.sort_by = SortBy::Likes;
        let sorted = filters.apply(&posts);
        assert!(sorted.windows(2).all(|w| w[0].likes >= w[1].likes));
        let ids: Vec<_> = sorted.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "d", "a", "c"]);
    }

    #[test]
    fn test_stats() {
        let stats = ClothingStats::from_items(&closet());
        assert_eq!(stats.total, 4);
        assert_eq!(stats.by_category["tops"], 2);
        assert_eq!(stats.by_season["winter"], 3);
        assert_eq!(stats.by_color["black"], 3);
        assert_eq!(ClothingStats::from_items(&[]).total, 0);
    }
}
