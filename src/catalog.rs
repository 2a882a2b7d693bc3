//! Fixed option lists offered by the app's forms

use forecast_rust_schema::ClothingCategory;

const CATEGORY_NAMES: [&str; 21] = [
    "トップス",
    "ボトムス",
    "アウター",
    "シューズ",
    "アクセサリー",
    "冬服",
    "防寒具",
    "秋冬服",
    "ジャケット",
    "春秋服",
    "カーディガン",
    "春夏服",
    "夏服",
    "Tシャツ",
    "レインコート",
    "長靴",
    "スノーブーツ",
    "手袋",
    "サングラス",
    "帽子",
    "ウインドブレーカー",
];

/// Clothing categories; the id of each is its position in the list
pub fn clothing_categories() -> Vec<ClothingCategory> {
    CATEGORY_NAMES
        .iter()
        .enumerate()
        .map(|(idx, name)| ClothingCategory {
            id: idx.to_string(),
            name: name.to_string(),
        })
        .collect()
}

/// A numbered option with a display label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WarmthLevel {
    pub value: u8,
    pub label: &'static str,
}

pub const WARMTH_LEVELS: [WarmthLevel; 5] = [
    WarmthLevel { value: 1, label: "非常に涼しい" },
    WarmthLevel { value: 2, label: "涼しい" },
    WarmthLevel { value: 3, label: "普通" },
    WarmthLevel { value: 4, label: "暖かい" },
    WarmthLevel { value: 5, label: "非常に暖かい" },
];

pub const BRAND_SUGGESTIONS: [&str; 9] = [
    "ユニクロ",
    "GU",
    "ZARA",
    "H&M",
    "無印良品",
    "ナイキ",
    "アディダス",
    "自作・ハンドメイド",
    "その他",
];

pub const POPULAR_TAGS: [&str; 16] = [
    "今日のコーデ",
    "プチプラ",
    "オフィス",
    "デート",
    "お出かけ",
    "カジュアル",
    "きれいめ",
    "寒さ対策",
    "雨の日",
    "春コーデ",
    "夏コーデ",
    "秋コーデ",
    "冬コーデ",
    "モノトーン",
    "カラフル",
    "シンプル",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FashionStyle {
    pub value: &'static str,
    pub label: &'static str,
}

pub const FASHION_STYLES: [FashionStyle; 5] = [
    FashionStyle { value: "casual", label: "カジュアル" },
    FashionStyle { value: "formal", label: "フォーマル" },
    FashionStyle { value: "sporty", label: "スポーティー" },
    FashionStyle { value: "warm", label: "防寒重視" },
    FashionStyle { value: "cool", label: "涼しさ重視" },
];

pub const COLOR_PREFERENCES: [&str; 12] = [
    "ブラック",
    "ホワイト",
    "グレー",
    "ネイビー",
    "ブラウン",
    "ベージュ",
    "レッド",
    "ブルー",
    "グリーン",
    "イエロー",
    "ピンク",
    "パープル",
];

/// Temperature band used by the recommendation form, in °C
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TemperatureRange {
    pub min: f64,
    pub max: f64,
    pub label: &'static str,
}

impl TemperatureRange {
    /// `min <= temperature < max`
    pub fn contains(&self, temperature: f64) -> bool {
        temperature >= self.min && temperature < self.max
    }
}

pub const TEMPERATURE_RANGES: [TemperatureRange; 5] = [
    TemperatureRange { min: -999.0, max: 0.0, label: "極寒（0°C以下）" },
    TemperatureRange { min: 0.0, max: 10.0, label: "寒い（0-10°C）" },
    TemperatureRange { min: 10.0, max: 20.0, label: "涼しい（10-20°C）" },
    TemperatureRange { min: 20.0, max: 25.0, label: "快適（20-25°C）" },
    TemperatureRange { min: 25.0, max: 999.0, label: "暑い（25°C以上）" },
];

/// Band a temperature falls into, if any
pub fn temperature_range(temperature: f64) -> Option<&'static TemperatureRange> {
    TEMPERATURE_RANGES.iter().find(|range| range.contains(temperature))
}

/// Japanese label of a weather condition code
pub fn weather_description(condition: &str) -> &'static str {
    match condition {
        "sunny" => "晴れ",
        "cloudy" => "曇り",
        "rainy" => "雨",
        "snowy" => "雪",
        "clear" => "快晴",
        "overcast" => "曇天",
        "drizzle" => "小雨",
        "thunderstorm" => "雷雨",
        "fog" => "霧",
        "windy" => "強風",
        _ => "不明",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_ids_are_positions() {
        let categories = clothing_categories();
        assert_eq!(categories.len(), 21);
        assert_eq!(categories[0].id, "0");
        assert_eq!(categories[0].name, "トップス");
        assert_eq!(categories[20].id, "20");
        assert_eq!(categories[20].name, "ウインドブレーカー");
    }

    #[test]
    fn test_temperature_ranges() {
        assert_eq!(temperature_range(-3.0).unwrap().label, "極寒（0°C以下）");
        assert_eq!(temperature_range(10.0).unwrap().label, "涼しい（10-20°C）");
        assert_eq!(temperature_range(24.9).unwrap().label, "快適（20-25°C）");
        assert!(temperature_range(1200.0).is_none());
    }

    #[test]
    fn test_weather_description() {
        assert_eq!(weather_description("drizzle"), "小雨");
        assert_eq!(weather_description("hail"), "不明");
    }
}
