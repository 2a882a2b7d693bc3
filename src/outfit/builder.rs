//! Local outfit composition and pre-submit checks

use forecast_rust_schema::{ClothingItem, CreateOutfitPostRequest};

/// Longest description accepted for a post, in characters
pub const MAX_DESCRIPTION_CHARS: usize = 500;

/// Check a post before submitting it; an empty result means it is acceptable
pub fn validate_outfit_post(outfit: &CreateOutfitPostRequest) -> Vec<String> {
    let mut errors = Vec::new();

    if outfit.items.is_empty() {
        errors.push("少なくとも1つのアイテムが必要です".to_string());
    }
    if outfit.description.trim().is_empty() {
        errors.push("コーディネートの説明が必要です".to_string());
    }
    if outfit.description.chars().count() > MAX_DESCRIPTION_CHARS {
        errors.push("説明は500文字以内で入力してください".to_string());
    }
    if outfit.location.trim().is_empty() {
        errors.push("場所の情報が必要です".to_string());
    }

    errors
}

/// Slot an item occupies in an outfit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutfitSlot {
    Top,
    Bottom,
    Shoes,
    Outerwear,
    Accessories,
}

impl OutfitSlot {
    /// Slot for a clothing category; unknown categories have none
    pub fn for_category(category: &str) -> Option<Self> {
        match category {
            "tops" | "shirts" => Some(OutfitSlot::Top),
            "bottoms" | "pants" | "skirts" => Some(OutfitSlot::Bottom),
            "shoes" => Some(OutfitSlot::Shoes),
            "outerwear" | "jackets" => Some(OutfitSlot::Outerwear),
            "accessories" => Some(OutfitSlot::Accessories),
            _ => None,
        }
    }
}

/// One item per slot plus any number of accessories
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OutfitBuilder {
    pub top: Option<ClothingItem>,
    pub bottom: Option<ClothingItem>,
    pub shoes: Option<ClothingItem>,
    pub outerwear: Option<ClothingItem>,
    pub accessories: Vec<ClothingItem>,
}

impl OutfitBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Put `item` into its slot, replacing the previous occupant.
    ///
    /// Returns false when the category maps to no slot.
    pub fn add(&mut self, item: ClothingItem) -> bool {
        match OutfitSlot::for_category(&item.category) {
            Some(OutfitSlot::Top) => self.top = Some(item),
            Some(OutfitSlot::Bottom) => self.bottom = Some(item),
            Some(OutfitSlot::Shoes) => self.shoes = Some(item),
            Some(OutfitSlot::Outerwear) => self.outerwear = Some(item),
            Some(OutfitSlot::Accessories) => {
                self.accessories.retain(|acc| acc.id != item.id);
                self.accessories.push(item);
            }
            None => return false,
        }
        true
    }

    /// Empty a slot. For accessories only the item with `item_id` is removed.
    pub fn remove(&mut self, slot: OutfitSlot, item_id: Option<&str>) {
        match slot {
            OutfitSlot::Top => self.top = None,
            OutfitSlot::Bottom => self.bottom = None,
            OutfitSlot::Shoes => self.shoes = None,
            OutfitSlot::Outerwear => self.outerwear = None,
            OutfitSlot::Accessories => {
                if let Some(id) = item_id {
                    self.accessories.retain(|acc| acc.id != id);
                }
            }
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Items in wearing order: top, bottom, shoes, outerwear, accessories
    pub fn items(&self) -> Vec<ClothingItem> {
        [&self.top, &self.bottom, &self.shoes, &self.outerwear]
            .into_iter()
            .flatten()
            .cloned()
            .chain(self.accessories.iter().cloned())
            .collect()
    }

    /// Top, bottom and shoes are all chosen
    pub fn is_complete(&self) -> bool {
        self.top.is_some() && self.bottom.is_some() && self.shoes.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use forecast_rust_schema::WeatherCondition;

    fn item(id: &str, category: &str) -> ClothingItem {
        ClothingItem {
            id: id.into(),
            user_id: "1".into(),
            name: id.into(),
            kind: category.into(),
            color: "black".into(),
            size: "M".into(),
            season: vec![],
            description: None,
            category: category.into(),
            brand: "GU".into(),
            warmth_level: 3,
            image_url: String::new(),
            created_at: "2024-01-01T00:00:00Z".into(),
            updated_at: None,
        }
    }

    #[test]
    fn test_builder_slots_and_completion() {
        let mut builder = OutfitBuilder::new();
        assert!(builder.add(item("t1", "tops")));
        assert!(builder.add(item("b1", "pants")));
        assert!(!builder.is_complete());
        assert!(builder.add(item("s1", "shoes")));
        assert!(builder.is_complete());

        assert!(builder.add(item("t2", "shirts")));
        assert_eq!(builder.top.as_ref().unwrap().id, "t2");
        assert!(!builder.add(item("x", "socks")));
    }

    #[test]
    fn test_accessories_are_deduplicated_and_removed_by_id() {
        let mut builder = OutfitBuilder::new();
        builder.add(item("a1", "accessories"));
        builder.add(item("a2", "accessories"));
        builder.add(item("a1", "accessories"));
        assert_eq!(builder.accessories.len(), 2);

        builder.remove(OutfitSlot::Accessories, Some("a1"));
        let ids: Vec<_> = builder.items().into_iter().map(|i| i.id).collect();
        assert_eq!(ids, vec!["a2"]);

        builder.clear();
        assert!(builder.items().is_empty());
    }

    #[test]
    fn test_items_order() {
        let mut builder = OutfitBuilder::new();
        builder.add(item("acc", "accessories"));
        builder.add(item("jk", "jackets"));
        builder.add(item("sh", "shoes"));
        builder.add(item("tp", "tops"));
        let ids: Vec<_> = builder.items().into_iter().map(|i| i.id).collect();
        assert_eq!(ids, vec!["tp", "sh", "jk", "acc"]);
    }

    #[test]
    fn test_validate_outfit_post() {
        let weather = WeatherCondition {
            temperature: 20.0,
            feels_like: 20.0,
            description: "晴れ".into(),
            wind_direction: 0.0,
            visibility: 10.0,
            uv_index: 3.0,
            condition: "sunny".into(),
            humidity: 50.0,
            wind_speed: 1.0,
            cloud_cover: 0.0,
            location: "東京".into(),
            date_time: "2024-05-01T09:00:00Z".into(),
            pressure: 1013.0,
        };
        let mut post = CreateOutfitPostRequest {
            title: None,
            items: vec![],
            description: "  ".into(),
            tags: vec![],
            weather,
            temperature: 20.0,
            location: "".into(),
            image_url: "https://img.example.com/p.png".into(),
        };
        assert_eq!(validate_outfit_post(&post).len(), 3);

        post.items.push("c1".into());
        post.description = "あ".repeat(501);
        post.location = "東京".into();
        assert_eq!(
            validate_outfit_post(&post),
            vec!["説明は500文字以内で入力してください".to_string()]
        );

        post.description = "あ".repeat(500);
        assert!(validate_outfit_post(&post).is_empty());
    }
}
