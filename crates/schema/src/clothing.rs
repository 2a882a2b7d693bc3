//! Closet items

use serde::{Deserialize, Serialize};

use crate::schema::{Schema, Validated};

/// A garment owned by one user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClothingItem {
    pub id: String,
    pub user_id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub color: String,
    pub size: String,
    pub season: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub category: String,
    pub brand: String,
    pub warmth_level: u8,
    pub image_url: String,
    pub created_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl Validated for ClothingItem {
    fn schema() -> Schema {
        Schema::object()
            .field("id", Schema::string())
            .field("userId", Schema::string())
            .field("name", Schema::string())
            .field("type", Schema::string())
            .field("color", Schema::string())
            .field("size", Schema::string())
            .field("season", Schema::array(Schema::string()))
            .optional("description", Schema::string())
            .field("category", Schema::string())
            .field("brand", Schema::string())
            .field("warmthLevel", Schema::number().int().min(0.0).max(10.0))
            .field("imageUrl", Schema::string())
            .field("createdAt", Schema::string())
            .optional("updatedAt", Schema::string())
    }
}

/// An item as entered by the user, before the backend assigns id and timestamps
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewClothingItem {
    pub user_id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub color: String,
    pub size: String,
    pub season: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub category: String,
    pub brand: String,
    pub warmth_level: u8,
    pub image_url: String,
}

impl NewClothingItem {
    /// The subset of fields checked by [`CreateClothingRequest`]
    pub fn create_request(&self) -> CreateClothingRequest {
        CreateClothingRequest {
            name: self.name.clone(),
            category: self.category.clone(),
            color: self.color.clone(),
            brand: self.brand.clone(),
            image_url: self.image_url.clone(),
            warmth_level: self.warmth_level,
        }
    }
}

/// Body of a create request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateClothingRequest {
    pub name: String,
    pub category: String,
    pub color: String,
    pub brand: String,
    pub image_url: String,
    pub warmth_level: u8,
}

impl Validated for CreateClothingRequest {
    fn schema() -> Schema {
        Schema::object()
            .field("name", Schema::string().min_len(1))
            .field("category", Schema::string().min_len(1))
            .field("color", Schema::string().min_len(1))
            .field("brand", Schema::string().min_len(1))
            .field("imageUrl", Schema::string().url())
            .field("warmthLevel", Schema::number().min(0.0).max(10.0))
    }
}

/// Partial update of a closet item
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClothingUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub season: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warmth_level: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClothingCategory {
    pub id: String,
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{check, parse};
    use serde_json::json;

    #[test]
    fn test_create_request_without_warmth_level_names_field() {
        let errors = parse::<CreateClothingRequest>(json!({
            "name": "ダウンジャケット",
            "category": "アウター",
            "color": "black",
            "brand": "ユニクロ",
            "imageUrl": "https://img.example.com/down.png"
        }))
        .unwrap_err();
        assert!(errors.has_field("warmthLevel"));
        assert!(errors.to_string().contains("warmthLevel"));
    }

    #[test]
    fn test_create_request_bounds() {
        let mut req = CreateClothingRequest {
            name: "T".into(),
            category: "トップス".into(),
            color: "white".into(),
            brand: "GU".into(),
            image_url: "https://img.example.com/t.png".into(),
            warmth_level: 10,
        };
        assert!(check(&req).is_ok());
        req.warmth_level = 11;
        assert!(check(&req).unwrap_err().has_field("warmthLevel"));
    }

    #[test]
    fn test_item_round_trips_type_field() {
        let value = json!({
            "id": "c1",
            "userId": "1",
            "name": "シャツ",
            "type": "shirt",
            "color": "blue",
            "size": "M",
            "season": ["spring", "autumn"],
            "category": "tops",
            "brand": "無印良品",
            "warmthLevel": 3,
            "imageUrl": "",
            "createdAt": "2024-03-01T00:00:00Z"
        });
        let item: ClothingItem = parse(value.clone()).unwrap();
        assert_eq!(item.kind, "shirt");
        assert_eq!(serde_json::to_value(&item).unwrap(), value);
    }
}
