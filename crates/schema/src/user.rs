//! ユーザーと認証のペイロード

use serde::{Deserialize, Deserializer, Serialize};

use crate::schema::{Schema, Validated};

/// Unit used when displaying temperatures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureUnit {
    #[default]
    Celsius,
    Fahrenheit,
}

/// Profile visibility
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Privacy {
    #[default]
    Public,
    Private,
}

fn default_true() -> bool {
    true
}

/// `null` reads the same as an absent field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn null_as_true<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(true))
}

/// ユーザー設定
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPreferences {
    pub styles: Vec<String>,
    pub colors: Vec<String>,
    pub preferred_colors: Vec<String>,
    pub preferred_brands: Vec<String>,
    pub style: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_location: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub temperature_unit: TemperatureUnit,
    #[serde(default = "default_true", deserialize_with = "null_as_true")]
    pub notifications: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub privacy: Privacy,
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            styles: Vec::new(),
            colors: Vec::new(),
            preferred_colors: Vec::new(),
            preferred_brands: Vec::new(),
            style: "casual".to_string(),
            default_location: None,
            temperature_unit: TemperatureUnit::Celsius,
            notifications: true,
            privacy: Privacy::Public,
        }
    }
}

impl Validated for UserPreferences {
    fn schema() -> Schema {
        let strings = || Schema::array(Schema::string());
        Schema::object()
            .field("styles", strings())
            .field("colors", strings())
            .field("preferredColors", strings())
            .field("preferredBrands", strings())
            .field("style", Schema::string())
            .optional("defaultLocation", Schema::string())
            .optional("temperatureUnit", Schema::one_of(&["celsius", "fahrenheit"]))
            .optional("notifications", Schema::boolean())
            .optional("privacy", Schema::one_of(&["public", "private"]))
    }
}

/// ユーザー基本情報
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferences: Option<UserPreferences>,
    pub created_at: String,
    pub updated_at: String,
}

impl Validated for User {
    fn schema() -> Schema {
        Schema::object()
            .field("id", Schema::string())
            .field("name", Schema::string())
            .field("email", Schema::string().email())
            .optional("gender", Schema::string())
            .optional("age", Schema::number().int().min(0.0))
            .optional("location", Schema::string())
            .optional("bio", Schema::string())
            .optional("preferences", UserPreferences::schema())
            .field("createdAt", Schema::string())
            .field("updatedAt", Schema::string())
    }
}

/// Partial profile update; absent fields are left untouched by the backend
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferences: Option<UserPreferences>,
}

impl ProfileUpdate {
    /// Apply the present fields to `user`
    pub fn apply_to(&self, user: &User) -> User {
        let mut updated = user.clone();
        if let Some(name) = &self.name {
            updated.name = name.clone();
        }
        if self.gender.is_some() {
            updated.gender = self.gender.clone();
        }
        if self.age.is_some() {
            updated.age = self.age;
        }
        if self.location.is_some() {
            updated.location = self.location.clone();
        }
        if self.bio.is_some() {
            updated.bio = self.bio.clone();
        }
        if self.preferences.is_some() {
            updated.preferences = self.preferences.clone();
        }
        updated
    }
}

/// ログイン認証情報
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl Validated for LoginRequest {
    fn schema() -> Schema {
        Schema::object()
            .field("email", Schema::string().email())
            .field("password", Schema::string().min_len(1))
    }
}

/// 新規登録情報
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
}

impl Validated for RegisterRequest {
    fn schema() -> Schema {
        Schema::object()
            .field("name", Schema::string().min_len(1))
            .field("email", Schema::string().email())
            .field("password", Schema::string().min_len(6))
            .optional("gender", Schema::string())
            .optional("age", Schema::number().int().min(0.0))
    }
}

/// Token and user returned by login and registration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub user: User,
    pub token: String,
}

impl Validated for AuthResponse {
    fn schema() -> Schema {
        Schema::object()
            .field("user", User::schema())
            .field("token", Schema::string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{check, parse};
    use serde_json::json;

    #[test]
    fn test_user_parses_with_minimal_preferences() {
        let value = json!({
            "id": "1",
            "name": "テストユーザー",
            "email": "test@example.com",
            "preferences": {
                "styles": ["casual"],
                "colors": [],
                "preferredColors": [],
                "preferredBrands": [],
                "style": "casual"
            },
            "createdAt": "2024-01-01T00:00:00Z",
            "updatedAt": "2024-01-01T00:00:00Z"
        });
        let user: User = parse(value).unwrap();
        let prefs = user.preferences.unwrap();
        assert_eq!(prefs.temperature_unit, TemperatureUnit::Celsius);
        assert!(prefs.notifications);
        assert_eq!(prefs.privacy, Privacy::Public);
    }

    #[test]
    fn test_null_preferences_read_as_defaults() {
        let value = json!({
            "id": "1",
            "name": "テストユーザー",
            "email": "test@example.com",
            "preferences": {
                "styles": [],
                "colors": [],
                "preferredColors": [],
                "preferredBrands": [],
                "style": "casual",
                "temperatureUnit": null,
                "notifications": null,
                "privacy": null
            },
            "createdAt": "2024-01-01T00:00:00Z",
            "updatedAt": "2024-01-01T00:00:00Z"
        });
        let prefs = parse::<User>(value).unwrap().preferences.unwrap();
        assert_eq!(prefs.temperature_unit, TemperatureUnit::Celsius);
        assert!(prefs.notifications);
        assert_eq!(prefs.privacy, Privacy::Public);
    }

    #[test]
    fn test_explicit_preferences_are_kept() {
        let value = json!({
            "styles": [],
            "colors": [],
            "preferredColors": [],
            "preferredBrands": [],
            "style": "mode",
            "temperatureUnit": "fahrenheit",
            "notifications": false,
            "privacy": "private"
        });
        let prefs: UserPreferences = parse(value).unwrap();
        assert_eq!(prefs.temperature_unit, TemperatureUnit::Fahrenheit);
        assert!(!prefs.notifications);
        assert_eq!(prefs.privacy, Privacy::Private);
    }

    #[test]
    fn test_register_password_too_short() {
        let req = RegisterRequest {
            name: "a".into(),
            email: "a@example.com".into(),
            password: "12345".into(),
            gender: None,
            age: None,
        };
        let errors = check(&req).unwrap_err();
        assert!(errors.has_field("password"));
    }

    #[test]
    fn test_profile_update_skips_absent_fields() {
        let update = ProfileUpdate {
            bio: Some("hello".into()),
            ..Default::default()
        };
        assert_eq!(serde_json::to_value(&update).unwrap(), json!({ "bio": "hello" }));
    }
}
