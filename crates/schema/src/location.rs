use serde::{Deserialize, Serialize};

use crate::schema::{Schema, Validated};

/// A named point used as the query key for weather and recommendations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub lat: f64,
    pub lon: f64,
    pub name: String,
}

impl Location {
    pub fn new(lat: f64, lon: f64, name: impl Into<String>) -> Self {
        Self {
            lat,
            lon,
            name: name.into(),
        }
    }

    /// Same coordinates, regardless of name
    pub fn same_place(&self, other: &Location) -> bool {
        self.lat == other.lat && self.lon == other.lon
    }
}

impl Validated for Location {
    fn schema() -> Schema {
        Schema::object()
            .field("lat", Schema::number())
            .field("lon", Schema::number())
            .field("name", Schema::string())
    }
}
