use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::geo::{
    LatLng, PartialLatLng, coordinate_or_zero, lenient_coordinate, lenient_position,
    resolve_position,
};

pub const INITIAL_ZOOM: f64 = 6.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
    #[serde(default, deserialize_with = "lenient_or_default")]
    pub title: String,
    /// Missing or unreadable coordinates become `0`.
    #[serde(default, deserialize_with = "coordinate_or_zero")]
    pub lat: f64,
    #[serde(default, deserialize_with = "coordinate_or_zero")]
    pub lng: f64,
}

impl City {
    pub const fn position(&self) -> LatLng {
        LatLng::new(self.lat, self.lng)
    }
}

/// A display field that listing feeds send either as a number or as text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DisplayValue {
    Integer(i64),
    Decimal(f64),
    Text(String),
}

impl Default for DisplayValue {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

impl fmt::Display for DisplayValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(v) => write!(f, "{v}"),
            Self::Decimal(v) => write!(f, "{v}"),
            Self::Text(v) => f.write_str(v),
        }
    }
}

impl From<&str> for DisplayValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<i64> for DisplayValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Property {
    #[serde(rename = "type", default, deserialize_with = "lenient_or_default")]
    pub kind: String,
    #[serde(default, deserialize_with = "lenient_or_default")]
    pub price: DisplayValue,
    #[serde(default, deserialize_with = "lenient_or_default")]
    pub address: String,
    #[serde(default, deserialize_with = "lenient_or_default")]
    pub bed: DisplayValue,
    #[serde(default, deserialize_with = "lenient_or_default")]
    pub bath: DisplayValue,
    #[serde(default, deserialize_with = "lenient_or_default")]
    pub size: DisplayValue,
    #[serde(default, deserialize_with = "lenient_or_default")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient_coordinate")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(default, deserialize_with = "lenient_coordinate")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lng: Option<f64>,
    #[serde(default, deserialize_with = "lenient_position")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<PartialLatLng>,
}

impl Property {
    /// Marker position: top-level `lat`/`lng`, then `position`, then `0`.
    pub fn position(&self) -> LatLng {
        resolve_position(
            PartialLatLng {
                lat: self.lat,
                lng: self.lng,
            },
            self.position,
        )
    }

    /// Marker hover title.
    pub fn title(&self) -> &str {
        self.description.as_deref().unwrap_or_default()
    }
}

/// The `db.json` document.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub cities: Vec<City>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub properties: Vec<Property>,
}

impl Dataset {
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    pub fn is_empty(&self) -> bool {
        self.cities.is_empty() && self.properties.is_empty()
    }

    /// First city, else first property, else the origin.
    pub fn map_center(&self) -> LatLng {
        if let Some(city) = self.cities.first() {
            return city.position();
        }
        self.properties
            .first()
            .map(Property::position)
            .unwrap_or(LatLng::ORIGIN)
    }

    /// Polyline through every city in order; only drawn for two or more cities.
    pub fn flight_path(&self) -> Option<Vec<LatLng>> {
        if self.cities.len() < 2 {
            return None;
        }
        Some(self.cities.iter().map(City::position).collect())
    }
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// `null` or a value of the wrong shape reads as the field's default, so one
/// odd field never rejects the whole record.
fn lenient_or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).unwrap_or_default())
}
