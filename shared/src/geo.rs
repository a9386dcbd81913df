use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Geographic coordinate in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub const ORIGIN: LatLng = LatLng { lat: 0.0, lng: 0.0 };

    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// A coordinate pair where either axis may be missing or unreadable.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PartialLatLng {
    #[serde(default, deserialize_with = "lenient_coordinate")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(default, deserialize_with = "lenient_coordinate")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lng: Option<f64>,
}

/// Resolve a marker position per axis: top-level value, then the nested
/// `position` value, then `0`.
pub fn resolve_position(top: PartialLatLng, nested: Option<PartialLatLng>) -> LatLng {
    let nested = nested.unwrap_or_default();
    LatLng {
        lat: top.lat.or(nested.lat).unwrap_or(0.0),
        lng: top.lng.or(nested.lng).unwrap_or(0.0),
    }
}

/// Reads a coordinate from a number or a numeric string. Anything else is
/// treated as absent rather than failing the whole document.
pub(crate) fn lenient_coordinate<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(coordinate_from_value))
}

/// Like [`lenient_coordinate`], with absent values resolved to `0`.
pub(crate) fn coordinate_or_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_coordinate(deserializer)?.unwrap_or(0.0))
}

/// Reads a nested `position` object; non-object values count as absent.
pub(crate) fn lenient_position<'de, D>(deserializer: D) -> Result<Option<PartialLatLng>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let Some(Value::Object(fields)) = value else {
        return Ok(None);
    };
    Ok(Some(PartialLatLng {
        lat: fields.get("lat").and_then(coordinate_from_value),
        lng: fields.get("lng").and_then(coordinate_from_value),
    }))
}

fn coordinate_from_value(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|v| v.is_finite())
}
