use crate::core::error::ParseFailure;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};
use std::fmt;

/// Value exchanged with the host form. Its shape depends on [`ValueFormat`].
pub type RawValue = JsonValue;

const LATITUDE: &str = "latitude";
const LONGITUDE: &str = "longitude";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl fmt::Display for LatLng {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lat, self.lng)
    }
}

/// Wire format of the editor value, fixed once per editor instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueFormat {
    /// `{"latitude": 40.0, "longitude": -73.0}`
    #[default]
    Structured,
    /// `"40,-73"`
    Delimited,
}

impl ValueFormat {
    /// Picks the format from the host's schema metadata for the field.
    /// String-typed fields store the delimited form; everything else is
    /// treated as an object.
    pub fn from_schema(schema: &JsonValue) -> Self {
        let declared = match schema.get("type") {
            Some(JsonValue::String(kind)) => vec![kind.as_str()],
            Some(JsonValue::Array(kinds)) => kinds.iter().filter_map(JsonValue::as_str).collect(),
            _ => Vec::new(),
        };
        if declared.contains(&"string") && !declared.contains(&"object") {
            Self::Delimited
        } else {
            Self::Structured
        }
    }
}

/// The current point of an editor.
///
/// A point is either fully present or absent. Half-set, zero and non-finite
/// coordinates never make it into a model; they normalize to absent.
///
/// Zero doubles as the host's "unset" marker, so a pick exactly on the
/// equator or the prime meridian is read back as no value. This is a known
/// precision loss kept for compatibility with stored data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateModel {
    point: Option<LatLng>,
    format: ValueFormat,
}

impl CoordinateModel {
    pub fn absent(format: ValueFormat) -> Self {
        Self {
            point: None,
            format,
        }
    }

    pub fn from_point(format: ValueFormat, point: LatLng) -> Self {
        match checked_point(point.lat, point.lng) {
            Ok(point) => Self {
                point: Some(point),
                format,
            },
            Err(_) => Self::absent(format),
        }
    }

    pub fn from_external(format: ValueFormat, raw: &RawValue) -> Result<Self, ParseFailure> {
        let point = match format {
            ValueFormat::Structured => parse_structured(raw)?,
            ValueFormat::Delimited => parse_delimited(raw)?,
        };
        Ok(Self { point, format })
    }

    /// Like [`Self::from_external`], but a malformed value is logged and read
    /// as absent coordinates.
    pub fn from_external_or_absent(format: ValueFormat, raw: &RawValue) -> Self {
        match Self::from_external(format, raw) {
            Ok(model) => model,
            Err(err) => {
                tracing::debug!(error = %err, "treating malformed coordinate value as unset");
                Self::absent(format)
            }
        }
    }

    pub fn to_external(&self) -> RawValue {
        match (self.format, self.point) {
            (ValueFormat::Structured, Some(point)) => {
                let mut map = Map::new();
                map.insert(LATITUDE.to_string(), JsonValue::from(point.lat));
                map.insert(LONGITUDE.to_string(), JsonValue::from(point.lng));
                JsonValue::Object(map)
            }
            (ValueFormat::Structured, None) => {
                let mut map = Map::new();
                map.insert(LATITUDE.to_string(), JsonValue::Null);
                map.insert(LONGITUDE.to_string(), JsonValue::Null);
                JsonValue::Object(map)
            }
            (ValueFormat::Delimited, Some(point)) => JsonValue::String(point.to_string()),
            (ValueFormat::Delimited, None) => JsonValue::String(String::new()),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.point.is_some()
    }

    pub fn point(&self) -> Option<LatLng> {
        self.point
    }

    pub fn latitude(&self) -> Option<f64> {
        self.point.map(|p| p.lat)
    }

    pub fn longitude(&self) -> Option<f64> {
        self.point.map(|p| p.lng)
    }

    pub fn format(&self) -> ValueFormat {
        self.format
    }
}

fn parse_structured(raw: &RawValue) -> Result<Option<LatLng>, ParseFailure> {
    let fields = match raw {
        JsonValue::Null => return Ok(None),
        JsonValue::Object(fields) => fields,
        other => {
            return Err(ParseFailure::WrongShape {
                expected: "object",
                found: json_kind(other),
            });
        }
    };

    let lat = fields.get(LATITUDE);
    let lng = fields.get(LONGITUDE);
    match (lat, lng) {
        (Some(JsonValue::Null), Some(JsonValue::Null)) => Ok(None),
        (None | Some(JsonValue::Null), _) => Err(ParseFailure::MissingField(LATITUDE)),
        (_, None | Some(JsonValue::Null)) => Err(ParseFailure::MissingField(LONGITUDE)),
        (Some(lat), Some(lng)) => {
            let lat = json_coordinate(LATITUDE, lat)?;
            let lng = json_coordinate(LONGITUDE, lng)?;
            checked_point(lat, lng).map(Some)
        }
    }
}

fn parse_delimited(raw: &RawValue) -> Result<Option<LatLng>, ParseFailure> {
    let text = match raw {
        JsonValue::Null => return Ok(None),
        JsonValue::String(text) => text.trim(),
        other => {
            return Err(ParseFailure::WrongShape {
                expected: "string",
                found: json_kind(other),
            });
        }
    };
    if text.is_empty() {
        return Ok(None);
    }

    let Some((lat, lng)) = text.split_once(',') else {
        return Err(ParseFailure::MissingField(LONGITUDE));
    };
    let lat = text_coordinate(LATITUDE, lat)?;
    let lng = text_coordinate(LONGITUDE, lng)?;
    checked_point(lat, lng).map(Some)
}

fn json_coordinate(field: &'static str, value: &JsonValue) -> Result<f64, ParseFailure> {
    match value {
        JsonValue::Number(number) => number.as_f64().ok_or(ParseFailure::NotFinite(field)),
        JsonValue::String(text) => text_coordinate(field, text),
        other => Err(ParseFailure::NotNumeric {
            field,
            value: other.to_string(),
        }),
    }
}

fn text_coordinate(field: &'static str, text: &str) -> Result<f64, ParseFailure> {
    let trimmed = text.trim();
    trimmed
        .parse::<f64>()
        .map_err(|_| ParseFailure::NotNumeric {
            field,
            value: trimmed.to_string(),
        })
}

fn checked_point(lat: f64, lng: f64) -> Result<LatLng, ParseFailure> {
    if !lat.is_finite() {
        return Err(ParseFailure::NotFinite(LATITUDE));
    }
    if !lng.is_finite() {
        return Err(ParseFailure::NotFinite(LONGITUDE));
    }
    if lat == 0.0 || lng == 0.0 {
        return Err(ParseFailure::ZeroSentinel);
    }
    Ok(LatLng::new(lat, lng))
}

fn json_kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "bool",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}
