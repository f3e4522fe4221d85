//! Place records and result sets.
//!
//! A [`Place`] is one location result from the agent; a [`ResultSet`] is the
//! agent's current output as a whole. The panel re-derives its content from
//! the full set on every update, so a `ResultSet` is transient and nothing
//! here is retained between renders.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// One location result.
///
/// Only `id` is required; every other field degrades to a placeholder or is
/// omitted from the rendered card. Ids must be unique within a single
/// result set (they key navigation), which is the producer's responsibility.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    /// Opaque identifier used for navigation. Numeric ids in the agent's
    /// JSON are accepted and carried as their decimal string form.
    #[serde(deserialize_with = "opaque_id")]
    pub id: String,

    /// Display label.
    #[serde(default)]
    pub name: Option<String>,

    /// Path or absolute URL to a representative image. The agent emits this
    /// under either key.
    #[serde(default, alias = "image")]
    pub filename: Option<String>,

    #[serde(default)]
    pub city: Option<String>,

    #[serde(default)]
    pub tags: Option<String>,

    #[serde(default)]
    pub rating: Option<f64>,
}

impl Place {
    /// Create a place with only an id set.
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
            filename: None,
            city: None,
            tags: None,
            rating: None,
        }
    }
}

/// Accept string or numeric ids.
fn opaque_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "place id must be a string or number, got {other}"
        ))),
    }
}

/// The agent's current output: nothing, one place, or an ordered sequence.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ResultSet {
    #[default]
    Empty,
    Single(Place),
    Many(Vec<Place>),
}

impl ResultSet {
    /// Build a result set from an ordered list of places.
    ///
    /// Zero places is `Empty` and exactly one is `Single`, so a
    /// one-element list renders in detail mode rather than as a
    /// one-card gallery.
    pub fn from_places(mut places: Vec<Place>) -> Self {
        match places.len() {
            0 => Self::Empty,
            1 => Self::Single(places.remove(0)),
            _ => Self::Many(places),
        }
    }

    /// Decode a result set from arbitrary agent JSON.
    ///
    /// Total over every input: `null`, scalars, and undecodable values are
    /// all `Empty`; an object is a single place; an array is decoded
    /// element-wise with undecodable elements skipped. This never errors:
    /// a malformed payload closes the panel instead of crashing it.
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Object(_) => match serde_json::from_value::<Place>(value.clone()) {
                Ok(place) => Self::Single(place),
                Err(_) => Self::Empty,
            },
            Value::Array(items) => Self::from_places(
                items
                    .iter()
                    .filter_map(|item| serde_json::from_value(item.clone()).ok())
                    .collect(),
            ),
            _ => Self::Empty,
        }
    }

    /// The places in order, as a slice.
    pub fn places(&self) -> &[Place] {
        match self {
            Self::Empty => &[],
            Self::Single(place) => std::slice::from_ref(place),
            Self::Many(places) => places,
        }
    }

    pub fn len(&self) -> usize {
        self.places().len()
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}
