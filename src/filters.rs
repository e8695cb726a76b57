//! Typed caller filters.
//!
//! Request payloads carry filters as a free-form JSON object. Recognized keys
//! deserialize into [`PreferenceFilters`]; anything else is ignored. A
//! recognized key with a value of the wrong shape is a bad request.

use serde::Deserialize;

use crate::error::{Error, Result};

/// A filter value given either as a single string or a list of strings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl OneOrMany {
    pub fn values(&self) -> &[String] {
        match self {
            OneOrMany::One(value) => std::slice::from_ref(value),
            OneOrMany::Many(values) => values,
        }
    }

    /// Case-insensitive membership test against a catalog value.
    pub fn matches(&self, candidate: &str) -> bool {
        self.values().iter().any(|value| same_text(value, candidate))
    }
}

/// Recognized filter options. Absent keys mean "no constraint".
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct PreferenceFilters {
    /// Excludes untagged cafés; tagged cafés that are not pet friendly pay a penalty.
    pub pet_friendly: Option<bool>,
    pub wifi: Option<bool>,
    #[serde(rename = "terraza")]
    pub terrace: Option<bool>,
    #[serde(rename = "enchufes")]
    pub power_outlets: Option<bool>,
    #[serde(rename = "tipo_musica")]
    pub music: Option<String>,
    #[serde(rename = "iluminacion")]
    pub lighting: Option<String>,
    #[serde(rename = "estilo_decorativo")]
    pub decor_style: Option<String>,
    #[serde(rename = "vegano")]
    pub vegan: Option<bool>,
    #[serde(rename = "variedad_cafe")]
    pub coffee_variety: Option<String>,
    #[serde(rename = "distancia_max_km")]
    pub max_distance_km: Option<f64>,
    #[serde(rename = "abierto_ahora")]
    pub open_now: Option<bool>,
    #[serde(rename = "precio")]
    pub price: Option<OneOrMany>,
    #[serde(rename = "categoria_bebida")]
    pub drink_category: Option<OneOrMany>,
    #[serde(rename = "tipos_producto")]
    pub product_type: Option<OneOrMany>,
}

impl PreferenceFilters {
    /// Build typed filters from a raw JSON filter object.
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        if value.is_null() {
            return Ok(Self::default());
        }
        serde_json::from_value(value).map_err(|err| Error::InvalidFilters {
            message: err.to_string(),
        })
    }

    pub(crate) fn requires(flag: Option<bool>) -> bool {
        flag.unwrap_or(false)
    }

    /// Whether any boolean tag attribute is demanded.
    pub fn requires_tag_record(&self) -> bool {
        [self.pet_friendly, self.wifi, self.terrace, self.power_outlets]
            .into_iter()
            .any(Self::requires)
    }
}

/// Case-insensitive equality for free-text attributes.
pub(crate) fn same_text(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}
