//! # Product Record
//!
//! The typed input of the engine. A [`ProductRecord`] has one optional slot
//! per recognized field name; unrecognized keys in the source mapping are
//! dropped during deserialization.
//!
//! ## Absent vs. Falsy
//!
//! A slot is `None` when the key is missing or holds JSON `null`. A present
//! value may still be falsy (`false`, `0`, `""`, `[]`, `{}`), which the
//! checks treat as "not applicable" exactly like an absent one. The
//! distinction is kept in the type so callers can tell them apart.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::InvalidInputError;

/// Placeholder title used when a record carries none.
pub const UNKNOWN_PRODUCT_TITLE: &str = "Unknown Product";

// ---------------------------------------------------------------------------
// RecordField
// ---------------------------------------------------------------------------

/// Every field name the engine recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordField {
    Title,
    Description,
    Features,
    Specifications,
    Weight,
    NetWeight,
    GrossWeight,
    PackageWeight,
    Length,
    Width,
    Height,
    Dimensions,
    Size,
    Volume,
    Capacity,
    Contents,
    LiquidVolume,
    PricePerUnit,
    IsPrepackaged,
    PackageType,
    NetQuantity,
    ManufacturerDetails,
    PackageDate,
    Id,
}

impl RecordField {
    /// Returns all recognized fields in wire order.
    pub fn all() -> &'static [RecordField] {
        &[
            Self::Title,
            Self::Description,
            Self::Features,
            Self::Specifications,
            Self::Weight,
            Self::NetWeight,
            Self::GrossWeight,
            Self::PackageWeight,
            Self::Length,
            Self::Width,
            Self::Height,
            Self::Dimensions,
            Self::Size,
            Self::Volume,
            Self::Capacity,
            Self::Contents,
            Self::LiquidVolume,
            Self::PricePerUnit,
            Self::IsPrepackaged,
            Self::PackageType,
            Self::NetQuantity,
            Self::ManufacturerDetails,
            Self::PackageDate,
            Self::Id,
        ]
    }

    /// Returns the wire name of the field.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Description => "description",
            Self::Features => "features",
            Self::Specifications => "specifications",
            Self::Weight => "weight",
            Self::NetWeight => "net_weight",
            Self::GrossWeight => "gross_weight",
            Self::PackageWeight => "package_weight",
            Self::Length => "length",
            Self::Width => "width",
            Self::Height => "height",
            Self::Dimensions => "dimensions",
            Self::Size => "size",
            Self::Volume => "volume",
            Self::Capacity => "capacity",
            Self::Contents => "contents",
            Self::LiquidVolume => "liquid_volume",
            Self::PricePerUnit => "price_per_unit",
            Self::IsPrepackaged => "is_prepackaged",
            Self::PackageType => "package_type",
            Self::NetQuantity => "net_quantity",
            Self::ManufacturerDetails => "manufacturer_details",
            Self::PackageDate => "package_date",
            Self::Id => "id",
        }
    }
}

impl fmt::Display for RecordField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| format!("unrecognized record field: {s:?}"))
    }
}

// ---------------------------------------------------------------------------
// FieldValue
// ---------------------------------------------------------------------------

/// A present field value.
///
/// Variant order matters for untagged deserialization: booleans and numbers
/// are tried before strings, and anything else (arrays, objects) lands in
/// `Structured`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// A boolean flag such as `is_prepackaged`.
    Flag(bool),
    /// A bare number, e.g. a quantity without a unit.
    Number(serde_json::Number),
    /// Free text.
    Text(String),
    /// An array or object. Not inspectable as text.
    Structured(serde_json::Value),
}

impl FieldValue {
    /// Truthiness: `false`, zero, empty text and empty collections are falsy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Flag(b) => *b,
            Self::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
            Self::Text(s) => !s.is_empty(),
            Self::Structured(v) => match v {
                serde_json::Value::Null => false,
                serde_json::Value::Bool(b) => *b,
                serde_json::Value::Array(items) => !items.is_empty(),
                serde_json::Value::Object(map) => !map.is_empty(),
                serde_json::Value::Number(_) | serde_json::Value::String(_) => true,
            },
        }
    }

    /// JSON kind of the value, used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Flag(_) => "boolean",
            Self::Number(_) => "number",
            Self::Text(_) => "string",
            Self::Structured(v) => json_kind(v),
        }
    }

    /// Text rendering for pattern matching. `None` for structured values.
    pub fn as_text(&self) -> Option<Cow<'_, str>> {
        match self {
            Self::Flag(b) => Some(Cow::Owned(b.to_string())),
            Self::Number(n) => Some(Cow::Owned(n.to_string())),
            Self::Text(s) => Some(Cow::Borrowed(s.as_str())),
            Self::Structured(_) => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flag(b) => write!(f, "{b}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
            Self::Structured(v) => write!(f, "{v}"),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_owned())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        Self::Flag(b)
    }
}

impl From<i64> for FieldValue {
    fn from(n: i64) -> Self {
        Self::Number(n.into())
    }
}

impl From<serde_json::Value> for FieldValue {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Bool(b) => Self::Flag(b),
            serde_json::Value::Number(n) => Self::Number(n),
            serde_json::Value::String(s) => Self::Text(s),
            other => Self::Structured(other),
        }
    }
}

fn json_kind(v: &serde_json::Value) -> &'static str {
    match v {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

// ---------------------------------------------------------------------------
// ProductRecord
// ---------------------------------------------------------------------------

/// A product listing as seen by the compliance engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<FieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<FieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub features: Option<FieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specifications: Option<FieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<FieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub net_weight: Option<FieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gross_weight: Option<FieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package_weight: Option<FieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length: Option<FieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<FieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<FieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<FieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<FieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume: Option<FieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity: Option<FieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contents: Option<FieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub liquid_volume: Option<FieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_per_unit: Option<FieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_prepackaged: Option<FieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package_type: Option<FieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub net_quantity: Option<FieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manufacturer_details: Option<FieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package_date: Option<FieldValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<FieldValue>,
}

impl ProductRecord {
    /// Build a record from an arbitrary JSON value.
    ///
    /// Fails with [`InvalidInputError::NotAMapping`] unless the value is a
    /// JSON object. Unrecognized keys are ignored.
    pub fn from_value(value: &serde_json::Value) -> Result<Self, InvalidInputError> {
        if !value.is_object() {
            return Err(InvalidInputError::NotAMapping {
                found: json_kind(value),
            });
        }
        serde_json::from_value(value.clone())
            .map_err(|e| InvalidInputError::Malformed(e.to_string()))
    }

    /// Parse a record from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self, InvalidInputError> {
        let value: serde_json::Value =
            serde_json::from_str(json).map_err(|e| InvalidInputError::Malformed(e.to_string()))?;
        Self::from_value(&value)
    }

    /// The value stored for `field`, if present.
    pub fn get(&self, field: RecordField) -> Option<&FieldValue> {
        self.slot(field).as_ref()
    }

    /// True when `field` is present and truthy.
    pub fn is_truthy(&self, field: RecordField) -> bool {
        self.get(field).is_some_and(FieldValue::is_truthy)
    }

    /// Store a value for `field`, replacing any previous one.
    pub fn set(&mut self, field: RecordField, value: impl Into<FieldValue>) {
        *self.slot_mut(field) = Some(value.into());
    }

    /// Builder form of [`ProductRecord::set`].
    pub fn with(mut self, field: RecordField, value: impl Into<FieldValue>) -> Self {
        self.set(field, value);
        self
    }

    /// The record's `id`, or `product_{position}` when absent.
    ///
    /// `position` is 1-based.
    pub fn product_id(&self, position: usize) -> String {
        match &self.id {
            Some(id) => id.to_string(),
            None => format!("product_{position}"),
        }
    }

    /// The record's title, or [`UNKNOWN_PRODUCT_TITLE`] when absent.
    pub fn product_title(&self) -> String {
        match &self.title {
            Some(title) => title.to_string(),
            None => UNKNOWN_PRODUCT_TITLE.to_string(),
        }
    }

    fn slot(&self, field: RecordField) -> &Option<FieldValue> {
        match field {
            RecordField::Title => &self.title,
            RecordField::Description => &self.description,
            RecordField::Features => &self.features,
            RecordField::Specifications => &self.specifications,
            RecordField::Weight => &self.weight,
            RecordField::NetWeight => &self.net_weight,
            RecordField::GrossWeight => &self.gross_weight,
            RecordField::PackageWeight => &self.package_weight,
            RecordField::Length => &self.length,
            RecordField::Width => &self.width,
            RecordField::Height => &self.height,
            RecordField::Dimensions => &self.dimensions,
            RecordField::Size => &self.size,
            RecordField::Volume => &self.volume,
            RecordField::Capacity => &self.capacity,
            RecordField::Contents => &self.contents,
            RecordField::LiquidVolume => &self.liquid_volume,
            RecordField::PricePerUnit => &self.price_per_unit,
            RecordField::IsPrepackaged => &self.is_prepackaged,
            RecordField::PackageType => &self.package_type,
            RecordField::NetQuantity => &self.net_quantity,
            RecordField::ManufacturerDetails => &self.manufacturer_details,
            RecordField::PackageDate => &self.package_date,
            RecordField::Id => &self.id,
        }
    }

    fn slot_mut(&mut self, field: RecordField) -> &mut Option<FieldValue> {
        match field {
            RecordField::Title => &mut self.title,
            RecordField::Description => &mut self.description,
            RecordField::Features => &mut self.features,
            RecordField::Specifications => &mut self.specifications,
            RecordField::Weight => &mut self.weight,
            RecordField::NetWeight => &mut self.net_weight,
            RecordField::GrossWeight => &mut self.gross_weight,
            RecordField::PackageWeight => &mut self.package_weight,
            RecordField::Length => &mut self.length,
            RecordField::Width => &mut self.width,
            RecordField::Height => &mut self.height,
            RecordField::Dimensions => &mut self.dimensions,
            RecordField::Size => &mut self.size,
            RecordField::Volume => &mut self.volume,
            RecordField::Capacity => &mut self.capacity,
            RecordField::Contents => &mut self.contents,
            RecordField::LiquidVolume => &mut self.liquid_volume,
            RecordField::PricePerUnit => &mut self.price_per_unit,
            RecordField::IsPrepackaged => &mut self.is_prepackaged,
            RecordField::PackageType => &mut self.package_type,
            RecordField::NetQuantity => &mut self.net_quantity,
            RecordField::ManufacturerDetails => &mut self.manufacturer_details,
            RecordField::PackageDate => &mut self.package_date,
            RecordField::Id => &mut self.id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn field_names_roundtrip() {
        for field in RecordField::all() {
            assert_eq!(field.as_str().parse::<RecordField>().unwrap(), *field);
            let json = serde_json::to_string(field).unwrap();
            assert_eq!(json, format!("\"{}\"", field.as_str()));
        }
        assert_eq!(RecordField::all().len(), 24);
    }

    #[test]
    fn from_value_reads_typed_slots() {
        let record = ProductRecord::from_value(&json!({
            "title": "Basmati Rice",
            "weight": "5 kg",
            "is_prepackaged": true,
            "net_quantity": 5,
            "vendor_rating": 4.5,
        }))
        .unwrap();
        assert_eq!(record.get(RecordField::Title), Some(&FieldValue::from("Basmati Rice")));
        assert_eq!(record.get(RecordField::IsPrepackaged), Some(&FieldValue::Flag(true)));
        assert_eq!(record.get(RecordField::NetQuantity), Some(&FieldValue::from(5i64)));
        assert!(record.get(RecordField::Volume).is_none());
    }

    #[test]
    fn null_is_absent() {
        let record = ProductRecord::from_value(&json!({"weight": null})).unwrap();
        assert!(record.get(RecordField::Weight).is_none());
    }

    #[test]
    fn non_mapping_is_invalid_input() {
        let err = ProductRecord::from_value(&json!(["weight", "5 lbs"])).unwrap_err();
        assert_eq!(err, InvalidInputError::NotAMapping { found: "array" });
        let err = ProductRecord::from_value(&json!("5 lbs")).unwrap_err();
        assert_eq!(err, InvalidInputError::NotAMapping { found: "string" });
    }

    #[test]
    fn unparseable_text_is_malformed() {
        let err = ProductRecord::from_json_str("{\"weight\": ").unwrap_err();
        assert!(matches!(err, InvalidInputError::Malformed(_)));
    }

    #[test]
    fn structured_values_are_kept_but_not_textual() {
        let record = ProductRecord::from_value(&json!({"weight": ["5", "lbs"]})).unwrap();
        let value = record.get(RecordField::Weight).unwrap();
        assert_eq!(value.kind(), "array");
        assert!(value.as_text().is_none());
        assert!(value.is_truthy());
    }

    #[test]
    fn truthiness_follows_falsy_rules() {
        assert!(!FieldValue::Flag(false).is_truthy());
        assert!(!FieldValue::from(0i64).is_truthy());
        assert!(!FieldValue::from("").is_truthy());
        assert!(!FieldValue::Structured(json!([])).is_truthy());
        assert!(!FieldValue::Structured(json!({})).is_truthy());
        assert!(FieldValue::from("0").is_truthy());
        assert!(FieldValue::from(3i64).is_truthy());
    }

    #[test]
    fn product_id_falls_back_to_position() {
        let record = ProductRecord::default();
        assert_eq!(record.product_id(3), "product_3");
        assert_eq!(record.product_title(), UNKNOWN_PRODUCT_TITLE);

        let record = ProductRecord::default()
            .with(RecordField::Id, "PROD001")
            .with(RecordField::Title, "Premium Basmati Rice");
        assert_eq!(record.product_id(3), "PROD001");
        assert_eq!(record.product_title(), "Premium Basmati Rice");
    }

    #[test]
    fn numeric_id_renders_as_text() {
        let record = ProductRecord::from_value(&json!({"id": 42})).unwrap();
        assert_eq!(record.product_id(1), "42");
    }

    #[test]
    fn set_and_get_cover_every_field() {
        let mut record = ProductRecord::default();
        for field in RecordField::all() {
            record.set(*field, field.as_str());
        }
        for field in RecordField::all() {
            assert_eq!(record.get(*field), Some(&FieldValue::from(field.as_str())));
        }
    }
}
