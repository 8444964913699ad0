//! # Unit Reference Tables
//!
//! Standard-unit token lists per [`Dimension`] and the ordered list of
//! non-standard unit patterns.
//!
//! ## Matching Rules
//!
//! - **Standard units** are a case-insensitive *substring* test. `"g"` is a
//!   weight token, so any text containing the letter g passes the weight
//!   exemption.
//! - **Non-standard patterns** are case-insensitive whole-word alternations.
//!   They are scanned in list order and the first match wins. A field that
//!   mentions several non-standard units (`"5 lbs 3 oz"`) still yields one
//!   match: the earliest-listed pattern.

use std::collections::BTreeMap;

use lmc_core::{ConfigError, Dimension};
use regex::{Regex, RegexBuilder};
use serde::ser::SerializeStruct;
use serde::Serialize;

/// Metric weight tokens.
pub const WEIGHT_UNITS: &[&str] = &[
    "kg", "kilogram", "kilograms", "g", "gram", "grams", "mg", "milligram", "milligrams",
];

/// Metric length tokens.
pub const LENGTH_UNITS: &[&str] = &[
    "m",
    "meter",
    "metre",
    "meters",
    "metres",
    "cm",
    "centimeter",
    "centimetre",
    "centimeters",
    "centimetres",
    "mm",
    "millimeter",
    "millimetre",
    "millimeters",
    "millimetres",
];

/// Metric volume tokens.
pub const VOLUME_UNITS: &[&str] = &[
    "l",
    "liter",
    "litre",
    "liters",
    "litres",
    "ml",
    "milliliter",
    "millilitre",
    "milliliters",
    "millilitres",
    "cc",
    "cubic centimeter",
    "cubic centimetre",
];

/// Metric area tokens.
pub const AREA_UNITS: &[&str] = &[
    "sq m",
    "square meter",
    "square metre",
    "sq cm",
    "square centimeter",
    "square centimetre",
    "sq mm",
    "square millimeter",
    "square millimetre",
];

/// SI temperature tokens.
pub const TEMPERATURE_UNITS: &[&str] = &["°c", "celsius", "k", "kelvin"];

/// Built-in non-standard patterns as `(name, tokens)`, in scan order.
pub const BUILTIN_PATTERNS: &[(&str, &[&str])] = &[
    (
        "imperial_weight",
        &["lb", "lbs", "pound", "pounds", "ounce", "ounces", "oz"],
    ),
    (
        "imperial_mass",
        &["stone", "stones", "ton", "tons", "tonne", "tonnes"],
    ),
    (
        "imperial_length",
        &[
            "ft", "foot", "feet", "inch", "inches", "in", "yard", "yards", "yd", "mile", "miles",
        ],
    ),
    (
        "imperial_volume",
        &[
            "gallon",
            "gallons",
            "gal",
            "quart",
            "quarts",
            "qt",
            "pint",
            "pints",
            "pt",
            "fl oz",
            "fluid ounce",
            "fluid ounces",
        ],
    ),
    (
        "traditional_indian",
        &[
            "ser", "seer", "maund", "tola", "ratti", "chatak", "pau", "adhak", "kos",
        ],
    ),
    (
        "informal_kitchen",
        &[
            "cup",
            "cups",
            "spoon",
            "spoons",
            "tablespoon",
            "tablespoons",
            "teaspoon",
            "teaspoons",
            "tbsp",
            "tsp",
        ],
    ),
    (
        "informal_count",
        &[
            "piece", "pieces", "pcs", "nos", "number", "numbers", "dozen", "gross",
        ],
    ),
];

/// Built-in standard-unit tokens for `dimension`.
pub fn builtin_standard_units(dimension: Dimension) -> &'static [&'static str] {
    match dimension {
        Dimension::Weight => WEIGHT_UNITS,
        Dimension::Length => LENGTH_UNITS,
        Dimension::Volume => VOLUME_UNITS,
        Dimension::Area => AREA_UNITS,
        Dimension::Temperature => TEMPERATURE_UNITS,
    }
}

// ---------------------------------------------------------------------------
// NonStandardPattern
// ---------------------------------------------------------------------------

/// One named, compiled, case-insensitive non-standard unit pattern.
#[derive(Debug, Clone)]
pub struct NonStandardPattern {
    name: String,
    regex: Regex,
}

impl NonStandardPattern {
    /// Compile a whole-word alternation over `tokens`.
    ///
    /// Tokens are matched literally; regex metacharacters are escaped.
    pub fn from_tokens<S: AsRef<str>>(name: &str, tokens: &[S]) -> Result<Self, ConfigError> {
        if tokens.is_empty() {
            return Err(ConfigError::InvalidPattern {
                name: name.to_string(),
                reason: "token list is empty".into(),
            });
        }
        let alternation = tokens
            .iter()
            .map(|t| regex::escape(t.as_ref()))
            .collect::<Vec<_>>()
            .join("|");
        Self::from_regex(name, &format!(r"\b(?:{alternation})\b"))
    }

    /// Compile a raw regular expression. Matching is case-insensitive.
    pub fn from_regex(name: &str, pattern: &str) -> Result<Self, ConfigError> {
        let regex = RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .map_err(|e| ConfigError::InvalidPattern {
                name: name.to_string(),
                reason: e.to_string(),
            })?;
        Ok(Self {
            name: name.to_string(),
            regex,
        })
    }

    /// Pattern name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Source of the compiled expression.
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    /// True when the pattern occurs anywhere in `text`.
    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }
}

impl Serialize for NonStandardPattern {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("NonStandardPattern", 2)?;
        state.serialize_field("name", &self.name)?;
        state.serialize_field("pattern", self.regex.as_str())?;
        state.end()
    }
}

// ---------------------------------------------------------------------------
// UnitTables
// ---------------------------------------------------------------------------

/// Immutable unit reference tables.
///
/// Built once at startup and shared by reference; safe for concurrent reads.
#[derive(Debug, Clone, Serialize)]
pub struct UnitTables {
    standard_units: BTreeMap<Dimension, Vec<String>>,
    non_standard_patterns: Vec<NonStandardPattern>,
}

impl UnitTables {
    /// Tables with every built-in token list and pattern.
    pub fn builtin() -> Result<Self, ConfigError> {
        Self::new(builtin_standard_tables(), builtin_patterns()?)
    }

    /// Validate and assemble tables.
    ///
    /// Tokens are lowercased. An empty token or an empty pattern list is a
    /// [`ConfigError`].
    pub fn new(
        standard_units: BTreeMap<Dimension, Vec<String>>,
        non_standard_patterns: Vec<NonStandardPattern>,
    ) -> Result<Self, ConfigError> {
        if non_standard_patterns.is_empty() {
            return Err(ConfigError::NoPatterns);
        }
        let mut normalized = BTreeMap::new();
        for (dimension, tokens) in standard_units {
            let mut lowered = Vec::with_capacity(tokens.len());
            for token in tokens {
                let token = token.trim().to_lowercase();
                if token.is_empty() {
                    return Err(ConfigError::EmptyToken {
                        dimension: dimension.to_string(),
                    });
                }
                lowered.push(token);
            }
            normalized.insert(dimension, lowered);
        }
        Ok(Self {
            standard_units: normalized,
            non_standard_patterns,
        })
    }

    /// True when `text` contains any standard token for `dimension`.
    ///
    /// A dimension without a table yields `false`.
    pub fn has_standard_unit(&self, text: &str, dimension: Dimension) -> bool {
        let Some(tokens) = self.standard_units.get(&dimension) else {
            return false;
        };
        let lowered = text.to_lowercase();
        tokens.iter().any(|token| lowered.contains(token.as_str()))
    }

    /// [`UnitTables::has_standard_unit`] keyed by dimension name.
    ///
    /// Unknown dimension names yield `false`.
    pub fn has_standard_unit_named(&self, text: &str, dimension: &str) -> bool {
        dimension
            .parse::<Dimension>()
            .map(|d| self.has_standard_unit(text, d))
            .unwrap_or(false)
    }

    /// Index of the first non-standard pattern that matches `text`.
    pub fn first_non_standard_match(&self, text: &str) -> Option<usize> {
        self.non_standard_patterns
            .iter()
            .position(|pattern| pattern.is_match(text))
    }

    /// Pattern at `index`.
    pub fn pattern(&self, index: usize) -> Option<&NonStandardPattern> {
        self.non_standard_patterns.get(index)
    }

    /// All non-standard patterns, in scan order.
    pub fn patterns(&self) -> &[NonStandardPattern] {
        &self.non_standard_patterns
    }

    /// Standard tokens for `dimension` (empty when the table is missing).
    pub fn standard_tokens(&self, dimension: Dimension) -> &[String] {
        self.standard_units
            .get(&dimension)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// Owned copy of every built-in standard-unit table.
pub fn builtin_standard_tables() -> BTreeMap<Dimension, Vec<String>> {
    Dimension::all()
        .iter()
        .map(|&d| {
            let tokens = builtin_standard_units(d)
                .iter()
                .map(|t| t.to_string())
                .collect();
            (d, tokens)
        })
        .collect()
}

/// Compile [`BUILTIN_PATTERNS`].
pub fn builtin_patterns() -> Result<Vec<NonStandardPattern>, ConfigError> {
    BUILTIN_PATTERNS
        .iter()
        .map(|(name, tokens)| NonStandardPattern::from_tokens(name, tokens))
        .collect()
}
