//! # Modifier Configuration
//!
//! Layered parameter resolution for modifiers. A parameter is looked up, in
//! order, in:
//!
//! 1. the explicit values passed when the modifier is constructed,
//! 2. the modifier's own section of the shared [`ConfigSource`],
//! 3. the source's `defaults` section,
//! 4. the modifier's built-in default, if it has one.
//!
//! Anything still missing is a [`Error::Configuration`]. Resolution happens
//! once, at construction; a built modifier never reads configuration again.
//!
//! ```json
//! {
//!   "pipeline": ["mtf", "brtef", "prf"],
//!   "defaults": { "strict": false },
//!   "modifiers": {
//!     "mtf":   { "similarity_threshold": 0.4, "reply_to_threshold": 0.5 },
//!     "brtef": { "top_edges": 3 },
//!     "prf":   { "k": 20 }
//!   }
//! }
//! ```

pub mod value;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::model::WeightKind;
use crate::{Error, Result};

pub use value::ConfigValue;

/// Named parameters: one modifier's section, or a set of explicit values.
pub type ConfigSection = HashMap<String, ConfigValue>;

/// Build a section from `(name, value)` pairs.
pub fn section<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> ConfigSection
where
    K: Into<String>,
    V: Into<ConfigValue>,
{
    pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect()
}

// ============================================================================
// ConfigSource
// ============================================================================

/// Resolved configuration shared by every modifier of a pipeline.
///
/// Loading it from a file or the command line is the caller's job; this type
/// only holds the already-parsed keys.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigSource {
    /// Short names of the modifiers to run, in order.
    #[serde(default)]
    pub pipeline: Vec<String>,
    /// Fallback values visible to every modifier.
    #[serde(default)]
    pub defaults: ConfigSection,
    /// Per-modifier sections, keyed by short name.
    #[serde(default)]
    pub modifiers: HashMap<String, ConfigSection>,
}

impl ConfigSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_value(json: serde_json::Value) -> Result<Self> {
        Ok(serde_json::from_value(json)?)
    }

    pub fn with_pipeline<S: Into<String>>(mut self, names: impl IntoIterator<Item = S>) -> Self {
        self.pipeline = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_default(mut self, key: impl Into<String>, value: impl Into<ConfigValue>) -> Self {
        self.defaults.insert(key.into(), value.into());
        self
    }

    pub fn with_param(
        mut self,
        modifier: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<ConfigValue>,
    ) -> Self {
        self.modifiers
            .entry(modifier.into())
            .or_default()
            .insert(key.into(), value.into());
        self
    }

    /// Modifier section first, then `defaults`.
    pub fn lookup(&self, modifier: &str, key: &str) -> Option<&ConfigValue> {
        self.modifiers
            .get(modifier)
            .and_then(|s| s.get(key))
            .or_else(|| self.defaults.get(key))
    }
}

// ============================================================================
// ParamResolver
// ============================================================================

/// Typed, fail-fast parameter lookup for one modifier instance.
pub struct ParamResolver<'a> {
    modifier: &'a str,
    explicit: &'a ConfigSection,
    source: &'a ConfigSource,
}

impl<'a> ParamResolver<'a> {
    pub fn new(modifier: &'a str, explicit: &'a ConfigSection, source: &'a ConfigSource) -> Self {
        Self { modifier, explicit, source }
    }

    pub fn modifier(&self) -> &str {
        self.modifier
    }

    fn lookup(&self, name: &str) -> Option<&'a ConfigValue> {
        self.explicit
            .get(name)
            .or_else(|| self.source.lookup(self.modifier, name))
    }

    fn missing(&self, name: &str) -> Error {
        Error::Configuration {
            modifier: self.modifier.to_owned(),
            parameter: name.to_owned(),
        }
    }

    pub(crate) fn invalid(&self, name: &str, expected: &'static str, got: impl ToString) -> Error {
        Error::InvalidParameter {
            modifier: self.modifier.to_owned(),
            parameter: name.to_owned(),
            expected,
            got: got.to_string(),
        }
    }

    fn typed<T>(
        &self,
        name: &str,
        expected: &'static str,
        extract: impl FnOnce(&ConfigValue) -> Option<T>,
    ) -> Result<Option<T>> {
        match self.lookup(name) {
            None => Ok(None),
            Some(v) => extract(v)
                .map(Some)
                .ok_or_else(|| self.invalid(name, expected, v.type_name())),
        }
    }

    pub fn int(&self, name: &str) -> Result<i64> {
        self.typed(name, "INTEGER", ConfigValue::as_int)?
            .ok_or_else(|| self.missing(name))
    }

    /// Non-negative integer, for counts such as `k` and `top_edges`.
    pub fn count(&self, name: &str) -> Result<usize> {
        let v = self.int(name)?;
        usize::try_from(v).map_err(|_| self.invalid(name, "non-negative INTEGER", v))
    }

    /// Finite float; integers are widened.
    pub fn float(&self, name: &str) -> Result<f64> {
        self.float_opt(name)?.ok_or_else(|| self.missing(name))
    }

    pub fn float_or(&self, name: &str, default: f64) -> Result<f64> {
        Ok(self.float_opt(name)?.unwrap_or(default))
    }

    fn float_opt(&self, name: &str) -> Result<Option<f64>> {
        match self.typed(name, "FLOAT", ConfigValue::as_float)? {
            Some(v) if !v.is_finite() => Err(self.invalid(name, "finite FLOAT", v)),
            other => Ok(other),
        }
    }

    pub fn boolean(&self, name: &str) -> Result<bool> {
        self.typed(name, "BOOLEAN", ConfigValue::as_bool)?
            .ok_or_else(|| self.missing(name))
    }

    pub fn boolean_or(&self, name: &str, default: bool) -> Result<bool> {
        Ok(self.typed(name, "BOOLEAN", ConfigValue::as_bool)?.unwrap_or(default))
    }

    pub fn string(&self, name: &str) -> Result<&'a str> {
        self.string_opt(name)?.ok_or_else(|| self.missing(name))
    }

    pub fn string_or(&self, name: &str, default: &'a str) -> Result<&'a str> {
        Ok(self.string_opt(name)?.unwrap_or(default))
    }

    fn string_opt(&self, name: &str) -> Result<Option<&'a str>> {
        match self.lookup(name) {
            None => Ok(None),
            Some(ConfigValue::String(s)) => Ok(Some(s.as_str())),
            Some(v) => Err(self.invalid(name, "STRING", v.type_name())),
        }
    }

    /// Edge or node weight identifier. Unknown names fail here, at
    /// construction, never at apply time.
    pub fn weight_kind<K: WeightKind>(&self, name: &str) -> Result<K> {
        K::parse(self.string(name)?)
    }

    pub fn weight_kind_or<K: WeightKind>(&self, name: &str, default: K) -> Result<K> {
        match self.string_opt(name)? {
            Some(s) => K::parse(s),
            None => Ok(default),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::EdgeType;

    #[test]
    fn test_explicit_overrides_source() {
        let source = ConfigSource::new().with_param("sef", "threshold", 0.2);
        let explicit = section([("threshold", 0.7)]);
        let params = ParamResolver::new("sef", &explicit, &source);
        assert_eq!(params.float("threshold").unwrap(), 0.7);
    }

    #[test]
    fn test_section_then_defaults() {
        let source = ConfigSource::new()
            .with_default("k", 5)
            .with_default("strict", true)
            .with_param("prf", "k", 2);
        let explicit = ConfigSection::new();
        let params = ParamResolver::new("prf", &explicit, &source);
        assert_eq!(params.count("k").unwrap(), 2);
        assert!(params.boolean("strict").unwrap());

        let other = ParamResolver::new("other", &explicit, &source);
        assert_eq!(other.count("k").unwrap(), 5);
    }

    #[test]
    fn test_missing_names_modifier_and_parameter() {
        let source = ConfigSource::new();
        let explicit = ConfigSection::new();
        let err = ParamResolver::new("bsef", &explicit, &source)
            .count("top_edges")
            .unwrap_err();
        match err {
            Error::Configuration { modifier, parameter } => {
                assert_eq!(modifier, "bsef");
                assert_eq!(parameter, "top_edges");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_wrong_type_is_invalid() {
        let source = ConfigSource::new().with_param("prf", "k", "ten");
        let explicit = ConfigSection::new();
        let err = ParamResolver::new("prf", &explicit, &source).int("k").unwrap_err();
        assert!(matches!(err, Error::InvalidParameter { expected: "INTEGER", .. }));
    }

    #[test]
    fn test_negative_count_rejected() {
        let explicit = section([("k", -1)]);
        let source = ConfigSource::new();
        let err = ParamResolver::new("prf", &explicit, &source).count("k").unwrap_err();
        assert!(matches!(err, Error::InvalidParameter { .. }));
    }

    #[test]
    fn test_non_finite_threshold_rejected() {
        let explicit = section([("threshold", f64::NAN)]);
        let source = ConfigSource::new();
        let params = ParamResolver::new("etf", &explicit, &source);
        assert!(params.float("threshold").is_err());
    }

    #[test]
    fn test_weight_kind_parse() {
        let explicit = section([("edge_type", "temporal")]);
        let source = ConfigSource::new();
        let params = ParamResolver::new("etf", &explicit, &source);
        assert_eq!(params.weight_kind::<EdgeType>("edge_type").unwrap(), EdgeType::Temporal);
        assert_eq!(
            params.weight_kind_or::<EdgeType>("missing", EdgeType::ReplyTo).unwrap(),
            EdgeType::ReplyTo
        );

        let bad = section([("edge_type", "upvotes")]);
        let params = ParamResolver::new("etf", &bad, &source);
        assert!(matches!(
            params.weight_kind::<EdgeType>("edge_type"),
            Err(Error::UnknownWeightType { .. })
        ));
    }

    #[test]
    fn test_from_json() {
        let source = ConfigSource::from_json_str(
            r#"{
                "pipeline": ["sef", "prf"],
                "defaults": {"strict": true},
                "modifiers": {"sef": {"threshold": 0.6}, "prf": {"k": 2}}
            }"#,
        )
        .unwrap();
        assert_eq!(source.pipeline, vec!["sef", "prf"]);
        assert_eq!(source.lookup("sef", "threshold"), Some(&ConfigValue::Float(0.6)));
        assert_eq!(source.lookup("prf", "strict"), Some(&ConfigValue::Bool(true)));
    }
}
