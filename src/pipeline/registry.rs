//! Short-name registry: maps configuration names to a modifier family plus
//! preset parameters.

use crate::config::{ConfigSection, ConfigSource, ConfigValue, ParamResolver};
use crate::modifier::{
    DisjunctiveThresholdFilter, EdgeThresholdFilter, Modifier, NodeWeightFilter, RankFilter,
    TopEdgesFilter,
};
use crate::{Error, Result};

/// Modifier family a registry entry builds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModifierKind {
    EdgeThreshold,
    DisjunctiveThreshold,
    TopEdges,
    NodeWeight,
    Rank,
}

/// Static parameter value fixed by a registry entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Preset {
    Str(&'static str),
    Bool(bool),
}

impl From<Preset> for ConfigValue {
    fn from(p: Preset) -> Self {
        match p {
            Preset::Str(s) => ConfigValue::from(s),
            Preset::Bool(b) => ConfigValue::Bool(b),
        }
    }
}

/// One selectable modifier.
#[derive(Debug)]
pub struct RegistryEntry {
    pub short_name: &'static str,
    pub kind: ModifierKind,
    /// Parameters fixed by this entry. They take precedence over explicit
    /// values and configuration.
    pub presets: &'static [(&'static str, Preset)],
}

/// Every modifier selectable by short name.
pub static REGISTRY: &[RegistryEntry] = &[
    RegistryEntry { short_name: "etf", kind: ModifierKind::EdgeThreshold, presets: &[] },
    RegistryEntry {
        short_name: "sef",
        kind: ModifierKind::EdgeThreshold,
        presets: &[("edge_type", Preset::Str("similarity"))],
    },
    RegistryEntry { short_name: "mtf", kind: ModifierKind::DisjunctiveThreshold, presets: &[] },
    RegistryEntry { short_name: "tef", kind: ModifierKind::TopEdges, presets: &[] },
    RegistryEntry {
        short_name: "brtef",
        kind: ModifierKind::TopEdges,
        presets: &[("edge_type", Preset::Str("reply_to"))],
    },
    RegistryEntry {
        short_name: "bsef",
        kind: ModifierKind::TopEdges,
        presets: &[("edge_type", Preset::Str("similarity"))],
    },
    RegistryEntry { short_name: "nwf", kind: ModifierKind::NodeWeight, presets: &[] },
    RegistryEntry {
        short_name: "snwf",
        kind: ModifierKind::NodeWeight,
        presets: &[("strict", Preset::Bool(true))],
    },
    RegistryEntry {
        short_name: "rnwf",
        kind: ModifierKind::NodeWeight,
        presets: &[("strict", Preset::Bool(false))],
    },
    RegistryEntry { short_name: "prf", kind: ModifierKind::Rank, presets: &[] },
];

/// Registry entry for a short name.
pub fn lookup(short_name: &str) -> Result<&'static RegistryEntry> {
    REGISTRY
        .iter()
        .find(|e| e.short_name == short_name)
        .ok_or_else(|| Error::UnknownModifier(short_name.to_owned()))
}

impl RegistryEntry {
    /// Construct the modifier, resolving its parameters from `explicit`,
    /// then this entry's section of `source`, then `source.defaults`.
    pub fn build(&self, explicit: &ConfigSection, source: &ConfigSource) -> Result<Box<dyn Modifier>> {
        let mut params = explicit.clone();
        params.extend(self.presets.iter().map(|&(k, v)| (k.to_owned(), ConfigValue::from(v))));
        let resolver = ParamResolver::new(self.short_name, &params, source);

        let modifier: Box<dyn Modifier> = match self.kind {
            ModifierKind::EdgeThreshold => {
                Box::new(EdgeThresholdFilter::from_params(self.short_name, &resolver)?)
            }
            ModifierKind::DisjunctiveThreshold => {
                Box::new(DisjunctiveThresholdFilter::from_params(self.short_name, &resolver)?)
            }
            ModifierKind::TopEdges => Box::new(TopEdgesFilter::from_params(self.short_name, &resolver)?),
            ModifierKind::NodeWeight => {
                Box::new(NodeWeightFilter::from_params(self.short_name, &resolver)?)
            }
            ModifierKind::Rank => Box::new(RankFilter::from_params(self.short_name, &resolver)?),
        };
        Ok(modifier)
    }
}
