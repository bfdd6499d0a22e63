use std::collections::BTreeMap;

use crate::error::RulesetError;
use crate::hash::compute_ruleset_id;
use crate::rules::{ClassicConfig, RulesetConfig, V2Config};

pub const KEY_V1: &str = "v1";
pub const KEY_V2: &str = "v2";
pub const KEY_SHADOW: &str = "shadow";
pub const KEY_CLASSIC_CUSTOM: &str = "classic_custom";

/// Maps short preset keys to configurations and ruleset ids back to keys.
#[derive(Debug, Clone)]
pub struct RulesetRegistry {
    presets: BTreeMap<&'static str, RulesetConfig>,
    by_id: BTreeMap<String, &'static str>,
}

impl RulesetRegistry {
    pub fn builtin() -> Self {
        let shadow = RulesetConfig::V2(V2Config {
            shadow: true,
            ..V2Config::default()
        });
        let mut reg = Self {
            presets: BTreeMap::new(),
            by_id: BTreeMap::new(),
        };
        reg.register(KEY_V1, RulesetConfig::default_v1());
        reg.register(KEY_V2, RulesetConfig::default_v2());
        reg.register(KEY_SHADOW, shadow);
        reg
    }

    fn register(&mut self, key: &'static str, config: RulesetConfig) {
        self.by_id.insert(compute_ruleset_id(&config), key);
        self.presets.insert(key, config);
    }

    /// Preset keys in sorted order, `classic_custom` included.
    pub fn keys(&self) -> Vec<&'static str> {
        let mut keys: Vec<&'static str> = self.presets.keys().copied().collect();
        keys.push(KEY_CLASSIC_CUSTOM);
        keys.sort_unstable();
        keys
    }

    /// Resolve a preset key. Only `classic_custom` takes a classic mask, and requires one.
    pub fn resolve(&self, key: &str, mask: Option<&str>) -> Result<RulesetConfig, RulesetError> {
        if key == KEY_CLASSIC_CUSTOM {
            let mask = mask.ok_or_else(|| RulesetError::MissingMask(key.to_string()))?;
            let classic = ClassicConfig::parse_mask_str(mask)?;
            return Ok(RulesetConfig::V2(V2Config {
                classic,
                ..V2Config::default()
            }));
        }
        let config = self
            .presets
            .get(key)
            .copied()
            .ok_or_else(|| RulesetError::UnknownKey(key.to_string()))?;
        if mask.is_some() {
            return Err(RulesetError::UnexpectedMask(key.to_string()));
        }
        Ok(config)
    }

    /// Key of a registered preset with this id. Custom classic configs are not registered.
    pub fn key_for_id(&self, id: &str) -> Option<&'static str> {
        self.by_id.get(id).copied()
    }

    /// Key plus, for custom classic configs, the mask string that reproduces `config`.
    pub fn key_for_config(&self, config: &RulesetConfig) -> Option<(&'static str, Option<String>)> {
        if let Some(key) = self.key_for_id(&compute_ruleset_id(config)) {
            return Some((key, None));
        }
        match config {
            RulesetConfig::V2(v2) if v2.core == V2Config::default().core && !v2.shadow => {
                Some((KEY_CLASSIC_CUSTOM, Some(v2.classic.to_mask_str())))
            }
            _ => None,
        }
    }
}

impl Default for RulesetRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
