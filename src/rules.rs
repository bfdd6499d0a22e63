use serde::{Deserialize, Serialize};

use crate::error::RulesetError;

/// Tactics layer shared by every ruleset version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CoreConfig {
    /// Honor `warning_mark_cell` annotations.
    pub warning_mark: bool,
    /// Honor `earth_boost_edge` annotations.
    pub earth_boost: bool,
    /// Subtracted from a defending edge on a cell marked by the attacker.
    pub warning_mark_penalty: u8,
    /// Added to the boosted edge of the placed card for its own move.
    pub earth_boost_bonus: u8,
}

impl CoreConfig {
    pub const BASIC: CoreConfig = CoreConfig {
        warning_mark: false,
        earth_boost: false,
        warning_mark_penalty: 1,
        earth_boost_bonus: 1,
    };

    pub const TACTICS: CoreConfig = CoreConfig {
        warning_mark: true,
        earth_boost: true,
        warning_mark_penalty: 1,
        earth_boost_bonus: 1,
    };
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self::BASIC
    }
}

/// Classic rule toggles layered on top of the basic comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ClassicConfig {
    pub plus: bool,
    pub same: bool,
    pub combo: bool,
    pub elemental: bool,
    pub sudden_death: bool,
}

const BIT_PLUS: u8 = 1 << 0;
const BIT_SAME: u8 = 1 << 1;
const BIT_COMBO: u8 = 1 << 2;
const BIT_ELEMENTAL: u8 = 1 << 3;
const BIT_SUDDEN_DEATH: u8 = 1 << 4;
const MASK_ALL: u8 = BIT_PLUS | BIT_SAME | BIT_COMBO | BIT_ELEMENTAL | BIT_SUDDEN_DEATH;

impl ClassicConfig {
    #[inline]
    pub const fn new(
        plus: bool,
        same: bool,
        combo: bool,
        elemental: bool,
        sudden_death: bool,
    ) -> Self {
        Self {
            plus,
            same,
            combo,
            elemental,
            sudden_death,
        }
    }

    #[inline]
    pub const fn none() -> Self {
        Self::new(false, false, false, false, false)
    }

    #[inline]
    pub const fn all_enabled() -> Self {
        Self::new(true, true, true, true, true)
    }

    /// Typed bitmask view: bit 0 plus, 1 same, 2 combo, 3 elemental, 4 sudden death.
    pub fn mask(&self) -> u8 {
        let mut m = 0u8;
        if self.plus {
            m |= BIT_PLUS;
        }
        if self.same {
            m |= BIT_SAME;
        }
        if self.combo {
            m |= BIT_COMBO;
        }
        if self.elemental {
            m |= BIT_ELEMENTAL;
        }
        if self.sudden_death {
            m |= BIT_SUDDEN_DEATH;
        }
        m
    }

    /// Returns None when bits outside the known toggles are set.
    pub fn from_mask(mask: u8) -> Option<Self> {
        if mask & !MASK_ALL != 0 {
            return None;
        }
        Some(Self {
            plus: mask & BIT_PLUS != 0,
            same: mask & BIT_SAME != 0,
            combo: mask & BIT_COMBO != 0,
            elemental: mask & BIT_ELEMENTAL != 0,
            sudden_death: mask & BIT_SUDDEN_DEATH != 0,
        })
    }

    /// Compact URL form: two lowercase hex digits.
    pub fn to_mask_str(&self) -> String {
        hex::encode([self.mask()])
    }

    pub fn parse_mask_str(s: &str) -> Result<Self, RulesetError> {
        let invalid = || RulesetError::InvalidMask(s.to_string());
        if s.len() != 2 {
            return Err(invalid());
        }
        let bytes = hex::decode(s).map_err(|_| invalid())?;
        Self::from_mask(bytes[0]).ok_or_else(invalid)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct V2Config {
    pub core: CoreConfig,
    pub classic: ClassicConfig,
    /// Cells still carry warning marks but their bias is never applied.
    pub shadow: bool,
}

impl Default for V2Config {
    fn default() -> Self {
        Self {
            core: CoreConfig::TACTICS,
            classic: ClassicConfig::none(),
            shadow: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RulesetVersion {
    V1,
    V2,
}

impl RulesetVersion {
    /// Discriminant byte mixed into the ruleset identity.
    #[inline]
    pub fn tag(self) -> u8 {
        match self {
            RulesetVersion::V1 => 1,
            RulesetVersion::V2 => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "version", rename_all = "lowercase")]
pub enum RulesetConfig {
    V1(CoreConfig),
    V2(V2Config),
}

pub const DEFAULT_V1: RulesetConfig = RulesetConfig::V1(CoreConfig::BASIC);
pub const DEFAULT_V2: RulesetConfig = RulesetConfig::V2(V2Config {
    core: CoreConfig::TACTICS,
    classic: ClassicConfig::none(),
    shadow: false,
});

impl RulesetConfig {
    #[inline]
    pub fn default_v1() -> Self {
        DEFAULT_V1
    }

    #[inline]
    pub fn default_v2() -> Self {
        DEFAULT_V2
    }

    #[inline]
    pub fn version(&self) -> RulesetVersion {
        match self {
            RulesetConfig::V1(_) => RulesetVersion::V1,
            RulesetConfig::V2(_) => RulesetVersion::V2,
        }
    }

    #[inline]
    pub fn core(&self) -> &CoreConfig {
        match self {
            RulesetConfig::V1(core) => core,
            RulesetConfig::V2(v2) => &v2.core,
        }
    }

    #[inline]
    pub fn classic(&self) -> Option<&ClassicConfig> {
        match self {
            RulesetConfig::V1(_) => None,
            RulesetConfig::V2(v2) => Some(&v2.classic),
        }
    }

    #[inline]
    pub fn is_shadow(&self) -> bool {
        match self {
            RulesetConfig::V1(_) => false,
            RulesetConfig::V2(v2) => v2.shadow,
        }
    }

    /// Classic toggles in effect; V1 has none.
    #[inline]
    pub fn active_classic(&self) -> ClassicConfig {
        self.classic().copied().unwrap_or_default()
    }

    /// Whether marks are recorded on the board at all.
    #[inline]
    pub fn records_marks(&self) -> bool {
        self.core().warning_mark
    }

    /// Whether recorded marks bias comparisons.
    #[inline]
    pub fn applies_marks(&self) -> bool {
        self.core().warning_mark && !self.is_shadow()
    }

    #[inline]
    pub fn applies_earth_boost(&self) -> bool {
        self.core().earth_boost
    }
}
