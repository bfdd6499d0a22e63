//! Ruleset identity.
//!
//! Every configuration is first written into a fixed byte layout (domain tag,
//! version discriminant, then each field at a fixed position) and that layout
//! is hashed with SHA-256. Struct field order, serde, and how a value was
//! constructed never reach the hashed bytes.

use sha2::{Digest, Sha256};

use crate::rules::{ClassicConfig, CoreConfig, RulesetConfig, V2Config};

// Domain tag (arbitrary but fixed)
const DOM_RULESET: &[u8; 16] = b"triplereplay/rs\0";

/// Bytes per encoded section
const CORE_LEN: usize = 4;
const CLASSIC_LEN: usize = 5;

#[inline]
fn core_bytes(core: &CoreConfig) -> [u8; CORE_LEN] {
    [
        u8::from(core.warning_mark),
        u8::from(core.earth_boost),
        core.warning_mark_penalty,
        core.earth_boost_bonus,
    ]
}

#[inline]
fn classic_bytes(classic: &ClassicConfig) -> [u8; CLASSIC_LEN] {
    [
        u8::from(classic.plus),
        u8::from(classic.same),
        u8::from(classic.combo),
        u8::from(classic.elemental),
        u8::from(classic.sudden_death),
    ]
}

/// Canonical byte layout of a ruleset configuration.
pub fn canonical_bytes(config: &RulesetConfig) -> Vec<u8> {
    let mut out = Vec::with_capacity(DOM_RULESET.len() + 1 + CORE_LEN + CLASSIC_LEN + 1);
    out.extend_from_slice(DOM_RULESET);
    out.push(config.version().tag());
    match config {
        RulesetConfig::V1(core) => {
            out.extend_from_slice(&core_bytes(core));
        }
        RulesetConfig::V2(v2) => {
            out.extend_from_slice(&core_bytes(&v2.core));
            out.extend_from_slice(&classic_bytes(&v2.classic));
            out.push(u8::from(v2.shadow));
        }
    }
    out
}

fn digest_hex(bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    format!("0x{}", hex::encode(digest))
}

pub fn compute_ruleset_id_v1(core: &CoreConfig) -> String {
    digest_hex(&canonical_bytes(&RulesetConfig::V1(*core)))
}

pub fn compute_ruleset_id_v2(config: &V2Config) -> String {
    digest_hex(&canonical_bytes(&RulesetConfig::V2(*config)))
}

/// Dispatches on the version tag.
pub fn compute_ruleset_id(config: &RulesetConfig) -> String {
    let id = match config {
        RulesetConfig::V1(core) => compute_ruleset_id_v1(core),
        RulesetConfig::V2(v2) => compute_ruleset_id_v2(v2),
    };
    log::trace!("ruleset id {id} for {:?}", config.version());
    id
}
