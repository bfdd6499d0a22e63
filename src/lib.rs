#![forbid(unsafe_code)]
#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)] // may be revisited
#![allow(clippy::missing_errors_doc, clippy::must_use_candidate)]
#![allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)] // board indices fit in u8

pub mod types;
pub mod error;
pub mod rules;
pub mod cards;
pub mod board;
pub mod state;
pub mod hash;
pub mod registry;
pub mod codec;
pub mod rng;

pub mod engine {
    pub mod apply;
    pub mod score;
    pub mod simulate;
}

// Re-exports: stable minimal API surface for external callers
pub use crate::board::{Board, Slot};
pub use crate::cards::{catalog_from_json_str, load_catalog_from_json, Card, CardCatalog};
pub use crate::codec::{decode_turns_from_hex, encode_turns_to_hex, EncodeOptions};
pub use crate::engine::apply::{apply_move, FlipEvent, FlipReason, FlipTrace, MoveOutcome};
pub use crate::engine::score::{
    board_advantage, score, tile_count, AdvantageLabel, BoardAdvantage, TileCount,
};
pub use crate::engine::simulate::{
    match_outcome, simulate, simulate_across, LiveMatch, MatchOutcome, MatchReplay, MatchSetup,
    TurnSummary,
};
pub use crate::error::{
    CatalogError, DecodeError, MoveError, RulesetError, SimulationError, TranscriptError,
};
pub use crate::hash::{compute_ruleset_id, compute_ruleset_id_v1, compute_ruleset_id_v2};
pub use crate::registry::RulesetRegistry;
pub use crate::rng::{random_terrain, rng_for_seed};
pub use crate::rules::{
    ClassicConfig, CoreConfig, RulesetConfig, RulesetVersion, V2Config, DEFAULT_V1, DEFAULT_V2,
};
pub use crate::state::{Deck, Hand, MatchState, Move, Transcript};
pub use crate::types::{Edge, Element, Side};
