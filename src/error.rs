use thiserror::Error;

/// Local validation failures when applying a single move.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("cell {0} is outside the 3x3 board")]
    CellOutOfRange(u8),
    #[error("card index {0} is outside the 5-card hand")]
    CardIndexOutOfRange(u8),
    #[error("cell {0} is already occupied")]
    CellOccupied(u8),
    #[error("card index {0} was already played by this side")]
    CardAlreadyPlayed(u8),
    #[error("card id {0} not found in catalog")]
    UnknownCard(u32),
    #[error("warning mark cell {0} must be an empty cell other than the placement cell")]
    InvalidWarningMark(u8),
    #[error("match is already complete")]
    MatchComplete,
}

/// A move failure located in a replay or live match.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("turn {turn}: {source}")]
pub struct SimulationError {
    /// 0-based turn number of the failing move
    pub turn: usize,
    #[source]
    pub source: MoveError,
}

/// Transcript hex input validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("malformed hex input")]
    MalformedHex,
    #[error("{len} bytes is not a whole number of turn records")]
    TruncatedRecord { len: usize },
    #[error("record {record}: field {field} has out-of-range value {value}")]
    FieldOutOfRange {
        record: usize,
        field: &'static str,
        value: u8,
    },
    #[error("{count} records exceed the 9-turn limit")]
    TooManyRecords { count: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TranscriptError {
    #[error("transcript already holds 9 moves")]
    TranscriptFull,
}

/// Failures while building a card catalog.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("failed to read card data: {0}")]
    Io(String),
    #[error("failed to parse card data: {0}")]
    Parse(String),
    #[error("no cards in catalog input")]
    Empty,
    #[error("duplicate card id {0}")]
    DuplicateId(u32),
    #[error("card id {id} has edge value {value} outside 0..=10")]
    InvalidEdge { id: u32, value: u8 },
}

/// Preset resolution failures. Distinct from transcript and move errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RulesetError {
    #[error("unknown ruleset key '{0}'")]
    UnknownKey(String),
    #[error("ruleset key '{0}' requires a classic mask")]
    MissingMask(String),
    #[error("ruleset key '{0}' does not take a classic mask")]
    UnexpectedMask(String),
    #[error("invalid classic mask '{0}'")]
    InvalidMask(String),
}
