//! Error types
//!
//! Loading distinguishes three tiers: a malformed record is skipped
//! ([`RecordError`]), a record breaking an invariant aborts the whole load
//! ([`ValidationError`] collected into [`LoadError::Invalid`]), and an
//! unreadable file or section count aborts immediately.

use std::path::PathBuf;

/// A single record that could not be parsed; the record is skipped
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RecordError {
    /// Token present but not a valid number of the expected kind
    #[error("line {line}: cannot read {field} from {token:?}")]
    BadToken {
        line: usize,
        field: &'static str,
        token: String,
    },

    /// Input ended in the middle of the record
    #[error("unexpected end of input while reading {field}")]
    MissingToken { field: &'static str },

    /// Integer outside the legal set of an enumeration
    #[error("line {line}: {value} is not a valid {field}")]
    BadCode {
        line: usize,
        field: &'static str,
        value: i64,
    },

    /// A coral needs at least one segment
    #[error("line {line}: coral declares no segments")]
    NoSegments { line: usize },
}

/// A parsed record breaking an entity invariant
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("center ({x}, {y}) lies outside the world")]
    CenterOutside { x: f64, y: f64 },

    #[error("coral {id}: computed extremity ({x}, {y}) lies outside the world")]
    ExtremityOutside { id: u32, x: f64, y: f64 },

    #[error("age must be positive, got {age}")]
    NonPositiveAge { age: i64 },

    #[error("coral id {id} is already in use")]
    DuplicateId { id: u32 },

    #[error("coral {id}: segment angle {angle} outside [-pi, pi]")]
    AngleOutside { id: u32, angle: f64 },

    #[error("coral {id}: segment length {length} outside [{min}, {max})")]
    LengthOutside {
        id: u32,
        length: f64,
        min: f64,
        max: f64,
    },

    #[error("coral {id}: segments {first} and {second} are superposed")]
    SelfSuperposition { id: u32, first: usize, second: usize },

    #[error(
        "coral {id} segment {segment} is superposed with coral {other} segment {other_segment}"
    )]
    OtherSuperposition {
        id: u32,
        segment: usize,
        other: u32,
        other_segment: usize,
    },

    #[error("coral {id}: segments {first} and {second} intersect")]
    SelfCollision { id: u32, first: usize, second: usize },

    #[error("coral {id} segment {segment} intersects coral {other} segment {other_segment}")]
    OtherCollision {
        id: u32,
        segment: usize,
        other: u32,
        other_segment: usize,
    },

    #[error("scavenger radius {radius} outside [{min}, {max})")]
    RadiusOutside { radius: f64, min: f64, max: f64 },

    #[error("scavenger targets unknown coral {id}")]
    UnknownTarget { id: u32 },
}

/// Failure to load a simulation file; the engine keeps its previous state
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("missing {section} count")]
    MissingCount { section: &'static str },

    #[error("line {line}: cannot read {section} count from {token:?}")]
    BadCount {
        section: &'static str,
        line: usize,
        token: String,
    },

    #[error("load aborted, {} invalid record(s)", .errors.len())]
    Invalid { errors: Vec<ValidationError> },
}

/// Failure to write a simulation file
#[derive(Debug, thiserror::Error)]
pub enum SaveError {
    #[error("cannot write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Failure to load simulation parameters
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read parameter file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse parameter JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid parameters: {0}")]
    Invalid(String),
}
