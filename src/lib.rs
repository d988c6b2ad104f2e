//! Microreef - a deterministic 2D reef ecosystem
//!
//! Core modules:
//! - `sim`: Deterministic simulation (geometry kernel, entities, tick automaton)
//! - `persistence`: Text-grammar load/validate/save with all-or-nothing ingestion
//! - `settings`: Data-driven simulation tunables
//! - `error`: Typed errors for loading, saving and configuration

pub mod error;
pub mod persistence;
pub mod settings;
pub mod sim;

pub use error::{ConfigError, LoadError, RecordError, SaveError, ValidationError};
pub use settings::SimParams;
pub use sim::Simulation;

/// Ecosystem constants
pub mod consts {
    /// Shared tolerance for coordinate equality and collinearity
    pub const EPSIL_ZERO: f64 = 0.5;

    /// World extent: coordinates live in [0, MAX]
    pub const MAX: f64 = 256.0;

    /// Algae
    pub const R_ALG: f64 = 1.0;
    pub const ALG_BIRTH_RATE: f64 = 0.5;
    pub const MAX_LIFE_ALG: u32 = 500;

    /// Coral
    pub const MAX_LIFE_COR: u32 = 1500;
    pub const L_REPRO: f64 = 40.0;
    pub const L_SEG_INTERNE: f64 = 28.0;
    pub const DELTA_ROT: f64 = 0.0625;
    pub const DELTA_L: f64 = 4.0;

    /// Scavengers
    pub const R_SCA: f64 = 3.0;
    pub const R_SCA_REPRO: f64 = 10.0;
    pub const DELTA_R_SCA: f64 = 1.0;
    pub const MAX_LIFE_SCA: u32 = 2000;

    /// Distance under which a coral's last segment eats an alga
    pub const ALGAE_HITBOX: f64 = EPSIL_ZERO * 1.2;

    /// Sweeping-pass sampling: at least this many micro segments per rotation
    pub const SWEEP_MIN_SAMPLES: u32 = 5;
    /// ...and one more per this much segment length
    pub const SWEEP_SAMPLE_SPACING: f64 = 2.0;

    /// Every fresh load reseeds the RNG with this value
    pub const RNG_SEED: u64 = 1;
}

/// Normalize angle to (-π, π]
#[inline]
pub fn normalize_angle(mut angle: f64) -> f64 {
    use std::f64::consts::{PI, TAU};
    while angle > PI {
        angle -= TAU;
    }
    while angle <= -PI {
        angle += TAU;
    }
    angle
}
