//! Simulation tunables
//!
//! Every field defaults to the matching value in [`crate::consts`]; a JSON
//! file may override any subset of them.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// Numeric parameters driving the tick automaton
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimParams {
    /// World extent: coordinates live in [0, world_max]
    pub world_max: f64,

    // === Algae ===
    /// Probability of one alga being born per tick (when births are on)
    pub alg_birth_rate: f64,
    pub max_life_alg: u32,
    /// Segment-to-alga distance under which a coral eats it
    pub algae_hitbox: f64,

    // === Coral ===
    pub max_life_cor: u32,
    /// Last-segment length that triggers growth or division
    pub l_repro: f64,
    /// l_repro - l_seg_interne is the length of a fresh segment
    pub l_seg_interne: f64,
    /// Rotation step (radians)
    pub delta_rot: f64,
    /// Growth step, also the scavenger move/bite length
    pub delta_l: f64,

    // === Scavengers ===
    pub r_sca: f64,
    pub r_sca_repro: f64,
    pub delta_r_sca: f64,
    pub max_life_sca: u32,

    // === Sweeping pass ===
    /// Minimum number of chords approximating a rotation arc
    pub sweep_min_samples: u32,
    /// Extra chord per this much segment length
    pub sweep_sample_spacing: f64,
}

impl Default for SimParams {
    fn default() -> Self {
        Self {
            world_max: MAX,

            alg_birth_rate: ALG_BIRTH_RATE,
            max_life_alg: MAX_LIFE_ALG,
            algae_hitbox: ALGAE_HITBOX,

            max_life_cor: MAX_LIFE_COR,
            l_repro: L_REPRO,
            l_seg_interne: L_SEG_INTERNE,
            delta_rot: DELTA_ROT,
            delta_l: DELTA_L,

            r_sca: R_SCA,
            r_sca_repro: R_SCA_REPRO,
            delta_r_sca: DELTA_R_SCA,
            max_life_sca: MAX_LIFE_SCA,

            sweep_min_samples: SWEEP_MIN_SAMPLES,
            sweep_sample_spacing: SWEEP_SAMPLE_SPACING,
        }
    }
}

impl SimParams {
    /// Length of a freshly created segment
    #[inline]
    pub fn new_segment_length(&self) -> f64 {
        self.l_repro - self.l_seg_interne
    }

    /// Load from a JSON file; missing fields keep their defaults
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let params: SimParams = serde_json::from_str(&text)?;
        params.validate()?;
        log::info!("Loaded simulation parameters from {}", path.as_ref().display());
        Ok(params)
    }

    /// Reject parameter sets the automaton cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("world_max", self.world_max),
            ("l_repro", self.l_repro),
            ("delta_rot", self.delta_rot),
            ("delta_l", self.delta_l),
            ("r_sca", self.r_sca),
            ("sweep_sample_spacing", self.sweep_sample_spacing),
        ];
        for (name, value) in positive {
            if value.is_nan() || value <= 0.0 {
                return Err(ConfigError::Invalid(format!("{name} must be positive, got {value}")));
            }
        }
        if !(0.0..=1.0).contains(&self.alg_birth_rate) {
            return Err(ConfigError::Invalid(format!(
                "alg_birth_rate must be within [0, 1], got {}",
                self.alg_birth_rate
            )));
        }
        if !(self.l_seg_interne >= 0.0 && self.l_seg_interne < self.l_repro) {
            return Err(ConfigError::Invalid(format!(
                "l_seg_interne must be within [0, l_repro), got {}",
                self.l_seg_interne
            )));
        }
        if self.r_sca_repro <= self.r_sca {
            return Err(ConfigError::Invalid(format!(
                "r_sca_repro ({}) must exceed r_sca ({})",
                self.r_sca_repro, self.r_sca
            )));
        }
        if self.sweep_min_samples == 0 {
            return Err(ConfigError::Invalid("sweep_min_samples must be at least 1".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let params = SimParams::default();
        assert!(params.validate().is_ok());
        assert!((params.new_segment_length() - 12.0).abs() < 1e-12);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let params: SimParams = serde_json::from_str(r#"{ "delta_rot": 0.03 }"#).unwrap();
        assert!((params.delta_rot - 0.03).abs() < 1e-12);
        assert_eq!(params.max_life_alg, MAX_LIFE_ALG);
    }

    #[test]
    fn test_invalid_params_rejected() {
        let params = SimParams {
            alg_birth_rate: 1.5,
            ..Default::default()
        };
        assert!(matches!(params.validate(), Err(ConfigError::Invalid(_))));

        let params = SimParams {
            l_seg_interne: 40.0,
            ..Default::default()
        };
        assert!(params.validate().is_err());

        let params = SimParams {
            sweep_min_samples: 0,
            ..Default::default()
        };
        assert!(params.validate().is_err());
    }
}
