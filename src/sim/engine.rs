//! Simulation facade used by the binary and by tests

use std::path::Path;

use serde::Serialize;

use super::state::{Algae, Coral, Counts, Scavenger, World};
use super::tick::tick;
use crate::error::{LoadError, SaveError};
use crate::persistence::{load_world, save_world};
use crate::settings::SimParams;

/// Owned, serializable copy of the world between ticks
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub ticks: u64,
    pub counts: Counts,
    pub algae: Vec<Algae>,
    pub corals: Vec<Coral>,
    pub scavengers: Vec<Scavenger>,
}

/// A reef simulation: one world, its parameters and the algae-birth switch
#[derive(Debug, Clone)]
pub struct Simulation {
    world: World,
    params: SimParams,
    algae_birth: bool,
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new()
    }
}

impl Simulation {
    pub fn new() -> Self {
        Self::with_params(SimParams::default())
    }

    pub fn with_params(params: SimParams) -> Self {
        Self {
            world: World::new(),
            params,
            algae_birth: false,
        }
    }

    /// Load a simulation file into a fresh, reseeded world
    ///
    /// On failure the current world is kept untouched.
    pub fn start(&mut self, path: impl AsRef<Path>) -> Result<Counts, LoadError> {
        let world = load_world(path, &self.params)?;
        self.world = world;
        Ok(self.world.counts())
    }

    /// Advance exactly one tick
    pub fn step(&mut self) {
        tick(&mut self.world, &self.params, self.algae_birth);
    }

    /// Write the current world in the loadable text format
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SaveError> {
        save_world(path, &self.world)
    }

    /// Drop every entity and reseed
    pub fn reset(&mut self) {
        self.world = World::new();
    }

    pub fn algae(&self) -> &[Algae] {
        &self.world.algae
    }

    pub fn corals(&self) -> &[Coral] {
        &self.world.corals
    }

    pub fn scavengers(&self) -> &[Scavenger] {
        &self.world.scavengers
    }

    pub fn counts(&self) -> Counts {
        self.world.counts()
    }

    /// Ticks since the last successful load or reset
    pub fn tick_count(&self) -> u64 {
        self.world.ticks
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn params(&self) -> &SimParams {
        &self.params
    }

    pub fn algae_birth(&self) -> bool {
        self.algae_birth
    }

    pub fn set_algae_birth(&mut self, enabled: bool) {
        self.algae_birth = enabled;
    }

    pub fn toggle_algae_birth(&mut self) -> bool {
        self.algae_birth = !self.algae_birth;
        self.algae_birth
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            ticks: self.world.ticks,
            counts: self.world.counts(),
            algae: self.world.algae.clone(),
            corals: self.world.corals.clone(),
            scavengers: self.world.scavengers.clone(),
        }
    }
}
