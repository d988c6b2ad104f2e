//! Entity model and world state
//!
//! The `World` exclusively owns every entity collection plus the id
//! bookkeeping and the seeded RNG, so two engines never share state.

use std::collections::BTreeSet;

use glam::DVec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::segment::Segment;
use crate::consts::RNG_SEED;

/// Coral life status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CoralStatus {
    Dead,
    Alive,
}

/// Sense in which a coral turns its last segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RotationDir {
    /// Counterclockwise (positive angles)
    Trigo,
    /// Clockwise
    InvTrigo,
}

impl RotationDir {
    /// +1 for counterclockwise, -1 for clockwise
    pub fn sign(self) -> f64 {
        match self {
            RotationDir::Trigo => 1.0,
            RotationDir::InvTrigo => -1.0,
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            RotationDir::Trigo => RotationDir::InvTrigo,
            RotationDir::InvTrigo => RotationDir::Trigo,
        }
    }
}

/// Developmental phase of a coral
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DevPhase {
    /// Reaching the growth threshold appends a segment
    Extending,
    /// Reaching the growth threshold divides the coral
    Reproducing,
}

/// Foraging status of a scavenger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScavengerStatus {
    Seeking,
    Feeding,
}

impl CoralStatus {
    /// Integer code used by the text grammar
    pub fn code(self) -> u8 {
        match self {
            CoralStatus::Dead => 0,
            CoralStatus::Alive => 1,
        }
    }

    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(CoralStatus::Dead),
            1 => Some(CoralStatus::Alive),
            _ => None,
        }
    }
}

impl RotationDir {
    pub fn code(self) -> u8 {
        match self {
            RotationDir::Trigo => 0,
            RotationDir::InvTrigo => 1,
        }
    }

    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(RotationDir::Trigo),
            1 => Some(RotationDir::InvTrigo),
            _ => None,
        }
    }
}

impl DevPhase {
    pub fn code(self) -> u8 {
        match self {
            DevPhase::Extending => 0,
            DevPhase::Reproducing => 1,
        }
    }

    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(DevPhase::Extending),
            1 => Some(DevPhase::Reproducing),
            _ => None,
        }
    }
}

impl ScavengerStatus {
    pub fn code(self) -> u8 {
        match self {
            ScavengerStatus::Seeking => 0,
            ScavengerStatus::Feeding => 1,
        }
    }

    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(ScavengerStatus::Seeking),
            1 => Some(ScavengerStatus::Feeding),
            _ => None,
        }
    }
}

/// A point organism, food for coral
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Algae {
    pub pos: DVec2,
    pub age: u32,
}

impl Algae {
    pub fn new(pos: DVec2, age: u32) -> Self {
        Self { pos, age }
    }
}

/// A segmented skeletal organism
///
/// The chain is never empty: [`Coral::pop_last`] refuses to remove the
/// final segment, whoever consumes it drops the whole coral instead.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Coral {
    pub id: u32,
    pub age: u32,
    pub status: CoralStatus,
    pub rotation: RotationDir,
    pub phase: DevPhase,
    segments: Vec<Segment>,
}

impl Coral {
    /// Build a coral from its base and a chain of (angle, length) pairs;
    /// each segment starts at the previous extremity
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: u32,
        base: DVec2,
        age: u32,
        status: CoralStatus,
        rotation: RotationDir,
        phase: DevPhase,
        first: (f64, f64),
        rest: &[(f64, f64)],
    ) -> Self {
        let mut segments = Vec::with_capacity(rest.len() + 1);
        segments.push(Segment::new(base, first.0, first.1));
        let mut coral = Self {
            id,
            age,
            status,
            rotation,
            phase,
            segments,
        };
        for &(angle, length) in rest {
            coral.push_segment(angle, length);
        }
        coral
    }

    /// Base of the first segment
    pub fn position(&self) -> DVec2 {
        self.segments[0].base
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    pub fn last(&self) -> &Segment {
        &self.segments[self.segments.len() - 1]
    }

    /// Second-to-last segment, if the chain has one
    pub fn before_last(&self) -> Option<&Segment> {
        self.segments.iter().rev().nth(1)
    }

    pub fn tip(&self) -> DVec2 {
        self.last().extremity()
    }

    pub fn is_alive(&self) -> bool {
        self.status == CoralStatus::Alive
    }

    /// Append a segment continuing from the current tip
    pub fn push_segment(&mut self, angle: f64, length: f64) {
        let base = self.tip();
        self.segments.push(Segment::new(base, angle, length));
    }

    /// Replace the last segment (its base stays attached to the chain)
    pub fn set_last(&mut self, seg: Segment) {
        let n = self.segments.len();
        self.segments[n - 1] = Segment { base: self.segments[n - 1].base, ..seg };
    }

    /// Remove and return the last segment, unless it is the only one left
    pub fn pop_last(&mut self) -> Option<Segment> {
        if self.segments.len() > 1 {
            self.segments.pop()
        } else {
            None
        }
    }
}

/// A mobile circular organism feeding on dead coral
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scavenger {
    pub pos: DVec2,
    pub age: u32,
    pub radius: f64,
    pub status: ScavengerStatus,
    /// Dead coral this scavenger has claimed
    pub target: Option<u32>,
}

impl Scavenger {
    pub fn new(pos: DVec2, age: u32, radius: f64) -> Self {
        Self {
            pos,
            age,
            radius,
            status: ScavengerStatus::Seeking,
            target: None,
        }
    }

    /// Drop the target and go back to seeking
    pub fn release(&mut self) {
        self.status = ScavengerStatus::Seeking;
        self.target = None;
    }
}

/// Population counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counts {
    pub algae: usize,
    pub corals: usize,
    pub scavengers: usize,
}

/// Complete simulation state (deterministic for a given input and tick count)
#[derive(Debug, Clone, PartialEq)]
pub struct World {
    pub algae: Vec<Algae>,
    pub corals: Vec<Coral>,
    pub scavengers: Vec<Scavenger>,
    /// Ids of every coral currently present
    pub used_ids: BTreeSet<u32>,
    /// Dead-coral ids already claimed by a scavenger
    pub claimed: BTreeSet<u32>,
    pub rng: Pcg32,
    /// Ticks applied since the world was loaded
    pub ticks: u64,
    /// Where the search for a fresh coral id starts
    next_id: u32,
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

impl World {
    /// Empty world with a freshly seeded RNG
    pub fn new() -> Self {
        Self {
            algae: Vec::new(),
            corals: Vec::new(),
            scavengers: Vec::new(),
            used_ids: BTreeSet::new(),
            claimed: BTreeSet::new(),
            rng: Pcg32::seed_from_u64(RNG_SEED),
            ticks: 0,
            next_id: 1,
        }
    }

    /// Allocate an id not used by any present coral
    pub fn fresh_coral_id(&mut self) -> u32 {
        while self.used_ids.contains(&self.next_id) {
            self.next_id += 1;
        }
        let id = self.next_id;
        self.used_ids.insert(id);
        self.next_id += 1;
        id
    }

    /// Index of the coral with the given id
    pub fn coral_index(&self, id: u32) -> Option<usize> {
        self.corals.iter().position(|c| c.id == id)
    }

    /// Remove a coral and release its id from both id sets
    pub fn remove_coral(&mut self, id: u32) {
        if let Some(idx) = self.coral_index(id) {
            self.corals.remove(idx);
        }
        self.used_ids.remove(&id);
        self.claimed.remove(&id);
    }

    pub fn counts(&self) -> Counts {
        Counts {
            algae: self.algae.len(),
            corals: self.corals.len(),
            scavengers: self.scavengers.len(),
        }
    }
}
