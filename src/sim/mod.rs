//! Deterministic reef simulation
//!
//! All ecosystem logic lives here. This module must stay deterministic:
//! - Seeded RNG only, reseeded on every load
//! - Stable iteration order (insertion order of each collection)
//! - Entities referenced by id, never by retained reference

pub mod collision;
pub mod engine;
pub mod forage;
pub mod growth;
pub mod segment;
pub mod state;
pub mod sweep;
pub mod tick;

pub use collision::{are_superposed, intersects, intersects_circle, orientation, Orientation};
pub use engine::{Simulation, Snapshot};
pub use segment::Segment;
pub use state::{
    Algae, Coral, CoralStatus, Counts, DevPhase, RotationDir, Scavenger, ScavengerStatus, World,
};
pub use tick::tick;
