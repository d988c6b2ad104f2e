//! Loading and saving simulation files
//!
//! Loading is all-or-nothing:
//! - Malformed records are skipped with a warning
//! - Any validation failure discards every entity read by this load
//! - An unreadable file or section count aborts immediately

pub mod reader;
pub mod validate;
pub mod writer;

use std::path::Path;

use crate::error::{LoadError, SaveError};
use crate::settings::SimParams;
use crate::sim::state::World;

pub use reader::parse_file;
pub use writer::world_to_string;

/// Build a fresh world from file text
pub fn parse_world(text: &str, params: &SimParams) -> Result<World, LoadError> {
    let parsed = parse_file(text)?;
    let mut world = World::new();
    let mut errors = Vec::new();

    for rec in &parsed.algae {
        match validate::validate_algae(rec, params) {
            Ok(algae) => world.algae.push(algae),
            Err(err) => {
                log::warn!("Invalid alga: {err}");
                errors.push(err);
            }
        }
    }

    for rec in &parsed.corals {
        match validate::validate_coral(rec, &mut world, params) {
            Ok(coral) => world.corals.push(coral),
            Err(err) => {
                log::warn!("Invalid coral: {err}");
                errors.push(err);
            }
        }
    }

    for rec in &parsed.scavengers {
        match validate::validate_scavenger(rec, &world, params) {
            Ok(scavenger) => {
                if let Some(target) = scavenger.target {
                    world.claimed.insert(target);
                }
                world.scavengers.push(scavenger);
            }
            Err(err) => {
                log::warn!("Invalid scavenger: {err}");
                errors.push(err);
            }
        }
    }

    if !errors.is_empty() {
        log::error!("Load aborted: {} record(s) failed validation", errors.len());
        return Err(LoadError::Invalid { errors });
    }

    if parsed.skipped > 0 {
        log::warn!("{} malformed record(s) skipped", parsed.skipped);
    }
    Ok(world)
}

/// Read and validate a simulation file
pub fn load_world(path: impl AsRef<Path>, params: &SimParams) -> Result<World, LoadError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| {
        log::error!("Cannot open {}: {source}", path.display());
        LoadError::Io {
            path: path.to_path_buf(),
            source,
        }
    })?;

    let world = parse_world(&text, params)?;
    let counts = world.counts();
    log::info!(
        "Loaded {}: {} algae, {} corals, {} scavengers",
        path.display(),
        counts.algae,
        counts.corals,
        counts.scavengers
    );
    Ok(world)
}

/// Write the world in the same grammar `load_world` reads
pub fn save_world(path: impl AsRef<Path>, world: &World) -> Result<(), SaveError> {
    let path = path.as_ref();
    std::fs::write(path, world_to_string(world)).map_err(|source| SaveError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let counts = world.counts();
    log::info!(
        "Saved {}: {} algae, {} corals, {} scavengers",
        path.display(),
        counts.algae,
        counts.corals,
        counts.scavengers
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_world_claims_feeding_targets() {
        let text = "0\n1\n100 100 5 7 0 0 0 1 0 20\n1\n110 100 2 4 1 7\n";
        let world = parse_world(text, &SimParams::default()).unwrap();
        assert!(world.used_ids.contains(&7));
        assert!(world.claimed.contains(&7));
        assert_eq!(world.counts().scavengers, 1);
    }

    #[test]
    fn test_any_invalid_record_discards_everything() {
        let text = "2\n10 10 1\n20 20 -3\n0\n0\n";
        match parse_world(text, &SimParams::default()) {
            Err(LoadError::Invalid { errors }) => assert_eq!(errors.len(), 1),
            other => panic!("expected Invalid, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_file() {
        let path = std::env::temp_dir().join("microreef-does-not-exist.txt");
        assert!(matches!(
            load_world(&path, &SimParams::default()),
            Err(LoadError::Io { .. })
        ));
    }
}
