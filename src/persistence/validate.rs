//! Semantic checks turning raw records into entities
//!
//! Checks run in a fixed order and stop at the first failure of a record.
//! Coral checks read the corals already accepted into the world being built,
//! and the id check inserts into its used-id set.

use std::f64::consts::PI;

use glam::DVec2;

use super::reader::{AlgaeRecord, CoralRecord, ScavengerRecord};
use crate::error::ValidationError;
use crate::settings::SimParams;
use crate::sim::collision::{are_superposed, intersects};
use crate::sim::state::{Algae, Coral, Scavenger, ScavengerStatus, World};

/// Margin kept between algae/scavenger centers and the world border
const CENTER_MARGIN: f64 = 1.0;

fn check_center(pos: DVec2, extent: f64) -> Result<(), ValidationError> {
    let range = CENTER_MARGIN..=extent - CENTER_MARGIN;
    if range.contains(&pos.x) && range.contains(&pos.y) {
        Ok(())
    } else {
        Err(ValidationError::CenterOutside { x: pos.x, y: pos.y })
    }
}

/// Loose bounds for coral points: (0, extent]
fn in_open_world(p: DVec2, extent: f64) -> bool {
    p.x > 0.0 && p.x <= extent && p.y > 0.0 && p.y <= extent
}

fn check_age(age: i64) -> Result<u32, ValidationError> {
    if age <= 0 {
        return Err(ValidationError::NonPositiveAge { age });
    }
    Ok(u32::try_from(age).unwrap_or(u32::MAX))
}

pub fn validate_algae(rec: &AlgaeRecord, params: &SimParams) -> Result<Algae, ValidationError> {
    check_center(rec.pos, params.world_max)?;
    let age = check_age(rec.age)?;
    Ok(Algae::new(rec.pos, age))
}

/// Validate a coral against itself and the corals already in `world`
pub fn validate_coral(
    rec: &CoralRecord,
    world: &mut World,
    params: &SimParams,
) -> Result<Coral, ValidationError> {
    let id = rec.id;
    let Some((&first, rest)) = rec.segments.split_first() else {
        // The reader never yields an empty chain
        return Err(ValidationError::LengthOutside {
            id,
            length: 0.0,
            min: params.new_segment_length(),
            max: params.l_repro,
        });
    };

    // Position: base, then every extremity of the chain
    if !in_open_world(rec.pos, params.world_max) {
        return Err(ValidationError::CenterOutside {
            x: rec.pos.x,
            y: rec.pos.y,
        });
    }
    let mut tip = rec.pos;
    for &(angle, length) in &rec.segments {
        tip += DVec2::new(angle.cos(), angle.sin()) * length;
        if !in_open_world(tip, params.world_max) {
            return Err(ValidationError::ExtremityOutside { id, x: tip.x, y: tip.y });
        }
    }

    let age = check_age(rec.age)?;

    if !world.used_ids.insert(id) {
        return Err(ValidationError::DuplicateId { id });
    }

    for &(angle, _) in &rec.segments {
        if !(-PI..=PI).contains(&angle) {
            return Err(ValidationError::AngleOutside { id, angle });
        }
    }

    let (min, max) = (params.new_segment_length(), params.l_repro);
    for &(_, length) in &rec.segments {
        if !(min..max).contains(&length) {
            return Err(ValidationError::LengthOutside { id, length, min, max });
        }
    }

    let coral = Coral::new(id, rec.pos, age, rec.status, rec.rotation, rec.phase, first, rest);
    let segs = coral.segments();

    for i in 0..segs.len() {
        for j in i + 1..segs.len() {
            if are_superposed(&segs[i], &segs[j]) {
                return Err(ValidationError::SelfSuperposition { id, first: i, second: j });
            }
        }
    }

    for (segment, seg) in segs.iter().enumerate() {
        for other in &world.corals {
            let superposed = other.segments().iter().position(|o| are_superposed(seg, o));
            if let Some(other_segment) = superposed {
                return Err(ValidationError::OtherSuperposition {
                    id,
                    segment,
                    other: other.id,
                    other_segment,
                });
            }
        }
    }

    for i in 0..segs.len() {
        for j in i + 1..segs.len() {
            if intersects(&segs[i], &segs[j]) {
                return Err(ValidationError::SelfCollision { id, first: i, second: j });
            }
        }
    }

    for (segment, seg) in segs.iter().enumerate() {
        for other in &world.corals {
            if let Some(other_segment) = other.segments().iter().position(|o| intersects(seg, o)) {
                return Err(ValidationError::OtherCollision {
                    id,
                    segment,
                    other: other.id,
                    other_segment,
                });
            }
        }
    }

    Ok(coral)
}

/// Validate a scavenger; a feeding target must be among the loaded corals
pub fn validate_scavenger(
    rec: &ScavengerRecord,
    world: &World,
    params: &SimParams,
) -> Result<Scavenger, ValidationError> {
    check_center(rec.pos, params.world_max)?;
    let age = check_age(rec.age)?;

    if !(params.r_sca..params.r_sca_repro).contains(&rec.radius) {
        return Err(ValidationError::RadiusOutside {
            radius: rec.radius,
            min: params.r_sca,
            max: params.r_sca_repro,
        });
    }

    let mut scavenger = Scavenger::new(rec.pos, age, rec.radius);
    if let (ScavengerStatus::Feeding, Some(target)) = (rec.status, rec.target) {
        if world.coral_index(target).is_none() {
            return Err(ValidationError::UnknownTarget { id: target });
        }
        scavenger.status = ScavengerStatus::Feeding;
        scavenger.target = Some(target);
    }
    Ok(scavenger)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{CoralStatus, DevPhase, RotationDir};

    fn coral_rec(id: u32, pos: DVec2, segments: Vec<(f64, f64)>) -> CoralRecord {
        CoralRecord {
            pos,
            age: 10,
            id,
            status: CoralStatus::Alive,
            rotation: RotationDir::Trigo,
            phase: DevPhase::Extending,
            segments,
        }
    }

    #[test]
    fn test_algae_bounds_and_age() {
        let params = SimParams::default();
        let ok = AlgaeRecord { pos: DVec2::new(1.0, 255.0), age: 1 };
        assert!(validate_algae(&ok, &params).is_ok());

        let outside = AlgaeRecord { pos: DVec2::new(0.5, 100.0), age: 1 };
        assert!(matches!(
            validate_algae(&outside, &params),
            Err(ValidationError::CenterOutside { .. })
        ));

        let newborn = AlgaeRecord { pos: DVec2::new(10.0, 10.0), age: 0 };
        assert_eq!(
            validate_algae(&newborn, &params),
            Err(ValidationError::NonPositiveAge { age: 0 })
        );
    }

    #[test]
    fn test_coral_extremity_outside() {
        let params = SimParams::default();
        let mut world = World::new();
        let rec = coral_rec(1, DVec2::new(240.0, 100.0), vec![(0.0, 20.0)]);
        assert!(matches!(
            validate_coral(&rec, &mut world, &params),
            Err(ValidationError::ExtremityOutside { id: 1, .. })
        ));
    }

    #[test]
    fn test_coral_duplicate_id() {
        let params = SimParams::default();
        let mut world = World::new();
        let first = coral_rec(3, DVec2::new(50.0, 50.0), vec![(0.0, 20.0)]);
        let coral = validate_coral(&first, &mut world, &params).unwrap();
        world.corals.push(coral);

        let second = coral_rec(3, DVec2::new(50.0, 150.0), vec![(0.0, 20.0)]);
        assert_eq!(
            validate_coral(&second, &mut world, &params),
            Err(ValidationError::DuplicateId { id: 3 })
        );
    }

    #[test]
    fn test_coral_length_range() {
        let params = SimParams::default();
        let mut world = World::new();
        let rec = coral_rec(1, DVec2::new(50.0, 50.0), vec![(0.0, 40.0)]);
        assert!(matches!(
            validate_coral(&rec, &mut world, &params),
            Err(ValidationError::LengthOutside { .. })
        ));
        let rec = coral_rec(2, DVec2::new(50.0, 50.0), vec![(0.0, 11.0)]);
        assert!(matches!(
            validate_coral(&rec, &mut world, &params),
            Err(ValidationError::LengthOutside { .. })
        ));
    }

    #[test]
    fn test_coral_folding_back_is_superposed() {
        let params = SimParams::default();
        let mut world = World::new();
        let rec = coral_rec(1, DVec2::new(50.0, 50.0), vec![(0.0, 20.0), (PI, 15.0)]);
        assert_eq!(
            validate_coral(&rec, &mut world, &params),
            Err(ValidationError::SelfSuperposition { id: 1, first: 0, second: 1 })
        );
    }

    #[test]
    fn test_coral_crossing_another() {
        let params = SimParams::default();
        let mut world = World::new();
        let horizontal = coral_rec(1, DVec2::new(50.0, 60.0), vec![(0.0, 30.0)]);
        let coral = validate_coral(&horizontal, &mut world, &params).unwrap();
        world.corals.push(coral);

        let vertical = coral_rec(2, DVec2::new(60.0, 50.0), vec![(PI / 2.0, 20.0)]);
        assert!(matches!(
            validate_coral(&vertical, &mut world, &params),
            Err(ValidationError::OtherCollision { id: 2, other: 1, .. })
        ));
    }

    #[test]
    fn test_scavenger_checks() {
        let params = SimParams::default();
        let world = World::new();
        let too_big = ScavengerRecord {
            pos: DVec2::new(50.0, 50.0),
            age: 1,
            radius: 10.0,
            status: ScavengerStatus::Seeking,
            target: None,
        };
        assert!(matches!(
            validate_scavenger(&too_big, &world, &params),
            Err(ValidationError::RadiusOutside { .. })
        ));

        let orphan = ScavengerRecord {
            radius: 3.0,
            status: ScavengerStatus::Feeding,
            target: Some(9),
            ..too_big
        };
        assert_eq!(
            validate_scavenger(&orphan, &world, &params),
            Err(ValidationError::UnknownTarget { id: 9 })
        );
    }
}
