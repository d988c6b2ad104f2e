mod common;

use std::f64::consts::FRAC_PI_2;

use glam::DVec2;
use microreef::sim::{CoralStatus, DevPhase, RotationDir, ScavengerStatus, Segment};

use common::loaded;

#[test]
fn test_alga_ages_without_dying() {
    let mut sim = loaded("1\n128 128 1\n0\n0\n");
    sim.step();
    assert_eq!(sim.algae().len(), 1);
    assert_eq!(sim.algae()[0].age, 2);
    assert_eq!(sim.algae()[0].pos, DVec2::new(128.0, 128.0));
}

#[test]
fn test_rotation_out_of_world_flips_direction() {
    // Clockwise turn would push the tip past x = max - epsil_zero
    let text = format!("0\n1\n255 100 1 1 1 1 0 1 {FRAC_PI_2} 20\n0\n");
    let mut sim = loaded(&text);
    let before = sim.corals()[0].last().angle;

    sim.step();
    let coral = &sim.corals()[0];
    assert_eq!(coral.rotation, RotationDir::Trigo);
    assert_eq!(coral.last().angle, before);
    assert_eq!(coral.segment_count(), 1);
}

#[test]
fn test_scavenger_reaches_dead_coral() {
    // Tip at (120, 100), scavenger 30 below it: ceil(30 / 4) = 8 ticks
    let text = "0\n1\n100 100 5 3 0 0 0 1 0 20\n1\n120 70 1 3 0\n";
    let mut sim = loaded(text);
    let tip = sim.corals()[0].tip();

    for _ in 0..7 {
        sim.step();
    }
    assert_eq!(sim.scavengers()[0].status, ScavengerStatus::Seeking);
    assert_eq!(sim.scavengers()[0].target, Some(3));

    sim.step();
    let scavenger = &sim.scavengers()[0];
    assert_eq!(scavenger.status, ScavengerStatus::Feeding);
    assert!((scavenger.pos - tip).length() < 1e-9);
    assert!(sim.world().claimed.contains(&3));
}

#[test]
fn test_reproducing_coral_divides_after_eating() {
    let params = microreef::SimParams::default();
    let base = DVec2::new(100.0, 100.0);
    // Alga sits where the tip lands after the first turn
    let alga = Segment::new(base, params.delta_rot, 36.0).extremity();
    let text = format!(
        "1\n{} {} 1\n1\n100 100 5 1 1 0 1 1 0 36\n0\n",
        alga.x, alga.y
    );
    let mut sim = loaded(&text);

    sim.step();
    assert!(sim.algae().is_empty());
    assert!((sim.corals()[0].last().length - params.l_repro).abs() < 1e-9);
    assert_eq!(sim.counts().corals, 1);

    sim.step();
    assert_eq!(sim.counts().corals, 2);
    let parent = &sim.corals()[0];
    assert_eq!(parent.id, 1);
    assert!((parent.last().length - params.l_repro / 2.0).abs() < 1e-9);
    assert_eq!(parent.phase, DevPhase::Extending);

    let child = &sim.corals()[1];
    assert_ne!(child.id, 1);
    assert_eq!(child.status, CoralStatus::Alive);
    assert_eq!(child.phase, DevPhase::Extending);
    assert_eq!(child.segment_count(), 1);
    assert!((child.last().length - params.new_segment_length()).abs() < 1e-9);
}

#[test]
fn test_consumed_coral_is_removed_and_id_released() {
    // Dead coral of one 12-long segment, already under a feeding scavenger
    let text = "0\n1\n100 100 5 9 0 0 0 1 0 12\n1\n112 100 1 3 1 9\n";
    let mut sim = loaded(text);

    for _ in 0..3 {
        sim.step();
    }
    assert!(sim.corals().is_empty());
    assert!(!sim.world().used_ids.contains(&9));
    assert!(!sim.world().claimed.contains(&9));

    let scavenger = &sim.scavengers()[0];
    assert_eq!(scavenger.status, ScavengerStatus::Seeking);
    assert!((scavenger.radius - 6.0).abs() < 1e-12);
    assert!((scavenger.pos - DVec2::new(100.0, 100.0)).length() < 1e-9);
}
