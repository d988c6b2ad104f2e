//! Serialization into the text grammar read by [`super::reader`]

use std::fmt::Write;

use crate::sim::state::{Algae, Coral, Scavenger, ScavengerStatus, World};

pub const HEADER: &str = "# Simulation State File";

pub fn write_algae(out: &mut String, algae: &Algae) {
    let _ = writeln!(out, "    {} {} {}", algae.pos.x, algae.pos.y, algae.age);
}

/// Coral header line, then one continuation line per segment
pub fn write_coral(out: &mut String, coral: &Coral) {
    let base = coral.position();
    let _ = writeln!(
        out,
        "    {} {} {} {} {} {} {} {}",
        base.x,
        base.y,
        coral.age,
        coral.id,
        coral.status.code(),
        coral.rotation.code(),
        coral.phase.code(),
        coral.segment_count()
    );
    for seg in coral.segments() {
        let _ = writeln!(out, "        {} {}", seg.angle, seg.length);
    }
}

pub fn write_scavenger(out: &mut String, scavenger: &Scavenger) {
    let _ = write!(
        out,
        "    {} {} {} {} {}",
        scavenger.pos.x,
        scavenger.pos.y,
        scavenger.age,
        scavenger.radius,
        scavenger.status.code()
    );
    // A seeking scavenger's claim is transient and has no field in the grammar
    if let (ScavengerStatus::Feeding, Some(target)) = (scavenger.status, scavenger.target) {
        let _ = write!(out, " {target}");
    }
    out.push('\n');
}

/// Whole world as file text
pub fn world_to_string(world: &World) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{HEADER}\n");

    let _ = writeln!(out, "{}", world.algae.len());
    for algae in &world.algae {
        write_algae(&mut out, algae);
    }
    out.push('\n');

    let _ = writeln!(out, "{}", world.corals.len());
    for coral in &world.corals {
        write_coral(&mut out, coral);
    }
    out.push('\n');

    let _ = writeln!(out, "{}", world.scavengers.len());
    for scavenger in &world.scavengers {
        write_scavenger(&mut out, scavenger);
    }
    out
}
