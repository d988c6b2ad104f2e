//! Coral growth automaton
//!
//! Each alive coral either turns its last segment one step (and possibly
//! eats an alga), starts a new segment, or divides. Every change is first
//! built as a candidate segment and committed only once it is legal.

use std::f64::consts::TAU;

use super::collision::{are_superposed, intersects, intersects_circle, segment_within_world};
use super::segment::Segment;
use super::state::{Coral, CoralStatus, DevPhase, World};
use super::sweep::{sample_count, sweep_crosses};
use crate::settings::SimParams;

/// Whether `candidate` may replace the last segment of `corals[idx]`
///
/// The whole chain must stay inside the world, the candidate may neither
/// cross nor fold back over the rest of its own chain, and it may not cross
/// any segment of another coral (dead ones included).
pub fn last_segment_is_legal(
    corals: &[Coral],
    idx: usize,
    candidate: &Segment,
    extent: f64,
) -> bool {
    let coral = &corals[idx];
    let rest = &coral.segments()[..coral.segment_count() - 1];

    if !segment_within_world(candidate, extent)
        || !rest.iter().all(|s| segment_within_world(s, extent))
    {
        return false;
    }

    if rest
        .iter()
        .any(|s| intersects(candidate, s) || are_superposed(candidate, s))
    {
        return false;
    }

    corals
        .iter()
        .enumerate()
        .filter(|&(j, _)| j != idx)
        .all(|(_, other)| other.segments().iter().all(|s| !intersects(candidate, s)))
}

fn flip_rotation(world: &mut World, idx: usize) {
    let coral = &mut world.corals[idx];
    coral.rotation = coral.rotation.flipped();
}

/// Turn the last segment by one step; flip the direction instead if the
/// step is illegal
fn rotate_step(world: &mut World, idx: usize, params: &SimParams) {
    let coral = &world.corals[idx];
    let delta = coral.rotation.sign() * params.delta_rot;
    let last = *coral.last();
    let candidate = last.rotated(delta);

    let samples = sample_count(
        last.length,
        params.sweep_min_samples,
        params.sweep_sample_spacing,
    );
    let swept = coral
        .before_last()
        .is_some_and(|prev| sweep_crosses(&last, delta, prev, samples));

    if swept || !last_segment_is_legal(&world.corals, idx, &candidate, params.world_max) {
        flip_rotation(world, idx);
        return;
    }

    world.corals[idx].set_last(candidate);
    feed_on_algae(world, idx, params);
}

/// Eat the first alga touched by the last segment, extending it
fn feed_on_algae(world: &mut World, idx: usize, params: &SimParams) {
    let last = *world.corals[idx].last();
    let Some(eaten) = world
        .algae
        .iter()
        .position(|a| intersects_circle(&last, a.pos, params.algae_hitbox))
    else {
        return;
    };

    let extended = last.with_length(last.length + params.delta_l);
    if !last_segment_is_legal(&world.corals, idx, &extended, params.world_max) {
        flip_rotation(world, idx);
        return;
    }

    world.corals[idx].set_last(extended);
    let algae = world.algae.remove(eaten);
    log::debug!(
        "Coral {} ate alga at ({}, {})",
        world.corals[idx].id,
        algae.pos.x,
        algae.pos.y
    );
}

/// Append a fresh segment and turn it until it finds a legal orientation
fn start_segment(world: &mut World, idx: usize, params: &SimParams) {
    let coral = &mut world.corals[idx];
    let angle = coral.last().angle;
    coral.push_segment(angle, params.new_segment_length());
    coral.phase = DevPhase::Reproducing;

    let delta = coral.rotation.sign() * params.delta_rot;
    let attempts = (TAU / params.delta_rot).ceil() as usize + 1;
    let mut candidate = *coral.last();

    for _ in 0..attempts {
        candidate = candidate.rotated(delta);
        if last_segment_is_legal(&world.corals, idx, &candidate, params.world_max) {
            world.corals[idx].set_last(candidate);
            return;
        }
    }

    // Boxed in: give up on the new segment for now
    let coral = &mut world.corals[idx];
    coral.pop_last();
    coral.phase = DevPhase::Extending;
    coral.rotation = coral.rotation.flipped();
    log::debug!("Coral {} found no room for a new segment", coral.id);
}

/// Split off an offspring from the tip and halve the last segment
fn divide(world: &mut World, idx: usize, params: &SimParams) -> Coral {
    let length = params.new_segment_length();
    let id = world.fresh_coral_id();

    let parent = &mut world.corals[idx];
    let last = *parent.last();
    let base = last.extremity() - last.direction() * length;
    let child = Coral::new(
        id,
        base,
        1,
        CoralStatus::Alive,
        parent.rotation,
        DevPhase::Extending,
        (last.angle, length),
        &[],
    );

    parent.set_last(last.with_length(last.length / 2.0));
    parent.phase = DevPhase::Extending;
    log::debug!("Coral {} divided, offspring {}", parent.id, id);
    child
}

/// Run the automaton over every alive coral
///
/// Offspring join the world only after every existing coral has been
/// processed.
pub fn grow_corals(world: &mut World, params: &SimParams) {
    let mut offspring = Vec::new();

    for idx in 0..world.corals.len() {
        let coral = &world.corals[idx];
        if !coral.is_alive() {
            continue;
        }
        let (length, phase) = (coral.last().length, coral.phase);

        if length < params.l_repro {
            rotate_step(world, idx, params);
        } else {
            match phase {
                DevPhase::Extending => start_segment(world, idx, params),
                DevPhase::Reproducing => offspring.push(divide(world, idx, params)),
            }
        }
    }

    world.corals.extend(offspring);
}
