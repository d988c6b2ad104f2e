//! Scavenger foraging state machine
//!
//! SEEKING: claim the nearest unclaimed dead coral and walk to its tip.
//! FEEDING: bite the last segment of the claimed coral, following the tip.

use glam::DVec2;

use super::state::{Scavenger, ScavengerStatus, World};
use crate::settings::SimParams;

/// Nearest dead coral (by base position) nobody has claimed yet
fn nearest_unclaimed(world: &World, from: DVec2) -> Option<u32> {
    world
        .corals
        .iter()
        .filter(|c| !c.is_alive() && !world.claimed.contains(&c.id))
        .min_by(|a, b| {
            a.position()
                .distance_squared(from)
                .total_cmp(&b.position().distance_squared(from))
        })
        .map(|c| c.id)
}

fn release(world: &mut World, idx: usize) {
    if let Some(target) = world.scavengers[idx].target {
        world.claimed.remove(&target);
    }
    world.scavengers[idx].release();
}

fn seek(world: &mut World, idx: usize, params: &SimParams) {
    let current = world.scavengers[idx].target;
    let target = match current {
        Some(id) if world.coral_index(id).is_some() => id,
        stale => {
            if stale.is_some() {
                release(world, idx);
            }
            let Some(id) = nearest_unclaimed(world, world.scavengers[idx].pos) else {
                return;
            };
            world.claimed.insert(id);
            world.scavengers[idx].target = Some(id);
            id
        }
    };

    let Some(cidx) = world.coral_index(target) else {
        return;
    };
    let tip = world.corals[cidx].tip();
    let scavenger = &mut world.scavengers[idx];
    let to_tip = tip - scavenger.pos;
    let distance = to_tip.length();

    if distance <= params.delta_l {
        scavenger.pos = tip;
        scavenger.status = ScavengerStatus::Feeding;
    } else {
        scavenger.pos += to_tip / distance * params.delta_l;
    }
}

/// One bite; returns the offspring if the scavenger reached its
/// reproduction radius
fn feed(world: &mut World, idx: usize, params: &SimParams) -> Option<Scavenger> {
    let Some(target) = world.scavengers[idx].target else {
        release(world, idx);
        return None;
    };
    let Some(cidx) = world.coral_index(target) else {
        release(world, idx);
        return None;
    };
    // Still alive (possible in a loaded file): wait for it to die
    if world.corals[cidx].is_alive() {
        return None;
    }

    let coral = &mut world.corals[cidx];
    let last = *coral.last();
    let bite_point = last.extremity();

    let new_pos = if last.length > params.delta_l {
        let shorter = last.with_length(last.length - params.delta_l);
        coral.set_last(shorter);
        shorter.extremity()
    } else if coral.pop_last().is_some() {
        last.base
    } else {
        // Final segment eaten: the coral goes away with it
        world.remove_coral(target);
        world.scavengers[idx].release();
        log::debug!("Coral {target} fully consumed");
        last.base
    };

    let scavenger = &mut world.scavengers[idx];
    scavenger.pos = new_pos;
    scavenger.radius += params.delta_r_sca;

    if scavenger.radius < params.r_sca_repro {
        return None;
    }

    scavenger.radius = params.r_sca;
    let lo = DVec2::splat(1.0);
    let hi = DVec2::splat(params.world_max - 1.0);
    let pos = (bite_point + DVec2::splat(params.delta_l)).clamp(lo, hi);
    log::debug!("Scavenger reproduced at ({}, {})", pos.x, pos.y);
    Some(Scavenger::new(pos, 1, params.r_sca))
}

/// Run the state machine over every scavenger
///
/// Offspring join the world after the pass.
pub fn forage(world: &mut World, params: &SimParams) {
    let mut offspring = Vec::new();

    for idx in 0..world.scavengers.len() {
        let status = world.scavengers[idx].status;
        match status {
            ScavengerStatus::Seeking => seek(world, idx, params),
            ScavengerStatus::Feeding => offspring.extend(feed(world, idx, params)),
        }
    }

    world.scavengers.extend(offspring);
}
