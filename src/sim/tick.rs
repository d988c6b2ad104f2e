//! Fixed-order simulation tick
//!
//! One tick applies, in order: algae aging, the algae birth draw, coral
//! aging, the growth automaton, scavenger aging, then foraging.

use glam::DVec2;
use rand::Rng;

use super::forage::forage;
use super::growth::grow_corals;
use super::state::{Algae, CoralStatus, World};
use crate::settings::SimParams;

/// Age every alga and drop the ones past their lifespan
fn age_algae(world: &mut World, params: &SimParams) {
    let max_life = params.max_life_alg;
    world.algae.retain_mut(|a| {
        a.age += 1;
        a.age < max_life
    });
}

/// Bernoulli draw for one new alga at integer coordinates
fn spawn_algae(world: &mut World, params: &SimParams) {
    if world.rng.random::<f64>() >= params.alg_birth_rate {
        return;
    }
    let hi = (params.world_max - 1.0).floor() as i64;
    if hi < 1 {
        return;
    }
    let x = world.rng.random_range(1..=hi) as f64;
    let y = world.rng.random_range(1..=hi) as f64;
    world.algae.push(Algae::new(DVec2::new(x, y), 1));
}

/// Age every coral, dead skeletons included; a coral reaching its lifespan
/// dies but stays in place
fn age_corals(world: &mut World, params: &SimParams) {
    for coral in world.corals.iter_mut() {
        coral.age = coral.age.saturating_add(1);
        if coral.is_alive() && coral.age >= params.max_life_cor {
            coral.status = CoralStatus::Dead;
            log::debug!("Coral {} died", coral.id);
        }
    }
}

/// Age scavengers and remove the ones past their lifespan, releasing
/// whatever they had claimed
fn age_scavengers(world: &mut World, params: &SimParams) {
    let max_life = params.max_life_sca;
    let claimed = &mut world.claimed;
    world.scavengers.retain_mut(|s| {
        s.age += 1;
        if s.age < max_life {
            return true;
        }
        if let Some(target) = s.target {
            claimed.remove(&target);
        }
        false
    });
}

/// Advance the world by exactly one tick
pub fn tick(world: &mut World, params: &SimParams, algae_birth: bool) {
    age_algae(world, params);
    if algae_birth {
        spawn_algae(world, params);
    }

    age_corals(world, params);
    grow_corals(world, params);

    age_scavengers(world, params);
    forage(world, params);

    world.ticks += 1;
}
