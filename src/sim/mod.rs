//! Tactical combat simulation (§4.11): spawn two factions onto a grid and
//! run turn-based combat until one side is eliminated.

mod combat;
mod spawn;
mod turn;
mod unit;

pub use combat::{execute_attack, find_best_target};
pub use spawn::{spawn_units, SpawnOptions};
pub use turn::{create_simulation, run_simulation, simulate, simulate_turn, SimulationOptions};
pub use unit::{Faction, Unit, UnitType};

use crate::Point;
use std::collections::HashMap;

#[derive(Debug, Clone)]
pub enum SimulationEvent {
    Move { unit_id: String, from: Point, to: Point },
    Combat { attacker_id: String, defender_id: String, damage: i32, defender_hp: i32, defender_died: bool },
    Death { unit_id: String, position: Point },
    Victory { winner: Faction },
}

#[derive(Debug, Clone)]
pub struct SimulationState {
    pub units: HashMap<String, Unit>,
    pub turn: usize,
    pub events: Vec<SimulationEvent>,
    pub is_complete: bool,
    pub winner: Option<Faction>,
    rng_cursor: u64,
}

impl SimulationState {
    pub fn new(units: Vec<Unit>) -> Self {
        let rng_cursor = units.len() as u64 * 7919 + 1;
        Self {
            units: units.into_iter().map(|u| (u.id.clone(), u)).collect(),
            turn: 0,
            events: Vec::new(),
            is_complete: false,
            winner: None,
            rng_cursor,
        }
    }

    pub fn living_count(&self, faction: Faction) -> usize {
        self.units.values().filter(|u| !u.is_dead && u.faction == faction).count()
    }
}
