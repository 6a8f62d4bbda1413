//! Target selection and attack resolution (§4.11).

use crate::sim::unit::Unit;
use crate::sim::SimulationEvent;
use crate::Rng;

fn ally_pressure(unit: &Unit, allies: &[&Unit]) -> f64 {
    allies
        .iter()
        .map(|ally| {
            let dist = unit.position.manhattan(ally.position);
            let mut pressure = 0.0;
            if dist <= 3 {
                pressure += (4 - dist).max(0) as f64 * 2.0;
            }
            if dist <= ally.range {
                pressure += 5.0;
            }
            pressure
        })
        .sum()
}

/// Picks the lowest-scoring enemy for `unit` to target (§4.11 step 1).
pub fn find_best_target<'a>(unit: &Unit, units: &'a [Unit]) -> Option<&'a Unit> {
    let enemies: Vec<&Unit> = units.iter().filter(|u| !u.is_dead && u.faction != unit.faction).collect();
    if enemies.is_empty() {
        return None;
    }
    let allies: Vec<&Unit> = units.iter().filter(|u| !u.is_dead && u.faction == unit.faction && u.id != unit.id).collect();

    let in_range: Vec<&Unit> = enemies.iter().copied().filter(|e| unit.position.manhattan(e.position) <= unit.range).collect();

    if !in_range.is_empty() {
        in_range
            .into_iter()
            .min_by(|a, b| {
                let score_a = a.hp_ratio() * 100.0 - ally_pressure(a, &allies) * 10.0;
                let score_b = b.hp_ratio() * 100.0 - ally_pressure(b, &allies) * 10.0;
                score_a.partial_cmp(&score_b).unwrap_or(std::cmp::Ordering::Equal)
            })
    } else {
        enemies
            .into_iter()
            .min_by(|a, b| {
                let score_a = unit.position.manhattan(a.position) as f64 * 10.0 + a.hp_ratio() * 20.0 - ally_pressure(a, &allies) * 5.0;
                let score_b = unit.position.manhattan(b.position) as f64 * 10.0 + b.hp_ratio() * 20.0 - ally_pressure(b, &allies) * 5.0;
                score_a.partial_cmp(&score_b).unwrap_or(std::cmp::Ordering::Equal)
            })
    }
}

/// Resolves one attack, mutating the defender and returning the events
/// produced (always a `Combat`, plus a `Death` if the defender's hp hits 0).
pub fn execute_attack(attacker: &Unit, defender: &mut Unit, rng: &mut Rng) -> Vec<SimulationEvent> {
    let base = attacker.attack as f64;
    let jitter = (rng.uniform() * 0.4 - 0.2) * base;
    let raw = attacker.attack as f64 - (defender.defense as f64 / 2.0).floor() + jitter;
    let damage = raw.round().max(1.0) as i32;

    defender.hp = (defender.hp - damage).max(0);
    let defender_died = defender.hp <= 0 && !defender.is_dead;
    if defender.hp <= 0 {
        defender.is_dead = true;
    }

    let mut events = vec![SimulationEvent::Combat {
        attacker_id: attacker.id.clone(),
        defender_id: defender.id.clone(),
        damage,
        defender_hp: defender.hp,
        defender_died,
    }];
    if defender_died {
        events.push(SimulationEvent::Death { unit_id: defender.id.clone(), position: defender.position });
    }
    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::unit::{Faction, UnitType};
    use crate::Point;

    #[test]
    fn attack_deals_at_least_one_damage_and_decrements_hp() {
        let attacker = Unit::new("a".into(), UnitType::Warrior, Faction::Red, Point::new(0, 0));
        let mut defender = Unit::new("b".into(), UnitType::Warrior, Faction::Blue, Point::new(1, 0));
        let mut rng = Rng::new(7);
        let events = execute_attack(&attacker, &mut defender, &mut rng);
        assert!(defender.hp < defender.max_hp);
        assert!(matches!(events[0], SimulationEvent::Combat { damage, .. } if damage >= 1));
    }

    #[test]
    fn lethal_damage_marks_dead_and_emits_death() {
        let attacker = Unit::new("a".into(), UnitType::Mage, Faction::Red, Point::new(0, 0));
        let mut defender = Unit::new("b".into(), UnitType::Warrior, Faction::Blue, Point::new(1, 0));
        defender.hp = 1;
        let mut rng = Rng::new(3);
        let events = execute_attack(&attacker, &mut defender, &mut rng);
        assert!(defender.is_dead);
        assert!(events.iter().any(|e| matches!(e, SimulationEvent::Death { .. })));
    }

    #[test]
    fn find_best_target_prefers_in_range_enemy() {
        let unit = Unit::new("a".into(), UnitType::Archer, Faction::Red, Point::new(0, 0));
        let units = vec![
            unit.clone(),
            Unit::new("b".into(), UnitType::Warrior, Faction::Blue, Point::new(3, 0)),
            Unit::new("c".into(), UnitType::Warrior, Faction::Blue, Point::new(8, 0)),
        ];
        let target = find_best_target(&unit, &units).unwrap();
        assert_eq!(target.id, "b");
    }
}
