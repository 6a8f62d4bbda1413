//! Unit model (§3/§4.11): faction, type, baseline stats.

use crate::Point;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnitType {
    Warrior,
    Archer,
    Mage,
}

impl UnitType {
    pub const ALL: [UnitType; 3] = [UnitType::Warrior, UnitType::Archer, UnitType::Mage];

    /// `(hp, attack, defense, speed, range)`.
    pub fn baseline(&self) -> (i32, i32, i32, i32, i32) {
        match self {
            UnitType::Warrior => (100, 15, 10, 1, 1),
            UnitType::Archer => (60, 20, 5, 1, 4),
            UnitType::Mage => (50, 25, 3, 1, 3),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Faction {
    Red,
    Blue,
}

impl Faction {
    pub fn opposite(&self) -> Faction {
        match self {
            Faction::Red => Faction::Blue,
            Faction::Blue => Faction::Red,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Unit {
    pub id: String,
    pub unit_type: UnitType,
    pub faction: Faction,
    pub position: Point,
    pub hp: i32,
    pub max_hp: i32,
    pub attack: i32,
    pub defense: i32,
    pub speed: i32,
    pub range: i32,
    pub is_dead: bool,
    pub target: Option<String>,
    pub path: Option<Vec<Point>>,
}

impl Unit {
    pub fn new(id: String, unit_type: UnitType, faction: Faction, position: Point) -> Self {
        let (hp, attack, defense, speed, range) = unit_type.baseline();
        Self {
            id,
            unit_type,
            faction,
            position,
            hp,
            max_hp: hp,
            attack,
            defense,
            speed,
            range,
            is_dead: false,
            target: None,
            path: None,
        }
    }

    pub fn hp_ratio(&self) -> f64 {
        if self.max_hp == 0 {
            0.0
        } else {
            self.hp as f64 / self.max_hp as f64
        }
    }
}
