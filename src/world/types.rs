//! Entity model for the world store.
//!
//! Rooms, players, creatures, and item templates/instances reference each
//! other by string identifier only. Player and item-instance identifiers are
//! generated (uuid v4); room, creature, and template identifiers are fixed
//! by the world seed.

use std::collections::{BTreeMap, HashSet};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::protocol::{Outbound, PlayerSnapshot};

/// The six cardinal exit directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    North,
    South,
    East,
    West,
    Up,
    Down,
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::North => "north",
            Direction::South => "south",
            Direction::East => "east",
            Direction::West => "west",
            Direction::Up => "up",
            Direction::Down => "down",
        }
    }

    /// Parse a direction name or its single-letter alias.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "north" | "n" => Some(Direction::North),
            "south" | "s" => Some(Direction::South),
            "east" | "e" => Some(Direction::East),
            "west" | "w" => Some(Direction::West),
            "up" | "u" => Some(Direction::Up),
            "down" | "d" => Some(Direction::Down),
            _ => None,
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A location in the fixed room graph.
///
/// Exits and the safe-zone flag are immutable after the world seed; the
/// occupant/creature/item sets mutate continuously and only through the
/// store's helpers.
#[derive(Debug, Clone)]
pub struct Room {
    pub id: String,
    pub name: String,
    pub description: String,
    pub exits: BTreeMap<Direction, String>,
    pub players: HashSet<String>,
    pub mobs: HashSet<String>,
    pub items: HashSet<String>,
    /// Combat commands are rejected here.
    pub safe: bool,
}

impl Room {
    pub fn new(id: &str, name: &str, description: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            exits: BTreeMap::new(),
            players: HashSet::new(),
            mobs: HashSet::new(),
            items: HashSet::new(),
            safe: false,
        }
    }

    pub fn with_exit(mut self, direction: Direction, destination: &str) -> Self {
        self.exits.insert(direction, destination.to_string());
        self
    }

    pub fn safe_zone(mut self) -> Self {
        self.safe = true;
        self
    }

    /// Exit direction names in alphabetical order, for stable descriptions.
    pub fn sorted_exit_names(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self.exits.keys().map(|d| d.as_str()).collect();
        names.sort_unstable();
        names
    }
}

/// Equipment slots a template may target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EquipSlot {
    Weapon,
    Armor,
}

impl EquipSlot {
    pub fn as_str(self) -> &'static str {
        match self {
            EquipSlot::Weapon => "weapon",
            EquipSlot::Armor => "armor",
        }
    }
}

/// Slot and stat bonuses for an equippable template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EquipInfo {
    pub slot: EquipSlot,
    pub attack_bonus: i32,
    pub defense_bonus: i32,
}

/// Effect applied when a consumable is used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsumeEffect {
    /// Restore up to this much health, clamped at max health.
    Health(i32),
    /// Grant this much gold.
    Gold(u64),
}

/// Static item definition from the catalog.
#[derive(Debug, Clone)]
pub struct ItemTemplate {
    pub id: String,
    pub name: String,
    pub description: String,
    pub value: u32,
    pub weight: u32,
    pub equip: Option<EquipInfo>,
    pub consume: Option<ConsumeEffect>,
}

impl ItemTemplate {
    pub fn new(id: &str, name: &str, description: &str, value: u32, weight: u32) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            value,
            weight,
            equip: None,
            consume: None,
        }
    }

    pub fn equippable(mut self, slot: EquipSlot, attack_bonus: i32, defense_bonus: i32) -> Self {
        self.equip = Some(EquipInfo {
            slot,
            attack_bonus,
            defense_bonus,
        });
        self
    }

    pub fn consumable(mut self, effect: ConsumeEffect) -> Self {
        self.consume = Some(effect);
        self
    }
}

/// A live item in the world, owned by exactly one of: a room's item set, a
/// player's inventory, or a player's equipment slot.
#[derive(Debug, Clone)]
pub struct ItemInstance {
    pub id: String,
    pub template: String,
}

impl ItemInstance {
    pub fn new(template: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            template: template.to_string(),
        }
    }
}

/// A creature. Defeated creatures leave the store entirely until their
/// respawn entry fires and reinserts a full-health copy.
#[derive(Debug, Clone)]
pub struct Mob {
    pub id: String,
    pub name: String,
    pub description: String,
    pub health: i32,
    pub max_health: i32,
    pub attack: i32,
    pub defense: i32,
    pub level: u32,
    /// Reserved for future auto-attack behavior; unused by combat resolution.
    pub aggressive: bool,
    pub home_room: String,
    pub respawn_delay: Duration,
    /// Template ids this creature may yield. Data-only for now.
    pub loot: Vec<String>,
}

impl Mob {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: &str,
        name: &str,
        description: &str,
        health: i32,
        attack: i32,
        defense: i32,
        level: u32,
        home_room: &str,
    ) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            health,
            max_health: health,
            attack,
            defense,
            level,
            aggressive: false,
            home_room: home_room.to_string(),
            respawn_delay: Duration::from_secs(60),
            loot: Vec::new(),
        }
    }

    pub fn aggressive(mut self) -> Self {
        self.aggressive = true;
        self
    }

    pub fn with_respawn_delay(mut self, delay: Duration) -> Self {
        self.respawn_delay = delay;
        self
    }

    pub fn with_loot(mut self, templates: &[&str]) -> Self {
        self.loot = templates.iter().map(|t| t.to_string()).collect();
        self
    }

    /// A full-health copy of the same creature, for respawn scheduling.
    pub fn fresh(&self) -> Self {
        let mut mob = self.clone();
        mob.health = mob.max_health;
        mob
    }
}

/// Stat template selected by class name at login.
#[derive(Debug, Clone, Copy)]
pub struct ClassTemplate {
    pub name: &'static str,
    pub health: i32,
    pub attack: i32,
    pub defense: i32,
}

/// Resolve a class tag to its stat template. Unknown names fall back to the
/// default adventurer block.
pub fn class_template(name: &str) -> ClassTemplate {
    match name.to_lowercase().as_str() {
        "warrior" => ClassTemplate {
            name: "Warrior",
            health: 120,
            attack: 12,
            defense: 8,
        },
        "mage" => ClassTemplate {
            name: "Mage",
            health: 80,
            attack: 15,
            defense: 3,
        },
        "rogue" => ClassTemplate {
            name: "Rogue",
            health: 90,
            attack: 13,
            defense: 4,
        },
        _ => ClassTemplate {
            name: "Adventurer",
            health: 100,
            attack: 10,
            defense: 5,
        },
    }
}

/// A connected player. Created at login, destroyed at disconnect.
#[derive(Debug, Clone)]
pub struct Player {
    pub id: String,
    pub name: String,
    pub class: String,
    pub level: u32,
    pub health: i32,
    pub max_health: i32,
    pub attack: i32,
    pub defense: i32,
    pub experience: u64,
    pub gold: u64,
    pub room_id: String,
    pub inventory: HashSet<String>,
    pub equipment: BTreeMap<EquipSlot, String>,
    /// Handle to this player's transport connection.
    pub outbound: Outbound,
}

impl Player {
    pub fn new(name: &str, room_id: &str, outbound: Outbound) -> Self {
        let class = class_template("");
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            class: class.name.to_string(),
            level: 1,
            health: class.health,
            max_health: class.health,
            attack: class.attack,
            defense: class.defense,
            experience: 0,
            gold: 0,
            room_id: room_id.to_string(),
            inventory: HashSet::new(),
            equipment: BTreeMap::new(),
            outbound,
        }
    }

    /// Overwrite base stats from a class template. Only meaningful at login,
    /// before any equipment bonuses are applied.
    pub fn apply_class(&mut self, template: ClassTemplate) {
        self.class = template.name.to_string();
        self.health = template.health;
        self.max_health = template.health;
        self.attack = template.attack;
        self.defense = template.defense;
    }

    pub fn snapshot(&self) -> PlayerSnapshot {
        PlayerSnapshot {
            id: self.id.clone(),
            name: self.name.clone(),
            class: self.class.clone(),
            level: self.level,
            health: self.health,
            max_health: self.max_health,
            experience: self.experience,
            attack: self.attack,
            defense: self.defense,
        }
    }

    /// True if the given item instance currently occupies an equipment slot.
    pub fn has_equipped(&self, instance_id: &str) -> bool {
        self.equipment.values().any(|id| id == instance_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_aliases() {
        assert_eq!(Direction::parse("n"), Some(Direction::North));
        assert_eq!(Direction::parse("down"), Some(Direction::Down));
        assert_eq!(Direction::parse("ne"), None);
    }

    #[test]
    fn class_templates_match_catalog() {
        let warrior = class_template("Warrior");
        assert_eq!(
            (warrior.health, warrior.attack, warrior.defense),
            (120, 12, 8)
        );
        let mage = class_template("mage");
        assert_eq!((mage.health, mage.attack, mage.defense), (80, 15, 3));
        let rogue = class_template("ROGUE");
        assert_eq!((rogue.health, rogue.attack, rogue.defense), (90, 13, 4));
        let fallback = class_template("necromancer");
        assert_eq!(fallback.name, "Adventurer");
        assert_eq!(
            (fallback.health, fallback.attack, fallback.defense),
            (100, 10, 5)
        );
    }

    #[test]
    fn sorted_exits_are_alphabetical() {
        let room = Room::new("r", "R", "desc")
            .with_exit(Direction::West, "a")
            .with_exit(Direction::Down, "b")
            .with_exit(Direction::East, "c");
        assert_eq!(room.sorted_exit_names(), vec!["down", "east", "west"]);
    }

    #[test]
    fn fresh_mob_restores_health() {
        let mut wolf = Mob::new("wolf-1", "Wolf", "a wolf", 20, 5, 2, 1, "den");
        wolf.health = 3;
        assert_eq!(wolf.fresh().health, 20);
    }
}
