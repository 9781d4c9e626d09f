//! The world store: id-keyed maps for every entity family plus the respawn
//! queue.
//!
//! Membership sets (room occupants, room creatures, room items, player
//! inventories, equipment slots) are only mutated through the helpers here,
//! each of which takes `&mut self` and therefore runs as one indivisible
//! unit under the engine's world mutex. The helpers uphold three invariants:
//!
//! - a player id appears in exactly one room's occupant set, matching the
//!   player's own `room_id` field;
//! - a creature id appears in exactly one room's creature set, or nowhere
//!   while a respawn entry for it is pending;
//! - an item instance id appears in at most one of: a room's item set, one
//!   player's inventory, one player's equipment slot.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};
use std::time::Instant;

use log::warn;

use super::errors::WorldError;
use super::types::{ItemInstance, ItemTemplate, Mob, Player, Room};

/// A scheduled creature reappearance. Ordered by due time, then by schedule
/// order so firing is deterministic for equal deadlines.
#[derive(Debug)]
struct RespawnEntry {
    due: Instant,
    seq: u64,
    mob: Mob,
}

impl PartialEq for RespawnEntry {
    fn eq(&self, other: &Self) -> bool {
        self.due == other.due && self.seq == other.seq
    }
}

impl Eq for RespawnEntry {}

impl PartialOrd for RespawnEntry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for RespawnEntry {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.due.cmp(&other.due).then(self.seq.cmp(&other.seq))
    }
}

/// A creature that just reappeared, reported to the caller for fan-out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RespawnedMob {
    pub room_id: String,
    pub mob_name: String,
}

/// The authoritative world graph.
#[derive(Debug, Default)]
pub struct World {
    rooms: HashMap<String, Room>,
    players: HashMap<String, Player>,
    mobs: HashMap<String, Mob>,
    templates: HashMap<String, ItemTemplate>,
    items: HashMap<String, ItemInstance>,
    respawns: BinaryHeap<Reverse<RespawnEntry>>,
    respawn_seq: u64,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    // ------------------------------------------------------------------
    // Rooms
    // ------------------------------------------------------------------

    pub fn insert_room(&mut self, room: Room) {
        self.rooms.insert(room.id.clone(), room);
    }

    pub fn room(&self, id: &str) -> Option<&Room> {
        self.rooms.get(id)
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    pub fn mob_count(&self) -> usize {
        self.mobs.len()
    }

    // ------------------------------------------------------------------
    // Item catalog and instances
    // ------------------------------------------------------------------

    pub fn insert_template(&mut self, template: ItemTemplate) {
        self.templates.insert(template.id.clone(), template);
    }

    pub fn template(&self, id: &str) -> Option<&ItemTemplate> {
        self.templates.get(id)
    }

    /// Create a live instance of a template inside a room's item set.
    pub fn spawn_item_in_room(
        &mut self,
        template_id: &str,
        room_id: &str,
    ) -> Result<String, WorldError> {
        if !self.templates.contains_key(template_id) {
            return Err(WorldError::MissingTemplate(template_id.to_string()));
        }
        let room = self
            .rooms
            .get_mut(room_id)
            .ok_or_else(|| WorldError::UnknownRoom(room_id.to_string()))?;
        let instance = ItemInstance::new(template_id);
        let id = instance.id.clone();
        room.items.insert(id.clone());
        self.items.insert(id.clone(), instance);
        Ok(id)
    }

    pub fn item(&self, instance_id: &str) -> Option<&ItemInstance> {
        self.items.get(instance_id)
    }

    /// The template backing a live instance.
    pub fn item_template(&self, instance_id: &str) -> Option<&ItemTemplate> {
        self.items
            .get(instance_id)
            .and_then(|item| self.templates.get(&item.template))
    }

    /// Display name of a live instance, or a placeholder for broken refs.
    pub fn item_name(&self, instance_id: &str) -> &str {
        self.item_template(instance_id)
            .map(|t| t.name.as_str())
            .unwrap_or("Unknown Item")
    }

    /// Move an instance from a room's item set into a player's inventory.
    pub fn transfer_item_to_player(
        &mut self,
        instance_id: &str,
        player_id: &str,
    ) -> Result<(), WorldError> {
        let room_id = self
            .players
            .get(player_id)
            .ok_or_else(|| WorldError::UnknownPlayer(player_id.to_string()))?
            .room_id
            .clone();
        let room = self
            .rooms
            .get_mut(&room_id)
            .ok_or_else(|| WorldError::UnknownRoom(room_id.clone()))?;
        if !room.items.remove(instance_id) {
            return Err(WorldError::UnknownItem(instance_id.to_string()));
        }
        self.players
            .get_mut(player_id)
            .expect("player checked above")
            .inventory
            .insert(instance_id.to_string());
        Ok(())
    }

    /// Move an instance from a player's inventory into their current room.
    pub fn transfer_item_to_room(
        &mut self,
        instance_id: &str,
        player_id: &str,
    ) -> Result<(), WorldError> {
        let player = self
            .players
            .get_mut(player_id)
            .ok_or_else(|| WorldError::UnknownPlayer(player_id.to_string()))?;
        if !player.inventory.remove(instance_id) {
            return Err(WorldError::UnknownItem(instance_id.to_string()));
        }
        let room_id = player.room_id.clone();
        let room = self
            .rooms
            .get_mut(&room_id)
            .ok_or_else(|| WorldError::UnknownRoom(room_id))?;
        room.items.insert(instance_id.to_string());
        Ok(())
    }

    /// Destroy a consumed instance held in a player's inventory.
    pub fn destroy_inventory_item(&mut self, instance_id: &str, player_id: &str) {
        if let Some(player) = self.players.get_mut(player_id) {
            player.inventory.remove(instance_id);
        }
        self.items.remove(instance_id);
    }

    // ------------------------------------------------------------------
    // Players
    // ------------------------------------------------------------------

    /// Register a new player and place them in their starting room.
    pub fn add_player(&mut self, player: Player) -> Result<(), WorldError> {
        let room = self
            .rooms
            .get_mut(&player.room_id)
            .ok_or_else(|| WorldError::UnknownRoom(player.room_id.clone()))?;
        room.players.insert(player.id.clone());
        self.players.insert(player.id.clone(), player);
        Ok(())
    }

    /// Remove a player from the registry and their room. Idempotent: a
    /// second call for the same id is a no-op returning `None`.
    pub fn remove_player(&mut self, player_id: &str) -> Option<Player> {
        let player = self.players.remove(player_id)?;
        if let Some(room) = self.rooms.get_mut(&player.room_id) {
            room.players.remove(player_id);
        }
        Some(player)
    }

    pub fn player(&self, id: &str) -> Option<&Player> {
        self.players.get(id)
    }

    pub fn player_mut(&mut self, id: &str) -> Option<&mut Player> {
        self.players.get_mut(id)
    }

    pub fn players(&self) -> impl Iterator<Item = &Player> {
        self.players.values()
    }

    /// Case-insensitive lookup among currently connected players.
    pub fn find_player_by_name(&self, name: &str) -> Option<&Player> {
        self.players
            .values()
            .find(|p| p.name.eq_ignore_ascii_case(name))
    }

    /// Atomically relocate a player: source occupant set, destination
    /// occupant set, and the player's own room field all change together.
    pub fn move_player(&mut self, player_id: &str, to_room: &str) -> Result<(), WorldError> {
        let from_room = self
            .players
            .get(player_id)
            .ok_or_else(|| WorldError::UnknownPlayer(player_id.to_string()))?
            .room_id
            .clone();
        if !self.rooms.contains_key(to_room) {
            return Err(WorldError::UnknownRoom(to_room.to_string()));
        }
        if let Some(room) = self.rooms.get_mut(&from_room) {
            room.players.remove(player_id);
        }
        self.rooms
            .get_mut(to_room)
            .expect("destination checked above")
            .players
            .insert(player_id.to_string());
        self.players
            .get_mut(player_id)
            .expect("player checked above")
            .room_id = to_room.to_string();
        Ok(())
    }

    // ------------------------------------------------------------------
    // Creatures
    // ------------------------------------------------------------------

    /// Register a creature and place it in its home room.
    pub fn insert_mob(&mut self, mob: Mob) -> Result<(), WorldError> {
        let room = self
            .rooms
            .get_mut(&mob.home_room)
            .ok_or_else(|| WorldError::UnknownRoom(mob.home_room.clone()))?;
        room.mobs.insert(mob.id.clone());
        self.mobs.insert(mob.id.clone(), mob);
        Ok(())
    }

    pub fn mob(&self, id: &str) -> Option<&Mob> {
        self.mobs.get(id)
    }

    pub fn mob_mut(&mut self, id: &str) -> Option<&mut Mob> {
        self.mobs.get_mut(id)
    }

    /// Remove a defeated creature from its room and the registry.
    pub fn remove_mob(&mut self, mob_id: &str) -> Option<Mob> {
        let mob = self.mobs.remove(mob_id)?;
        if let Some(room) = self.rooms.get_mut(&mob.home_room) {
            room.mobs.remove(mob_id);
        }
        Some(mob)
    }

    /// Case-insensitive creature lookup within one room.
    pub fn mob_in_room_by_name(&self, room_id: &str, name: &str) -> Option<&Mob> {
        let room = self.rooms.get(room_id)?;
        room.mobs
            .iter()
            .filter_map(|id| self.mobs.get(id))
            .find(|mob| mob.name.eq_ignore_ascii_case(name))
    }

    // ------------------------------------------------------------------
    // Respawn queue
    // ------------------------------------------------------------------

    /// Schedule a creature to reappear at `due`. Entries cannot be cancelled
    /// and fire exactly once.
    pub fn schedule_respawn(&mut self, mob: Mob, due: Instant) {
        self.respawn_seq += 1;
        self.respawns.push(Reverse(RespawnEntry {
            due,
            seq: self.respawn_seq,
            mob,
        }));
    }

    pub fn pending_respawns(&self) -> usize {
        self.respawns.len()
    }

    /// Fire every entry due at `now`: reinsert the creature into the
    /// registry and its home room, and report it for fan-out. An entry whose
    /// home room no longer exists is dropped with a warning, never an error.
    pub fn process_due_respawns(&mut self, now: Instant) -> Vec<RespawnedMob> {
        let mut fired = Vec::new();
        while let Some(Reverse(entry)) = self.respawns.peek() {
            if entry.due > now {
                break;
            }
            let Reverse(entry) = self.respawns.pop().expect("peeked entry");
            let mob = entry.mob;
            match self.insert_mob(mob.clone()) {
                Ok(()) => fired.push(RespawnedMob {
                    room_id: mob.home_room,
                    mob_name: mob.name,
                }),
                Err(e) => warn!(
                    target: "castlemud::world",
                    "dropping respawn for {}: {}", mob.id, e
                ),
            }
        }
        fired
    }

    // ------------------------------------------------------------------
    // Consistency checking (test support)
    // ------------------------------------------------------------------

    /// Verify the cross-reference invariants. Returns a description of the
    /// first violation found.
    pub fn check_invariants(&self) -> Result<(), String> {
        for player in self.players.values() {
            let mut holders = 0;
            for room in self.rooms.values() {
                if room.players.contains(&player.id) {
                    holders += 1;
                    if room.id != player.room_id {
                        return Err(format!(
                            "player {} listed in room {} but points at {}",
                            player.id, room.id, player.room_id
                        ));
                    }
                }
            }
            if holders != 1 {
                return Err(format!(
                    "player {} appears in {} occupant sets",
                    player.id, holders
                ));
            }
        }
        for mob_id in self.mobs.keys() {
            let holders = self
                .rooms
                .values()
                .filter(|room| room.mobs.contains(mob_id))
                .count();
            if holders != 1 {
                return Err(format!(
                    "creature {} appears in {} creature sets",
                    mob_id, holders
                ));
            }
        }
        for item_id in self.items.keys() {
            let in_rooms = self
                .rooms
                .values()
                .filter(|room| room.items.contains(item_id))
                .count();
            let in_inventories = self
                .players
                .values()
                .filter(|p| p.inventory.contains(item_id))
                .count();
            let equipped = self
                .players
                .values()
                .filter(|p| p.has_equipped(item_id))
                .count();
            if in_rooms + in_inventories + equipped > 1 {
                return Err(format!(
                    "item {} has {} owners (rooms {}, inventories {}, equipped {})",
                    item_id,
                    in_rooms + in_inventories + equipped,
                    in_rooms,
                    in_inventories,
                    equipped
                ));
            }
        }
        Ok(())
    }
}
