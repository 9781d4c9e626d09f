//! Inventory and equipment: pick up, drop, equip, unequip, use.
//!
//! Every operation preserves the single-owner rule for item instances: an
//! item id lives in a room's item set, a player's inventory, or an equipment
//! slot, never more than one at a time. Equipment bonuses are applied to the
//! owning player's aggregate attack/defense at the moment the slot changes,
//! so the ratings never drift from the equipped set.

use log::debug;

use super::notify;
use crate::protocol::{ServerMessage, StatBlock, Vitals};
use crate::world::{ConsumeEffect, EquipInfo, World};

fn find_room_item(world: &World, room_id: &str, name: &str) -> Option<String> {
    let room = world.room(room_id)?;
    room.items
        .iter()
        .find(|id| world.item_name(id).eq_ignore_ascii_case(name))
        .cloned()
}

fn find_inventory_item(world: &World, player_id: &str, name: &str) -> Option<String> {
    let player = world.player(player_id)?;
    player
        .inventory
        .iter()
        .find(|id| world.item_name(id).eq_ignore_ascii_case(name))
        .cloned()
}

// Equipped instances leave the inventory set, so name resolution has to
// consult the equipment slots separately.
fn find_equipped_item(world: &World, player_id: &str, name: &str) -> Option<String> {
    let player = world.player(player_id)?;
    player
        .equipment
        .values()
        .find(|id| world.item_name(id).eq_ignore_ascii_case(name))
        .cloned()
}

/// List carried and equipped items.
pub fn show_inventory(world: &World, player_id: &str) -> ServerMessage {
    let Some(player) = world.player(player_id) else {
        return ServerMessage::error("Player not found.");
    };
    if player.inventory.is_empty() && player.equipment.is_empty() {
        return ServerMessage::Inventory {
            message: "Your inventory is empty.".to_string(),
        };
    }

    let mut lines: Vec<String> = player
        .inventory
        .iter()
        .filter_map(|id| {
            world
                .item_template(id)
                .map(|t| format!("- {}: {}", t.name, t.description))
        })
        .collect();
    lines.sort_unstable();
    let mut text = String::from("Inventory:\n");
    text.push_str(&lines.join("\n"));

    if !player.equipment.is_empty() {
        text.push_str("\n\nEquipped:\n");
        for (slot, id) in &player.equipment {
            text.push_str(&format!("- {}: {}\n", slot.as_str(), world.item_name(id)));
        }
    }

    ServerMessage::Inventory { message: text }
}

/// Pick up a named item from the player's current room.
pub fn take(world: &mut World, player_id: &str, name: &str) -> ServerMessage {
    let Some(player) = world.player(player_id) else {
        return ServerMessage::error("Player not found.");
    };
    let player_name = player.name.clone();
    let room_id = player.room_id.clone();
    if world.room(&room_id).is_none() {
        return ServerMessage::error("You are in an unknown location.");
    }

    let Some(instance_id) = find_room_item(world, &room_id, name) else {
        return ServerMessage::error(format!("You don't see {} here.", name));
    };
    let item_name = world.item_name(&instance_id).to_string();

    if let Err(e) = world.transfer_item_to_player(&instance_id, player_id) {
        debug!(target: "castlemud::items", "take failed: {}", e);
        return ServerMessage::error(format!("You don't see {} here.", name));
    }

    notify::broadcast_room(
        world,
        &room_id,
        ServerMessage::Item {
            message: format!("{} picks up {}.", player_name, item_name),
        },
        Some(player_id),
    );

    ServerMessage::Item {
        message: format!("You pick up {}.", item_name),
    }
}

/// Drop a carried item into the current room. Equipped items must be
/// unequipped first.
pub fn drop_item(world: &mut World, player_id: &str, name: &str) -> ServerMessage {
    let Some(player) = world.player(player_id) else {
        return ServerMessage::error("Player not found.");
    };
    let player_name = player.name.clone();
    let room_id = player.room_id.clone();

    let Some(instance_id) = find_inventory_item(world, player_id, name) else {
        if let Some(equipped_id) = find_equipped_item(world, player_id, name) {
            return ServerMessage::error(format!(
                "You need to unequip {} first.",
                world.item_name(&equipped_id)
            ));
        }
        return ServerMessage::error(format!("You don't have {}.", name));
    };
    let item_name = world.item_name(&instance_id).to_string();

    if let Err(e) = world.transfer_item_to_room(&instance_id, player_id) {
        debug!(target: "castlemud::items", "drop failed: {}", e);
        return ServerMessage::error(format!("You don't have {}.", name));
    }

    notify::broadcast_room(
        world,
        &room_id,
        ServerMessage::Item {
            message: format!("{} drops {}.", player_name, item_name),
        },
        Some(player_id),
    );

    ServerMessage::Item {
        message: format!("You drop {}.", item_name),
    }
}

/// Equip a carried item into its slot. If the slot is occupied, the old
/// item is unequipped (bonus subtracted) and the new one equipped (bonus
/// added) in one operation; the result reports the combined change and the
/// resulting aggregate ratings.
pub fn equip(world: &mut World, player_id: &str, name: &str) -> ServerMessage {
    let Some(instance_id) = find_inventory_item(world, player_id, name) else {
        if let Some(equipped_id) = find_equipped_item(world, player_id, name) {
            return ServerMessage::error(format!(
                "You already have {} equipped.",
                world.item_name(&equipped_id)
            ));
        }
        return ServerMessage::error(format!("You don't have {}.", name));
    };
    let template = world.item_template(&instance_id).expect("carried item");
    let item_name = template.name.clone();
    let Some(info) = template.equip else {
        return ServerMessage::error(format!("You can't equip {}.", item_name));
    };

    // Swap out the previous occupant of the slot, if any.
    let previous = world
        .player(player_id)
        .and_then(|p| p.equipment.get(&info.slot).cloned());
    let previous_info: Option<(String, EquipInfo)> = previous.map(|old_id| {
        let old_template = world.item_template(&old_id).expect("equipped item");
        (
            old_template.name.clone(),
            old_template.equip.expect("was equipped"),
        )
    });

    let player = world.player_mut(player_id).expect("resolved above");
    let message = if let Some((old_name, old_info)) = previous_info {
        let old_id = player
            .equipment
            .remove(&info.slot)
            .expect("slot occupant resolved above");
        player.attack -= old_info.attack_bonus;
        player.defense -= old_info.defense_bonus;
        player.inventory.insert(old_id);
        format!("You unequip {} and equip {}.", old_name, item_name)
    } else {
        format!("You equip {}.", item_name)
    };

    player.inventory.remove(&instance_id);
    player.equipment.insert(info.slot, instance_id);
    player.attack += info.attack_bonus;
    player.defense += info.defense_bonus;

    ServerMessage::Equipment {
        message,
        stats: StatBlock {
            attack: player.attack,
            defense: player.defense,
        },
    }
}

/// Unequip a named item back into the inventory, subtracting its bonuses.
pub fn unequip(world: &mut World, player_id: &str, name: &str) -> ServerMessage {
    let Some(player) = world.player(player_id) else {
        return ServerMessage::error("Player not found.");
    };
    if player.equipment.is_empty() {
        return ServerMessage::error("You don't have anything equipped.");
    }

    let found = player
        .equipment
        .iter()
        .find(|(_, id)| world.item_name(id).eq_ignore_ascii_case(name))
        .map(|(slot, id)| (*slot, id.clone()));
    let Some((slot, instance_id)) = found else {
        return ServerMessage::error(format!("You don't have {} equipped.", name));
    };

    let template = world.item_template(&instance_id).expect("equipped item");
    let item_name = template.name.clone();
    let info = template.equip.expect("was equipped");

    let player = world.player_mut(player_id).expect("resolved above");
    player.equipment.remove(&slot);
    player.attack -= info.attack_bonus;
    player.defense -= info.defense_bonus;
    player.inventory.insert(instance_id);

    ServerMessage::Equipment {
        message: format!("You unequip {}.", item_name),
        stats: StatBlock {
            attack: player.attack,
            defense: player.defense,
        },
    }
}

/// Use a carried item: consumables apply their effect and are destroyed;
/// equippables route to [`equip`]; anything else is not usable.
///
/// Ordering for consumables: compute the effect, mutate the player, then
/// remove the item, so the effect is never applied without consuming.
pub fn use_item(world: &mut World, player_id: &str, name: &str) -> ServerMessage {
    let Some(instance_id) = find_inventory_item(world, player_id, name) else {
        if let Some(equipped_id) = find_equipped_item(world, player_id, name) {
            return ServerMessage::error(format!(
                "You already have {} equipped.",
                world.item_name(&equipped_id)
            ));
        }
        return ServerMessage::error(format!("You don't have {}.", name));
    };
    let template = world.item_template(&instance_id).expect("carried item");
    let item_name = template.name.clone();

    let Some(effect) = template.consume else {
        if template.equip.is_some() {
            return equip(world, player_id, name);
        }
        return ServerMessage::error(format!("You can't use {}.", item_name));
    };

    let player = world.player_mut(player_id).expect("resolved above");
    let message = match effect {
        ConsumeEffect::Health(amount) => {
            let before = player.health;
            player.health = (player.health + amount).min(player.max_health);
            format!(
                "You consume {} and restore {} health.",
                item_name,
                player.health - before
            )
        }
        ConsumeEffect::Gold(amount) => {
            player.gold += amount;
            format!("You open {} and find {} gold.", item_name, amount)
        }
    };
    let vitals = Vitals {
        health: player.health,
        max_health: player.max_health,
    };
    let gold = player.gold;

    world.destroy_inventory_item(&instance_id, player_id);

    ServerMessage::Consume {
        message,
        vitals,
        gold,
    }
}
