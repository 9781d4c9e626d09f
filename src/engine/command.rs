//! Command interpretation: raw line in, one engine call out.
//!
//! Parsing is a pure function from text to a closed [`Command`] enum, so
//! dispatch is exhaustiveness-checked and the alias table lives in exactly
//! one `match`. Verbs that need an argument and get none parse to
//! [`Command::Usage`] and never reach an engine.

use std::time::Instant;

use super::{combat, items, look, movement, social};
use crate::protocol::ServerMessage;
use crate::world::{Direction, World};

/// Everything a player can ask for, post-parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Move(Direction),
    Look(Option<String>),
    Help(Option<String>),
    Attack(String),
    Say(String),
    Shout(String),
    Whisper { target: String, text: String },
    Emote(String),
    Inventory,
    Take(String),
    Drop(String),
    Equip(String),
    Unequip(String),
    Use(String),
    /// A known verb missing its argument; carries the usage error.
    Usage(&'static str),
    Unknown,
}

/// Parse one raw line. Only the verb is case-folded; arguments keep their
/// original case so chat text passes through untouched (target matching is
/// case-insensitive downstream). The verb table preserves the classic
/// single-letter aliases.
pub fn parse(line: &str) -> Command {
    let mut words = line.split_whitespace();
    let Some(first) = words.next() else {
        return Command::Unknown;
    };
    let verb = first.to_lowercase();
    let args: Vec<&str> = words.collect();
    let rest = || args.join(" ");

    match verb.as_str() {
        "north" | "n" => Command::Move(Direction::North),
        "south" | "s" => Command::Move(Direction::South),
        "east" | "e" => Command::Move(Direction::East),
        "west" | "w" => Command::Move(Direction::West),
        "up" | "u" => Command::Move(Direction::Up),
        "down" | "d" => Command::Move(Direction::Down),

        "look" | "l" => {
            if args.is_empty() {
                Command::Look(None)
            } else {
                Command::Look(Some(rest()))
            }
        }
        "help" => {
            if args.is_empty() {
                Command::Help(None)
            } else {
                Command::Help(Some(rest()))
            }
        }

        "attack" | "kill" => {
            if args.is_empty() {
                Command::Usage("Attack what?")
            } else {
                Command::Attack(rest())
            }
        }

        "say" => {
            if args.is_empty() {
                Command::Usage("Say what?")
            } else {
                Command::Say(rest())
            }
        }
        "shout" => {
            if args.is_empty() {
                Command::Usage("Shout what?")
            } else {
                Command::Shout(rest())
            }
        }
        "whisper" => {
            if args.len() < 2 {
                Command::Usage("Whisper to whom and what?")
            } else {
                Command::Whisper {
                    target: args[0].to_string(),
                    text: args[1..].join(" "),
                }
            }
        }
        "emote" | "me" => {
            if args.is_empty() {
                Command::Usage("Emote what?")
            } else {
                Command::Emote(rest())
            }
        }
        "smile" | "laugh" | "wave" | "dance" | "bow" => Command::Emote(
            social::canned_emote(&verb)
                .expect("verb listed above")
                .to_string(),
        ),

        "inventory" | "i" => Command::Inventory,
        "get" | "take" => {
            if args.is_empty() {
                Command::Usage("Get what?")
            } else {
                Command::Take(rest())
            }
        }
        "drop" => {
            if args.is_empty() {
                Command::Usage("Drop what?")
            } else {
                Command::Drop(rest())
            }
        }
        "equip" | "wear" | "wield" => {
            if args.is_empty() {
                Command::Usage("Equip what?")
            } else {
                Command::Equip(rest())
            }
        }
        "unequip" | "remove" => {
            if args.is_empty() {
                Command::Usage("Unequip what?")
            } else {
                Command::Unequip(rest())
            }
        }
        "use" | "consume" => {
            if args.is_empty() {
                Command::Usage("Use what?")
            } else {
                Command::Use(rest())
            }
        }

        _ => Command::Unknown,
    }
}

/// Parse and execute one command line for a logged-in player. Always
/// returns exactly one result frame; user mistakes come back as typed
/// errors, never as failures.
pub fn dispatch(world: &mut World, player_id: &str, line: &str, now: Instant) -> ServerMessage {
    if world.player(player_id).is_none() {
        return ServerMessage::error("Player not found.");
    }

    match parse(line) {
        Command::Move(direction) => movement::move_player(world, player_id, direction),
        Command::Look(None) => look::look_room(world, player_id),
        Command::Look(Some(target)) => look::look_at(world, player_id, &target),
        Command::Help(topic) => help(topic.as_deref()),
        Command::Attack(target) => combat::attack(world, player_id, &target, now),
        Command::Say(text) => social::say(world, player_id, &text),
        Command::Shout(text) => social::shout(world, player_id, &text),
        Command::Whisper { target, text } => social::whisper(world, player_id, &target, &text),
        Command::Emote(action) => social::emote(world, player_id, &action),
        Command::Inventory => items::show_inventory(world, player_id),
        Command::Take(name) => items::take(world, player_id, &name),
        Command::Drop(name) => items::drop_item(world, player_id, &name),
        Command::Equip(name) => items::equip(world, player_id, &name),
        Command::Unequip(name) => items::unequip(world, player_id, &name),
        Command::Use(name) => items::use_item(world, player_id, &name),
        Command::Usage(message) => ServerMessage::error(message),
        Command::Unknown => {
            ServerMessage::error("Unknown command. Type \"help\" for a list of commands.")
        }
    }
}

fn help(topic: Option<&str>) -> ServerMessage {
    let topic = topic.map(str::to_lowercase);
    let message = match topic.as_deref() {
        None => HELP_GENERAL,
        Some("movement") | Some("move") => HELP_MOVEMENT,
        Some("look") | Some("l") => HELP_LOOK,
        Some("communication") | Some("chat") => HELP_COMMUNICATION,
        Some("combat") => HELP_COMBAT,
        Some("items") | Some("inventory") => HELP_ITEMS,
        Some(other) => {
            return ServerMessage::error(format!("No help available for '{}'.", other));
        }
    };
    ServerMessage::Help {
        message: message.to_string(),
    }
}

const HELP_GENERAL: &str = "\
Available Commands:

Movement:
  north (n), south (s), east (e), west (w), up (u), down (d)

Information:
  look (l) - Look at the room or a specific object
  help - Display this help message
  help [topic] - Get help on a specific topic

Communication:
  say [message] - Say something to everyone in the room
  shout [message] - Shout something to everyone in the game
  whisper [player] [message] - Send a private message to another player
  emote (me) [action] - Perform a custom emote
  smile, laugh, wave, dance, bow - Perform predefined emotes

Combat:
  attack [target] - Attack a creature

Items:
  inventory (i) - Show your inventory
  get [item] - Pick up an item
  drop [item] - Drop an item
  equip [item] - Equip a weapon or armor
  unequip [item] - Unequip an equipped item
  use [item] - Use a consumable item

Type 'help [topic]' for more information on a specific topic.";

const HELP_MOVEMENT: &str = "\
Movement Commands:

You can move in six directions: north, south, east, west, up, and down.
Each direction can be abbreviated to its first letter (n, s, e, w, u, d).

You can only move in directions that have exits from your current location.
Use the 'look' command to see available exits.";

const HELP_LOOK: &str = "\
Look Command:

'look' or 'l' - Look at your surroundings
'look [object]' - Look at a specific object, player, or creature
'look [direction]' - Look in a specific direction";

const HELP_COMMUNICATION: &str = "\
Communication Commands:

'say [message]' - Say something to everyone in the room
'shout [message]' - Shout something to everyone in the game
'whisper [player] [message]' - Send a private message to another player
'emote [action]' or 'me [action]' - Perform a custom emote
'smile', 'laugh', 'wave', 'dance', 'bow' - Perform predefined emotes";

const HELP_COMBAT: &str = "\
Combat Commands:

'attack [target]' or 'kill [target]' - Attack a creature

Combat is turn-based. When you attack a target, you deal damage based on
your attack stat minus the target's defense. The target will then
counterattack.

If you defeat a creature, you gain experience points. Gain enough
experience and you'll level up, increasing your stats.

If you are defeated, you'll respawn at the castle entrance with full
health.

Safe zones (like the castle) prevent combat from occurring.";

const HELP_ITEMS: &str = "\
Item Commands:

'inventory' or 'i' - List what you are carrying and wearing
'get [item]' or 'take [item]' - Pick up an item from the room
'drop [item]' - Drop a carried item (unequip it first)
'equip [item]', 'wear [item]', 'wield [item]' - Equip a weapon or armor
'unequip [item]' or 'remove [item]' - Unequip an equipped item
'use [item]' or 'consume [item]' - Use a consumable item";
