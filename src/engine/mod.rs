//! Command engines and the serialized entry points around the world store.
//!
//! [`GameEngine`] owns the world behind one mutex. Every top-level command,
//! every login/disconnect, and every respawn-queue sweep acquires it, so all
//! read-then-write sequences on shared state execute as indivisible units.

pub mod combat;
pub mod command;
pub mod items;
pub mod look;
pub mod movement;
pub mod notify;
pub mod session;
pub mod social;

use std::sync::Arc;
use std::time::{Duration, Instant};

use log::debug;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use crate::logutil::escape_log;
use crate::protocol::{Outbound, ServerMessage};
use crate::world::World;

/// Serialized access to the world plus the background respawn sweep.
pub struct GameEngine {
    world: Mutex<World>,
}

impl GameEngine {
    pub fn new(world: World) -> Self {
        Self {
            world: Mutex::new(world),
        }
    }

    /// Attempt a login. Returns the new player id on success and the frames
    /// to deliver to the requesting connection either way.
    pub async fn login(
        &self,
        name: &str,
        class: Option<&str>,
        outbound: Outbound,
    ) -> (Option<String>, Vec<ServerMessage>) {
        let mut world = self.world.lock().await;
        session::login(&mut world, name, class, outbound)
    }

    /// Interpret and execute one command line for a logged-in player.
    pub async fn handle_command(&self, player_id: &str, line: &str) -> ServerMessage {
        let mut world = self.world.lock().await;
        debug!(
            target: "castlemud::command",
            "player={} line={}", player_id, escape_log(line)
        );
        command::dispatch(&mut world, player_id, line, Instant::now())
    }

    /// Disconnect cleanup. Safe to call more than once for the same id.
    pub async fn disconnect(&self, player_id: &str) {
        let mut world = self.world.lock().await;
        session::disconnect(&mut world, player_id);
    }

    /// Fire all due respawn entries and announce each reappearance to its
    /// home room.
    pub async fn tick_respawns(&self) {
        let mut world = self.world.lock().await;
        for fired in world.process_due_respawns(Instant::now()) {
            notify::broadcast_room(
                &world,
                &fired.room_id,
                ServerMessage::Respawn {
                    message: format!("{} has appeared.", fired.mob_name),
                },
                None,
            );
        }
    }

    /// Spawn the periodic respawn sweep.
    pub fn spawn_respawn_ticker(self: &Arc<Self>, interval: Duration) -> JoinHandle<()> {
        let engine = Arc::clone(self);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                engine.tick_respawns().await;
            }
        })
    }
}
