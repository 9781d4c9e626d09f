//! # Castlemud - a multiplayer text adventure server
//!
//! Castlemud is a small MUD: many WebSocket sessions share one in-memory
//! world of rooms, creatures, and items. Players move between rooms, fight
//! creatures, collect and equip loot, and talk to each other; everything a
//! player observes is derived from the authoritative world state at the
//! moment of the command.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use castlemud::config::Config;
//! use castlemud::engine::GameEngine;
//! use castlemud::net::GameServer;
//! use castlemud::world::seed::build_world;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("config.toml").await?;
//!     let engine = Arc::new(GameEngine::new(build_world()));
//!     GameServer::new(engine, config.server.bind.clone()).run().await
//! }
//! ```
//!
//! ## Module Organization
//!
//! - [`world`] - The authoritative world store, entity model, and world seed
//! - [`engine`] - Command interpreter and the movement/combat/item/social engines
//! - [`protocol`] - The closed set of client/server wire messages
//! - [`net`] - WebSocket transport and session lifecycle
//! - [`config`] - Configuration management
//! - [`validation`] - Display-name validation
//!
//! ## Architecture
//!
//! Every top-level command and every respawn-timer firing is serialized
//! through one mutex around the world store, so engines see the world as a
//! sequence of indivisible mutations. Notification fan-out is fire-and-forget
//! over per-connection channels; a slow or dead connection never blocks a
//! command or another recipient.

pub mod config;
pub mod engine;
pub mod logutil;
pub mod net;
pub mod protocol;
pub mod validation;
pub mod world;
