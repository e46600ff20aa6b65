//! # Game Server Library
//!
//! This library provides the authoritative server implementation for the
//! two-paddle multiplayer ball game. It owns the canonical game state,
//! ingests paddle commands from connected clients, and broadcasts a state
//! snapshot to every viewer once per tick.
//!
//! ## Core Responsibilities
//!
//! ### Authoritative Simulation
//! The server runs the only copy of the game physics. Clients never simulate
//! anything; they render whatever the latest broadcast says and send move
//! commands back.
//!
//! ### Command Ingestion
//! Each WebSocket connection runs its own receive loop. A valid move command
//! nudges the named paddle and clamps it to the playfield. Anything that is
//! not a valid move command disconnects the sender; malformed input is
//! treated as a protocol violation, not noise to be skipped.
//!
//! ### State Broadcasting
//! Once per tick the server takes a single snapshot of the game state,
//! serializes it once, and fans it out to every registered connection.
//! Clients that cannot be written to are dropped from the registry; the
//! rest are unaffected.
//!
//! ## Architecture
//!
//! One task runs the fixed-period game loop (physics, then broadcast);
//! every accepted connection runs a reader task and a writer task. All of
//! them share exactly two pieces of mutable state, each behind its own
//! lock:
//!
//! - the [`state::SharedState`] handle around the single `GameState`
//! - the [`registry::ConnectionRegistry`] of live connections
//!
//! Mutations from concurrent commands and the physics tick are serialized
//! by the state boundary; no ordering is promised between a command arrival
//! and a tick beyond mutual exclusion. Within a tick, physics always runs
//! before broadcast.
//!
//! ## Module Organization
//!
//! - [`state`]: the shared-exclusion boundary around the game state
//! - [`registry`]: live connections eligible for broadcast
//! - [`game`]: ball movement, bounces, goals, and the scoring reset
//! - [`network`]: WebSocket accept loop and per-connection command ingestion
//! - [`broadcast`]: per-tick snapshot fan-out
//!
//! The wire protocol itself (constants, `GameState`, `ClientMessage`) lives
//! in the `shared` crate so headless clients and tests speak the exact same
//! dialect.

pub mod broadcast;
pub mod game;
pub mod network;
pub mod registry;
pub mod state;
