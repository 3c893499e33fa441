//! Core types and definitions for the ONSLAUGHT arena mode.
//!
//! This crate defines the vocabulary shared across all other crates:
//! components, commands, events, state snapshots, configuration tables,
//! the player economy, and constants. It has no dependency on the ECS
//! or any runtime framework.

pub mod commands;
pub mod components;
pub mod config;
pub mod constants;
pub mod economy;
pub mod enums;
pub mod events;
pub mod state;
pub mod types;
