//! Arena simulation engine.
//!
//! `ArenaEngine` owns the hecs ECS world, processes host commands, runs all
//! systems, and produces `ArenaSnapshot`s. Completely headless (no renderer
//! or network dependency), enabling deterministic testing.

pub mod engine;
pub mod nav;
pub mod systems;

#[cfg(test)]
mod tests;
