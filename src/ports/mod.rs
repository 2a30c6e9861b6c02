//! Ports (trait boundaries) between the policy engine and its collaborators.
//!
//! The game engine, the agents it drives, and whatever watches training are
//! all reached through these traits.

pub mod agent;
pub mod environment;
pub mod observer;

pub use agent::Agent;
pub use environment::{Environment, Step};
pub use observer::Observer;
