//! Aetherius - a deterministic cognitive-agent simulator
//!
//! An autonomous agent perceives a synthetic environment, decides, acts and
//! learns. Creativity, decision making, consciousness, learning and
//! emergence subsystems cooperate inside one single-threaded cycle, all
//! drawing from one seedable random source.

pub mod agent;
pub mod capability;
pub mod consciousness;
pub mod core;
pub mod creativity;
pub mod decision;
pub mod emergence;
pub mod learning;
pub mod simulation;
