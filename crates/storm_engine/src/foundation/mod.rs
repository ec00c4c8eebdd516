//! Foundation utilities shared by every engine subsystem
//!
//! Contains math types, frame timing, and procedural noise. These modules
//! have no dependencies on the rest of the engine.

pub mod math;
pub mod noise;
pub mod time;
