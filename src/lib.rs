//! Physique Sim - body condition and metabolic simulation
//!
//! Layered damage (armor, bone, organ) with limb compromise tracking, and a
//! fixed-tick metabolism driving what a body can do.

pub mod character;
pub mod condition;
pub mod core;
pub mod physique;
