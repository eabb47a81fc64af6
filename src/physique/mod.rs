//! Metabolic physique: muscle, glycogen, lactate, hydration and digestion

pub mod action;
pub mod ambulation;
pub mod constants;
pub mod ingestible;
pub mod params;
#[allow(clippy::module_inception)]
pub mod physique;
pub mod pools;

pub use action::{ActionData, MuscleParams};
pub use ambulation::{Ambulation, AmbulationData, Pose};
pub use ingestible::Ingestible;
pub use params::MetabolicParams;
pub use physique::{Physique, PhysiqueEvent, PhysiqueSnapshot, DEFAULT_INTERVAL};
pub use pools::MetabolicPools;
