//! Body condition: cellular armor, skeleton and organs
//!
//! Damage flows outside-in. Each component spends part of a hit's energy and
//! returns the remainder for the next layer.

pub mod armor;
pub mod body_part;
pub mod cellular;
pub mod component;
pub mod geometry;
pub mod impact;
pub mod inventory;
pub mod manager;
pub mod organ;
pub mod skeleton;

pub use armor::{ArmorComponent, ArmorKind};
pub use body_part::{BodyPart, ComponentCategory, ComponentCondition, LimbCategory};
pub use cellular::CellularSurface;
pub use component::ConditionComponent;
pub use geometry::CellGeometry;
pub use impact::{resolve_impacts, Impact, ImpactResult};
pub use inventory::{ArmorItem, InventoryEntry, InventoryItem, UNIT_VOLUME};
pub use manager::{ArmorManager, ConditionEvent, ConditionTarget};
pub use organ::{Organ, OrganEvent, OrganKind};
pub use skeleton::{Bone, BoneBreakChange, Skeleton};
