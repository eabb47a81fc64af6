//! Equippable items and stacked inventory entries
//!
//! Armor is carried as a stack of 1 cm³ units of material.

use serde::{Deserialize, Serialize};

use crate::physique::ingestible::Ingestible;

/// One stacked unit of armor material, in m³ (1 cm³)
pub const UNIT_VOLUME: f32 = 0.000_001;

/// Armor material that can be spread over armor components
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArmorItem {
    pub name: String,
    /// Joules absorbed per cm³
    pub rating: f32,
    /// Not simulated
    pub regen: f32,
    pub density: f32,
    /// Does the material fill in holes as they are made
    pub dynamic: bool,
    /// kg per unit
    pub mass: f32,
}

impl ArmorItem {
    /// Rating per m³
    pub fn rating_m3(&self) -> f32 {
        self.rating * 1_000_000.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InventoryItem {
    Armor(ArmorItem),
    Ingestible(Ingestible),
    Other { name: String },
}

impl InventoryItem {
    pub fn as_armor(&self) -> Option<&ArmorItem> {
        match self {
            InventoryItem::Armor(armor) => Some(armor),
            _ => None,
        }
    }
}

/// A stack of identical items
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryEntry {
    pub activator_name: String,
    /// `None` marks an empty slot
    pub inventory_id: Option<u32>,
    pub item: Option<InventoryItem>,
    pub count: u32,
}

impl InventoryEntry {
    pub fn new(activator_name: impl Into<String>, inventory_id: u32, item: InventoryItem, count: u32) -> Self {
        Self {
            activator_name: activator_name.into(),
            inventory_id: Some(inventory_id),
            item: Some(item),
            count,
        }
    }

    /// The empty armor slot
    pub fn none() -> Self {
        Self {
            activator_name: "No Armor Equipped".to_string(),
            inventory_id: None,
            item: None,
            count: 0,
        }
    }

    pub fn is_none(&self) -> bool {
        self.inventory_id.is_none()
    }

    pub fn armor(&self) -> Option<&ArmorItem> {
        self.item.as_ref().and_then(InventoryItem::as_armor)
    }

    pub fn with_count(&self, count: u32) -> Self {
        Self {
            count,
            ..self.clone()
        }
    }
}

impl Default for InventoryEntry {
    fn default() -> Self {
        Self::none()
    }
}

/// Whole units contained in `volume` m³, truncating partial units
pub fn volume_to_units(volume: f32) -> u32 {
    let units = volume.max(0.0) as f64 / UNIT_VOLUME as f64;
    // relative slack absorbs f32 noise such as 2.9999998 units
    (units * (1.0 + 1e-5)).floor() as u32
}

/// Volume of `count` units in m³
pub fn units_to_volume(count: u32) -> f32 {
    count as f32 * UNIT_VOLUME
}
