//! Armor components: a cellular surface bound to a body part or a name
//!
//! Humanoid components receive material when armor is installed on the
//! character. Independent components (turrets, doors) carry fixed armor
//! from construction.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::condition::body_part::BodyPart;
use crate::condition::cellular::CellularSurface;
use crate::condition::component::ConditionComponent;
use crate::condition::geometry::CellGeometry;
use crate::condition::inventory::{ArmorItem, UNIT_VOLUME};

/// Default maximum armor thickness, in m
pub const DEFAULT_MAX_THICKNESS: f32 = 0.01;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ArmorKind {
    /// Covers a body part, stats come from the installed armor item
    Humanoid { part: BodyPart },
    /// Named plate with its own rating
    Independent { name: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArmorComponent {
    kind: ArmorKind,
    geometry: CellGeometry,
    max_thickness: f32,
    /// Can holes be punched in it, or is it one solid cell
    has_armor_cells: bool,
    surface: CellularSurface,
}

impl ArmorComponent {
    pub fn humanoid(part: BodyPart, geometry: CellGeometry, max_thickness: f32, has_armor_cells: bool) -> Self {
        let surface = CellularSurface::new(Self::cell_layout(geometry, has_armor_cells), max_thickness);
        Self {
            kind: ArmorKind::Humanoid { part },
            geometry,
            max_thickness,
            has_armor_cells,
            surface,
        }
    }

    /// Standalone armor filled to capacity; `rating` is joules per unit volume
    pub fn independent(
        name: impl Into<String>,
        geometry: CellGeometry,
        max_thickness: f32,
        has_armor_cells: bool,
        rating: f32,
        dynamic: bool,
    ) -> Self {
        let mut component = Self {
            kind: ArmorKind::Independent { name: name.into() },
            geometry,
            max_thickness,
            has_armor_cells,
            surface: CellularSurface::new(Self::cell_layout(geometry, has_armor_cells), max_thickness),
        };
        let max_volume = component.max_volume();
        component.distribute(rating / UNIT_VOLUME, dynamic, max_volume);
        component
    }

    /// Non-cellular armor collapses to a single cell
    fn cell_layout(geometry: CellGeometry, has_cells: bool) -> CellGeometry {
        if has_cells {
            geometry
        } else {
            CellGeometry::new(geometry.surface_area, 1)
        }
    }

    /// Spread `quantity` m³ of `armor` over this component
    pub fn distribute_armor(&mut self, armor: &ArmorItem, quantity: f32) {
        self.distribute(armor.rating_m3(), armor.dynamic, quantity);
    }

    /// Rebuild the cells for the material's policy and fill them uniformly
    pub fn distribute(&mut self, rating_per_volume: f32, dynamic: bool, quantity: f32) {
        let layout = Self::cell_layout(self.geometry, self.has_armor_cells || dynamic);
        self.surface = CellularSurface::new(layout, self.max_thickness);
        self.surface.distribute_armor(rating_per_volume, dynamic, quantity);
    }

    /// Strip the material off, returning the volume removed
    pub fn recover_armor(&mut self) -> f32 {
        self.surface.recover_armor()
    }

    pub fn armor_volume(&self) -> f32 {
        self.surface.volume()
    }

    pub fn max_volume(&self) -> f32 {
        self.surface.max_volume()
    }

    pub fn condition(&self) -> f32 {
        self.surface.condition()
    }

    pub fn max_condition(&self) -> f32 {
        self.surface.max_condition()
    }

    pub fn kind(&self) -> &ArmorKind {
        &self.kind
    }

    pub fn is_humanoid(&self) -> bool {
        matches!(self.kind, ArmorKind::Humanoid { .. })
    }

    pub fn surface(&self) -> &CellularSurface {
        &self.surface
    }

    pub fn geometry(&self) -> CellGeometry {
        self.geometry
    }

    pub fn max_thickness(&self) -> f32 {
        self.max_thickness
    }
}

impl ConditionComponent for ArmorComponent {
    fn component_name(&self) -> &str {
        match &self.kind {
            ArmorKind::Humanoid { part } => part.armor_component_name(),
            ArmorKind::Independent { name } => name,
        }
    }

    fn body_part(&self) -> BodyPart {
        match self.kind {
            ArmorKind::Humanoid { part } => part,
            ArmorKind::Independent { .. } => BodyPart::None,
        }
    }

    fn has_cells(&self) -> bool {
        self.has_armor_cells || self.surface.is_dynamic()
    }

    fn damage_condition(&mut self, energy: f32, area: f32, _targeted_part: BodyPart, cell_index: usize) -> f32 {
        let leftover = self.surface.damage(energy, area, cell_index);
        debug!(
            "{} absorbed {:.1} J at cell {}",
            self.component_name(),
            energy.max(0.0) - leftover,
            cell_index
        );
        leftover
    }

    fn condition_fraction(&self) -> f32 {
        self.surface.condition_fraction()
    }

    fn cell_condition_fraction(&self, cell_index: usize) -> f32 {
        self.surface.cell_condition_fraction(cell_index)
    }
}
