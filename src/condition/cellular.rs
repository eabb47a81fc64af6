//! Cellular surface: per-cell armor volume bookkeeping
//!
//! A surface is split into cells (one per mesh triangle, or a single cell).
//! Each cell holds a volume of armor material; energy absorbed by a cell is
//! `volume * rating_per_volume`. Hits only ever drain the cell they land on,
//! so a burst of fire punches a hole rather than thinning the whole plate.

use serde::{Deserialize, Serialize};

use crate::condition::component::fraction;
use crate::condition::geometry::CellGeometry;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellularSurface {
    max_volume: f32,
    cell_count: usize,
    cell_area: f32,
    /// Joules absorbed per m³ of material
    rating_per_volume: f32,
    dynamic: bool,
    /// `None` until armor is distributed, and again after it is recovered
    cell_volumes: Option<Vec<f32>>,
}

impl CellularSurface {
    pub fn new(geometry: CellGeometry, thickness: f32) -> Self {
        let mut surface = Self {
            max_volume: 0.0,
            cell_count: geometry.cell_count.max(1),
            cell_area: 0.0,
            rating_per_volume: 0.0,
            dynamic: false,
            cell_volumes: None,
        };
        surface.initialize(geometry.surface_area, thickness);
        surface
    }

    /// Set the capacity from surface area and maximum thickness
    pub fn initialize(&mut self, surface_area: f32, thickness: f32) {
        let surface_area = surface_area.max(0.0);
        self.max_volume = surface_area * thickness.max(0.0);
        self.cell_area = surface_area / self.cell_count as f32;
    }

    /// Fill every cell uniformly with `total_quantity` m³ of material
    ///
    /// Quantities above `max_volume` are capped so no cell exceeds its share.
    pub fn distribute_armor(&mut self, rating_per_volume: f32, dynamic: bool, total_quantity: f32) {
        self.rating_per_volume = rating_per_volume.max(0.0);
        self.dynamic = dynamic;
        let fill = fraction(total_quantity, self.max_volume).clamp(0.0, 1.0);
        let per_cell = self.max_volume * fill / self.cell_count as f32;
        self.cell_volumes = Some(vec![per_cell; self.cell_count]);
    }

    /// Remove all material, returning the recovered volume
    pub fn recover_armor(&mut self) -> f32 {
        self.cell_volumes
            .take()
            .map(|cells| cells.iter().sum())
            .unwrap_or(0.0)
    }

    /// Spend `energy` on one cell, returns the energy left over
    pub fn damage(&mut self, energy: f32, area: f32, cell_index: usize) -> f32 {
        let index = self.clamp_index(cell_index);
        let energy = energy.max(0.0);
        if self.rating_per_volume <= 0.0 {
            return energy;
        }
        let Some(cells) = self.cell_volumes.as_mut() else {
            return energy;
        };

        // an impact never draws on more than its own cell
        let area_ratio = if self.cell_area > 0.0 {
            area.clamp(0.0, self.cell_area) / self.cell_area
        } else {
            1.0
        };

        let absorbable = cells[index] * self.rating_per_volume * area_ratio;
        let damage = energy.min(absorbable);
        cells[index] = (cells[index] - damage / self.rating_per_volume).max(0.0);

        // TODO: when `dynamic` is set, refill the damaged cell from its neighbours
        energy - damage
    }

    /// Out-of-range indices read cell 0
    fn clamp_index(&self, cell_index: usize) -> usize {
        if cell_index >= self.cell_count {
            0
        } else {
            cell_index
        }
    }

    pub fn condition(&self) -> f32 {
        self.volume() * self.rating_per_volume
    }

    pub fn max_condition(&self) -> f32 {
        self.max_volume * self.rating_per_volume
    }

    pub fn cell_condition(&self, cell_index: usize) -> f32 {
        let index = self.clamp_index(cell_index);
        self.cell_volumes
            .as_ref()
            .map(|cells| cells[index] * self.rating_per_volume)
            .unwrap_or(0.0)
    }

    pub fn condition_fraction(&self) -> f32 {
        fraction(self.condition(), self.max_condition()).clamp(0.0, 1.0)
    }

    pub fn cell_condition_fraction(&self, cell_index: usize) -> f32 {
        let cell_max = self.max_condition() / self.cell_count as f32;
        fraction(self.cell_condition(cell_index), cell_max).clamp(0.0, 1.0)
    }

    /// Total material currently held
    pub fn volume(&self) -> f32 {
        self.cell_volumes
            .as_ref()
            .map(|cells| cells.iter().sum())
            .unwrap_or(0.0)
    }

    pub fn cell_volume(&self, cell_index: usize) -> f32 {
        let index = self.clamp_index(cell_index);
        self.cell_volumes
            .as_ref()
            .map(|cells| cells[index])
            .unwrap_or(0.0)
    }

    pub fn cell_volumes(&self) -> Option<&[f32]> {
        self.cell_volumes.as_deref()
    }

    pub fn is_distributed(&self) -> bool {
        self.cell_volumes.is_some()
    }

    pub fn max_volume(&self) -> f32 {
        self.max_volume
    }

    pub fn cell_count(&self) -> usize {
        self.cell_count
    }

    pub fn cell_area(&self) -> f32 {
        self.cell_area
    }

    pub fn rating_per_volume(&self) -> f32 {
        self.rating_per_volume
    }

    pub fn is_dynamic(&self) -> bool {
        self.dynamic
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn four_cell_plate() -> CellularSurface {
        // 0.4 m² at 1 cm thick => 0.004 m³
        CellularSurface::new(CellGeometry::new(0.4, 4), 0.01)
    }

    #[test]
    fn test_distribute_fills_cells_uniformly() {
        let mut surface = four_cell_plate();
        assert!((surface.max_volume() - 0.004).abs() < 1e-7);
        surface.distribute_armor(1_000_000.0, false, 0.004);
        for i in 0..4 {
            assert!((surface.cell_volume(i) - 0.001).abs() < 1e-7);
        }
        assert!((surface.condition_fraction() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_damage_drains_only_hit_cell() {
        let mut surface = four_cell_plate();
        surface.distribute_armor(1_000_000.0, false, 0.004);
        let area = surface.cell_area();

        let leftover = surface.damage(500.0, area, 0);
        assert_eq!(leftover, 0.0);
        assert!((surface.cell_volume(0) - 0.0005).abs() < 1e-7);
        assert!((surface.cell_volume(1) - 0.001).abs() < 1e-7);
    }

    #[test]
    fn test_damage_passes_through_depleted_cell() {
        let mut surface = four_cell_plate();
        surface.distribute_armor(1_000_000.0, false, 0.004);
        let area = surface.cell_area();

        let leftover = surface.damage(1500.0, area, 2);
        assert!((leftover - 500.0).abs() < 0.01);
        assert!(surface.cell_volume(2).abs() < 1e-9);
    }

    #[test]
    fn test_impact_area_limits_absorption() {
        let mut surface = four_cell_plate();
        surface.distribute_armor(1_000_000.0, false, 0.004);
        let area = surface.cell_area();

        // a quarter of the cell can only stop a quarter of its energy budget
        let leftover = surface.damage(1000.0, area * 0.25, 1);
        assert!((leftover - 750.0).abs() < 0.01);
    }

    #[test]
    fn test_oversized_impact_capped_to_cell() {
        let mut surface = four_cell_plate();
        surface.distribute_armor(1_000_000.0, false, 0.004);
        let area = surface.cell_area();

        let leftover = surface.damage(3000.0, area * 10.0, 1);
        assert!((leftover - 2000.0).abs() < 0.01);
        assert!((surface.cell_volume(0) - 0.001).abs() < 1e-7);
    }

    #[test]
    fn test_out_of_range_index_hits_cell_zero() {
        let mut surface = four_cell_plate();
        surface.distribute_armor(1_000_000.0, false, 0.004);
        let area = surface.cell_area();

        surface.damage(500.0, area, 99);
        assert!((surface.cell_volume(0) - 0.0005).abs() < 1e-7);
    }

    #[test]
    fn test_negative_energy_is_zero() {
        let mut surface = four_cell_plate();
        surface.distribute_armor(1_000_000.0, false, 0.004);
        assert_eq!(surface.damage(-50.0, 0.1, 0), 0.0);
        assert!((surface.volume() - 0.004).abs() < 1e-7);
    }

    #[test]
    fn test_undistributed_surface_passes_everything() {
        let mut surface = four_cell_plate();
        assert_eq!(surface.damage(100.0, 0.1, 0), 100.0);
        assert_eq!(surface.condition_fraction(), 0.0);
        assert_eq!(surface.cell_condition_fraction(0), 0.0);
    }

    #[test]
    fn test_recover_returns_volume_and_clears() {
        let mut surface = four_cell_plate();
        surface.distribute_armor(1_000_000.0, false, 0.002);
        assert!((surface.recover_armor() - 0.002).abs() < 1e-7);
        assert!(!surface.is_distributed());
        assert_eq!(surface.recover_armor(), 0.0);
    }

    #[test]
    fn test_overfill_capped_to_max_volume() {
        let mut surface = four_cell_plate();
        surface.distribute_armor(1_000_000.0, false, 1.0);
        assert!((surface.volume() - 0.004).abs() < 1e-6);
    }

    #[test]
    fn test_zero_capacity_surface() {
        let mut surface = CellularSurface::new(CellGeometry::new(0.0, 1), 0.01);
        surface.distribute_armor(1_000_000.0, false, 0.001);
        assert_eq!(surface.condition_fraction(), 0.0);
        assert_eq!(surface.damage(10.0, 0.0, 0), 10.0);
    }
}
