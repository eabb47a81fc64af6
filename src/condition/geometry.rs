//! Surface geometry for cellular armor
//!
//! The simulation only needs two scalars per surface: total area and cell
//! count. Hosts derive them from whatever collision geometry they have.

use glam::Vec3;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CellGeometry {
    /// Total surface area in m²
    pub surface_area: f32,
    /// Number of independently tracked cells (triangles), at least 1
    pub cell_count: usize,
}

impl CellGeometry {
    pub fn new(surface_area: f32, cell_count: usize) -> Self {
        Self {
            surface_area: surface_area.max(0.0),
            cell_count: cell_count.max(1),
        }
    }

    /// Axis-aligned box fallback: one cell covering all six faces
    pub fn from_box_bounds(size: Vec3) -> Self {
        let area = 2.0 * size.x * size.y + 2.0 * size.x * size.z + 2.0 * size.y * size.z;
        Self::new(area, 1)
    }

    /// Triangle mesh: one cell per triangle, vertices scaled per axis
    ///
    /// Indices come in triples; a trailing partial triangle is ignored, as
    /// are triangles referencing vertices out of range.
    pub fn from_triangles(vertices: &[Vec3], indices: &[u32], scale: Vec3) -> Self {
        let mut area = 0.0;
        let mut triangles = 0;
        for tri in indices.chunks_exact(3) {
            let (Some(a), Some(b), Some(c)) = (
                vertices.get(tri[0] as usize),
                vertices.get(tri[1] as usize),
                vertices.get(tri[2] as usize),
            ) else {
                continue;
            };
            let (a, b, c) = (*a * scale, *b * scale, *c * scale);
            area += (b - a).cross(c - a).length() * 0.5;
            triangles += 1;
        }
        Self::new(area, triangles)
    }

    /// Area of a single cell
    pub fn cell_area(&self) -> f32 {
        self.surface_area / self.cell_count as f32
    }
}
