//! The damageable capability shared by armor, bones and organs

use crate::condition::body_part::BodyPart;

/// Anything a projectile, beam or blade can spend energy on.
///
/// `damage_condition` consumes what it can and returns the leftover energy,
/// which the caller passes on to the next component along the hit path.
pub trait ConditionComponent {
    fn component_name(&self) -> &str;

    fn body_part(&self) -> BodyPart {
        BodyPart::None
    }

    /// Whether individual cells (mesh polygons) are tracked
    fn has_cells(&self) -> bool {
        false
    }

    /// Apply `energy` joules over `area` m² at `cell_index`, returns leftover energy
    fn damage_condition(
        &mut self,
        energy: f32,
        area: f32,
        targeted_part: BodyPart,
        cell_index: usize,
    ) -> f32;

    /// Current condition / max condition, in [0, 1]
    fn condition_fraction(&self) -> f32;

    fn cell_condition_fraction(&self, cell_index: usize) -> f32;
}

/// `numerator / denominator`, or 0 when the capacity is zero
pub(crate) fn fraction(numerator: f32, denominator: f32) -> f32 {
    if denominator <= 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}
