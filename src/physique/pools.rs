//! Metabolic pools and bounded transfers
//!
//! Every pool is a non-negative mass in kg (satiety is a 0..1 fraction).
//! Maxima derive from current lean mass, so they are applied when a
//! transfer happens rather than stored.

use serde::{Deserialize, Serialize};

use crate::physique::constants::*;

/// Add `delta` to `pool` without crossing 0 or `max`; returns the change applied
///
/// A pool already above `max` is never pulled down by a positive delta, and
/// a negative delta never takes it below 0.
pub fn clamped_add(pool: &mut f64, max: f64, delta: f64) -> f64 {
    let applied = if delta >= 0.0 {
        delta.min((max - *pool).max(0.0))
    } else {
        -(-delta).min(pool.max(0.0))
    };
    *pool += applied;
    applied
}

/// Remove up to `amount` from `pool`; returns what was removed
pub fn drain(pool: &mut f64, amount: f64) -> f64 {
    -clamped_add(pool, f64::INFINITY, -amount.max(0.0))
}

/// Move up to `amount` from `from` into `to`, respecting both bounds
pub fn transfer(from: &mut f64, to: &mut f64, to_max: f64, amount: f64) -> f64 {
    let moved = amount
        .max(0.0)
        .min(from.max(0.0))
        .min((to_max - *to).max(0.0));
    *from -= moved;
    *to += moved;
    moved
}

/// Ratio helper that treats an empty capacity as empty
fn ratio(value: f64, max: f64) -> f64 {
    if max > 0.0 {
        value / max
    } else {
        0.0
    }
}

/// Body composition and every metabolic store
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetabolicPools {
    // === COMPOSITION ===
    pub height: f64,
    pub fast_twitch_upper: f64,
    pub fast_twitch_lower: f64,
    pub slow_twitch_upper: f64,
    pub slow_twitch_lower: f64,
    pub mass_fat: f64,
    /// Bone, organs and everything else that is neither muscle nor fat nor water
    pub mass_base: f64,

    // === STORES ===
    pub glycogen_upper: f64,
    pub glycogen_lower: f64,
    pub glycogen_liver: f64,
    pub hydration: f64,
    pub upper_lactate: f64,
    pub lower_lactate: f64,
    pub blood_lactate: f64,

    // === DIGESTION ===
    pub satiety: f64,
    pub water_digesting: f64,
    pub carb_digesting: f64,
    pub protein_digesting: f64,
    pub fat_digesting: f64,
}

impl Default for MetabolicPools {
    fn default() -> Self {
        Self {
            height: 1.78,
            fast_twitch_upper: 7.1,
            fast_twitch_lower: 9.3,
            slow_twitch_upper: 7.1,
            slow_twitch_lower: 9.3,
            mass_fat: 14.4,
            mass_base: 32.0,
            glycogen_upper: 0.173,
            glycogen_lower: 0.227,
            glycogen_liver: 0.1,
            hydration: 47.9,
            upper_lactate: 0.0,
            lower_lactate: 0.0,
            blood_lactate: 0.0,
            satiety: 0.0,
            water_digesting: 0.0,
            carb_digesting: 0.0,
            protein_digesting: 0.020,
            fat_digesting: 0.0,
        }
    }
}

impl MetabolicPools {
    // === MASSES ===

    pub fn mass_muscle(&self) -> f64 {
        self.fast_twitch_upper + self.fast_twitch_lower + self.slow_twitch_upper + self.slow_twitch_lower
    }

    pub fn mass_lean(&self) -> f64 {
        self.mass_base + self.mass_muscle()
    }

    pub fn mass_total(&self) -> f64 {
        self.mass_lean() + self.mass_fat
    }

    // === MAXIMA ===

    pub fn hydration_max(&self) -> f64 {
        self.mass_lean() * WATER_PER_KG_LEAN
    }

    pub fn upper_glycogen_max(&self) -> f64 {
        self.fast_twitch_upper * GLYCOGEN_PER_KG_MUSCLE
    }

    pub fn lower_glycogen_max(&self) -> f64 {
        self.fast_twitch_lower * GLYCOGEN_PER_KG_MUSCLE
    }

    pub fn liver_glycogen_max(&self) -> f64 {
        self.mass_lean() * GLYCOGEN_PER_KG_LIVER
    }

    pub fn blood_lactate_max(&self) -> f64 {
        self.mass_lean() * KG_BLOOD_LACTATE_MAX_PER_KG
    }

    pub fn upper_lactate_max(&self) -> f64 {
        self.fast_twitch_upper * KG_LACTATE_MAX_PER_KG_MUSCLE
    }

    pub fn lower_lactate_max(&self) -> f64 {
        self.fast_twitch_lower * KG_LACTATE_MAX_PER_KG_MUSCLE
    }

    // === RATES ===

    /// Lean mass relative to the reference body
    pub fn lean_scale(&self) -> f64 {
        self.mass_lean() / REFERENCE_MASS_LEAN
    }

    /// kg/s
    pub fn protein_digestion_rate(&self) -> f64 {
        PROTEIN_KG_PER_HOUR * self.lean_scale() / SECONDS_PER_HOUR
    }

    pub fn carb_digestion_rate(&self) -> f64 {
        CARB_KG_PER_HOUR * self.lean_scale() / SECONDS_PER_HOUR
    }

    pub fn fat_digestion_rate(&self) -> f64 {
        FAT_KG_PER_HOUR * self.lean_scale() / SECONDS_PER_HOUR
    }

    pub fn water_digestion_rate(&self) -> f64 {
        WATER_KG_PER_HOUR * self.lean_scale() / SECONDS_PER_HOUR
    }

    /// Basal glycogen burn over total mass, kg/s
    pub fn glycogen_bmr(&self) -> f64 {
        self.mass_total() * BMR_CARB_WATTS_PER_KG / JOULES_PER_KG_CARB
    }

    /// Basal fat burn, kg/s
    pub fn fat_bmr(&self) -> f64 {
        self.mass_total() * BMR_FAT_WATTS_PER_KG / JOULES_PER_KG_FAT
    }

    // === FRACTIONS ===

    pub fn upper_glycogen_fraction(&self) -> f64 {
        ratio(self.glycogen_upper, self.upper_glycogen_max())
    }

    pub fn lower_glycogen_fraction(&self) -> f64 {
        ratio(self.glycogen_lower, self.lower_glycogen_max())
    }

    pub fn liver_glycogen_fraction(&self) -> f64 {
        ratio(self.glycogen_liver, self.liver_glycogen_max())
    }

    /// 1 when fully hydrated, 0 at the lethal threshold
    pub fn hydration_fraction(&self) -> f64 {
        let raw = ratio(self.hydration, self.hydration_max());
        (raw - HYDRATION_LETHAL_FRACTION) / (1.0 - HYDRATION_LETHAL_FRACTION)
    }

    pub fn blood_lactate_fraction(&self) -> f64 {
        ratio(self.blood_lactate, self.blood_lactate_max())
    }

    /// May exceed 1; muscle lactate is only bounded below
    pub fn upper_lactate_fraction(&self) -> f64 {
        ratio(self.upper_lactate, self.upper_lactate_max())
    }

    pub fn lower_lactate_fraction(&self) -> f64 {
        ratio(self.lower_lactate, self.lower_lactate_max())
    }

    /// Protein buffer against the amount digested in `PROTEIN_BUFFER_HOURS`
    pub fn protein_fraction(&self) -> f64 {
        let buffer = self.protein_digestion_rate() * SECONDS_PER_HOUR * PROTEIN_BUFFER_HOURS;
        ratio(self.protein_digesting, buffer).clamp(0.0, 1.0)
    }

    /// Every pool is non-negative and satiety stays a fraction
    pub fn is_valid(&self) -> bool {
        let stores = [
            self.glycogen_upper,
            self.glycogen_lower,
            self.glycogen_liver,
            self.hydration,
            self.upper_lactate,
            self.lower_lactate,
            self.blood_lactate,
            self.water_digesting,
            self.carb_digesting,
            self.protein_digesting,
            self.fat_digesting,
            self.mass_fat,
        ];
        stores.iter().all(|v| *v >= 0.0 && v.is_finite()) && (0.0..=1.0).contains(&self.satiety)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamped_add_caps_at_max() {
        let mut pool = 0.9;
        let applied = clamped_add(&mut pool, 1.0, 0.5);
        assert!((applied - 0.1).abs() < 1e-6);
        assert!((pool - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_clamped_add_floors_at_zero() {
        let mut pool = 0.2;
        let applied = clamped_add(&mut pool, 1.0, -0.5);
        assert!((applied + 0.2).abs() < 1e-6);
        assert_eq!(pool, 0.0);
    }

    #[test]
    fn test_clamped_add_leaves_overfull_pool() {
        let mut pool = 1.5;
        assert_eq!(clamped_add(&mut pool, 1.0, 0.3), 0.0);
        assert_eq!(pool, 1.5);
    }

    #[test]
    fn test_transfer_bounded_by_source_and_room() {
        let mut from = 0.05;
        let mut to = 0.0;
        assert_eq!(transfer(&mut from, &mut to, 1.0, 0.2), 0.05);
        assert_eq!(from, 0.0);

        let mut from = 1.0;
        let mut to = 0.9;
        let moved = transfer(&mut from, &mut to, 1.0, 0.5);
        assert!((moved - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_default_masses() {
        let pools = MetabolicPools::default();
        assert!((pools.mass_muscle() - 32.8).abs() < 1e-9);
        assert!((pools.mass_lean() - 64.8).abs() < 1e-9);
        assert!((pools.mass_total() - 79.2).abs() < 1e-9);
        // a little lighter than the reference body
        assert!(pools.lean_scale() < 1.0 && pools.lean_scale() > 0.98);
    }

    #[test]
    fn test_fresh_body_near_full() {
        let pools = MetabolicPools::default();
        assert!(pools.upper_glycogen_fraction() > 0.99);
        assert!(pools.lower_glycogen_fraction() > 0.99);
        assert!(pools.liver_glycogen_fraction() > 0.99);
        assert!(pools.hydration_fraction() > 0.99);
        assert_eq!(pools.lower_lactate_fraction(), 0.0);
        assert!(pools.is_valid());
    }

    #[test]
    fn test_protein_fraction_clamped() {
        let pools = MetabolicPools {
            protein_digesting: 1.0,
            ..Default::default()
        };
        assert_eq!(pools.protein_fraction(), 1.0);
    }

    #[test]
    fn test_hydration_fraction_zero_at_lethal() {
        let mut pools = MetabolicPools::default();
        pools.hydration = pools.hydration_max() * HYDRATION_LETHAL_FRACTION;
        assert!(pools.hydration_fraction().abs() < 1e-4);
    }

    #[test]
    fn test_bmr_scales_with_total_mass() {
        let lean = MetabolicPools::default();
        let expected = lean.mass_total() * BMR_FAT_WATTS_PER_KG / JOULES_PER_KG_FAT;
        assert!((lean.fat_bmr() - expected).abs() < 1e-15);

        let heavy = MetabolicPools {
            mass_fat: lean.mass_fat + 30.0,
            ..lean
        };
        assert!(heavy.fat_bmr() > lean.fat_bmr());
        assert!(heavy.glycogen_bmr() > lean.glycogen_bmr());
    }
}
