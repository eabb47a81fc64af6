//! Physiological constants
//!
//! Reference body: 79.9 kg total, 65.5 kg lean, 1.78 m. Tunable rates live
//! in `MetabolicParams`; these are the fixed conversion factors.

// Energy density
// 4000 kCal/kg * 4184 J/kCal
pub const KCAL_PER_KG_CARB: f64 = 4000.0;
pub const JOULES_PER_KG_CARB: f64 = 16_736_000.0;
// 9000 kCal/kg * 4184 J/kCal
pub const KCAL_PER_KG_FAT: f64 = 9000.0;
pub const JOULES_PER_KG_FAT: f64 = 37_656_000.0;

// Anaerobic glycolysis yields 2 of 38 ATP: 2/38 * 4000 kCal/kg * 4184 J/kCal
pub const JOULES_PER_KG_MUSCLE_GLYCOGEN: f64 = 880_842.0;
// Cori cycle spends 6 ATP returning lactate to glucose: 30/38
pub const GLUCOSE_PER_LACTATE: f64 = 0.789;

// Reference body
pub const REFERENCE_MASS: f64 = 79.9;
pub const REFERENCE_MASS_LEAN: f64 = 65.5;

// Stores, per kg of tissue
// 47.9 kg water / 65.5 kg lean
pub const WATER_PER_KG_LEAN: f64 = 0.73;
// 400 g muscle glycogen / 16.4 kg fast twitch
pub const GLYCOGEN_PER_KG_MUSCLE: f64 = 0.0244;
// 100 g liver glycogen / 65.5 kg lean
pub const GLYCOGEN_PER_KG_LIVER: f64 = 0.00153;
// 25 mmol/L * 5 L blood * 0.09008 kg/mol / 65.5 kg lean
pub const KG_BLOOD_LACTATE_MAX_PER_KG: f64 = 0.000_171_9;
// empirical
pub const KG_LACTATE_MAX_PER_KG_MUSCLE: f64 = 0.002;

// Basal metabolic rate, ~1600 kCal/day split carb/fat
pub const BMR_CARB_WATTS_PER_KG: f64 = 0.436;
pub const BMR_FAT_WATTS_PER_KG: f64 = 0.534;

// Digestion, kg per hour at reference lean mass
pub const PROTEIN_KG_PER_HOUR: f64 = 0.0025;
pub const CARB_KG_PER_HOUR: f64 = 0.030;
pub const FAT_KG_PER_HOUR: f64 = 0.015;
pub const WATER_KG_PER_HOUR: f64 = 0.900;

/// Full to empty in 4 hours, per second
pub const SATIETY_RATE: f64 = 0.000_069_4;

/// Hydration fraction at which a body dies
pub const HYDRATION_LETHAL_FRACTION: f64 = 0.8;

/// Hours of protein the digestion buffer display is scaled to
pub const PROTEIN_BUFFER_HOURS: f64 = 8.0;

pub const SECONDS_PER_HOUR: f64 = 3600.0;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_joule_conversions_consistent() {
        assert!((KCAL_PER_KG_CARB * 4184.0 - JOULES_PER_KG_CARB).abs() < 1.0);
        assert!((KCAL_PER_KG_FAT * 4184.0 - JOULES_PER_KG_FAT).abs() < 1.0);
        let glycolysis = 2.0 / 38.0 * JOULES_PER_KG_CARB;
        assert!((glycolysis - JOULES_PER_KG_MUSCLE_GLYCOGEN).abs() < 1.0);
    }

    #[test]
    fn test_cori_ratio_below_one() {
        assert!(GLUCOSE_PER_LACTATE > 0.0 && GLUCOSE_PER_LACTATE < 1.0);
    }
}
