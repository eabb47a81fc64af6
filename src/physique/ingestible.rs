//! Food and drink

use serde::{Deserialize, Serialize};

// Fullness per gram, from fullness factor per kCal over ~2500 units to full
// protein: 2.9/kCal * 4 kCal/g / 2500
const PROTEIN_SATIETY: f64 = 0.00464;
// sugar: 1.3/kCal * 4 kCal/g / 2500
const CARB_SATIETY: f64 = 0.00208;
// lard: 0.5/kCal * 9 kCal/g / 2500
const FAT_SATIETY: f64 = 0.00180;
// cola: 3.7/kCal * 0.41 kCal/g / 2500
const WATER_SATIETY: f64 = 0.00060;

/// Macronutrients of one serving, in grams
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Ingestible {
    pub name: String,
    #[serde(default)]
    pub protein: f64,
    #[serde(default)]
    pub carbs: f64,
    #[serde(default)]
    pub fat: f64,
    #[serde(default)]
    pub water: f64,
}

impl Ingestible {
    pub fn new(name: impl Into<String>, protein: f64, carbs: f64, fat: f64, water: f64) -> Self {
        Self {
            name: name.into(),
            protein,
            carbs,
            fat,
            water,
        }
    }

    /// Fullness for the reference body; `Physique::adjust_satiety` rescales it
    pub fn satiety(&self) -> f64 {
        PROTEIN_SATIETY * self.protein
            + CARB_SATIETY * self.carbs
            + FAT_SATIETY * self.fat
            + WATER_SATIETY * self.water
    }

    pub fn calories(&self) -> f64 {
        self.protein * 4.0 + self.fat * 9.0 + self.carbs * 4.0
    }
}
