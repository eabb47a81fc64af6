//! Tunable metabolic parameters
//!
//! Passed to `Physique` at construction. Defaults reproduce an average adult.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetabolicParams {
    // === MUSCLE POWER ===
    /// W per kg of fast twitch muscle (anaerobic ceiling)
    ///
    /// Set above slow twitch for balance; sprinting must feel distinct.
    pub power_per_kg_fast_twitch: f64,

    /// W per kg of slow twitch muscle (aerobic ceiling)
    ///
    /// An average person holds ~3 W/kg body mass for an hour on 16.4 kg of
    /// slow twitch: 3 * 79.9 / 16.4 = 14.6.
    pub power_per_kg_slow_twitch: f64,

    /// Mechanical work out per chemical energy in
    pub muscle_efficiency: f64,

    // === TRANSPORT ===
    /// Liver to muscle glucose flow, fraction of muscle capacity per second
    /// per unit of fractional gradient
    pub glucose_transfer_rate: f64,

    /// Blood lactate cleared per kg lean mass per second
    ///
    /// Measured liver gluconeogenesis is ~30x slower; this folds in the
    /// other clearance routes so recovery takes minutes, not hours.
    pub kg_blood_lactate_per_kg_per_s: f64,

    /// Muscle lactate released to blood per kg fast twitch per second
    pub kg_muscle_lactate_per_kg_per_s: f64,

    // === LIMITS ===
    /// Lower-body lactate fraction above which sprinting is refused
    pub sprint_lactate_limit: f64,
}

impl Default for MetabolicParams {
    fn default() -> Self {
        Self {
            power_per_kg_fast_twitch: 21.0,
            power_per_kg_slow_twitch: 14.6,
            muscle_efficiency: 0.25,
            glucose_transfer_rate: 0.01,
            kg_blood_lactate_per_kg_per_s: 0.000_002,
            kg_muscle_lactate_per_kg_per_s: 0.000_05,
            sprint_lactate_limit: 1.0,
        }
    }
}

impl MetabolicParams {
    pub fn validate(&self) -> Result<(), String> {
        if self.muscle_efficiency <= 0.0 || self.muscle_efficiency > 1.0 {
            return Err(format!(
                "muscle_efficiency ({}) must be in (0, 1]",
                self.muscle_efficiency
            ));
        }
        if self.power_per_kg_fast_twitch < 0.0 || self.power_per_kg_slow_twitch < 0.0 {
            return Err("Muscle power densities must not be negative".into());
        }
        if self.glucose_transfer_rate < 0.0
            || self.kg_blood_lactate_per_kg_per_s < 0.0
            || self.kg_muscle_lactate_per_kg_per_s < 0.0
        {
            return Err("Transport rates must not be negative".into());
        }
        Ok(())
    }
}
