//! Mechanical power demands placed on the muscles

use serde::{Deserialize, Serialize};

use crate::physique::params::MetabolicParams;
use crate::physique::pools::MetabolicPools;

/// Mechanical output of one activity, in watts
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ActionData {
    pub name: String,
    pub power_upper: f64,
    pub power_lower: f64,
}

impl ActionData {
    pub fn new(name: impl Into<String>, power_upper: f64, power_lower: f64) -> Self {
        Self {
            name: name.into(),
            power_upper,
            power_lower,
        }
    }

    pub fn total_power(&self) -> f64 {
        self.power_upper + self.power_lower
    }
}

/// Chemical power ceilings of each muscle compartment, in watts
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MuscleParams {
    pub upper_aerobic_threshold: f64,
    pub upper_anaerobic_threshold: f64,
    pub lower_aerobic_threshold: f64,
    pub lower_anaerobic_threshold: f64,
}

impl MuscleParams {
    /// Slow twitch powers aerobic work, fast twitch anaerobic
    pub fn from_pools(pools: &MetabolicPools, params: &MetabolicParams) -> Self {
        Self {
            upper_aerobic_threshold: pools.slow_twitch_upper * params.power_per_kg_slow_twitch,
            upper_anaerobic_threshold: pools.fast_twitch_upper * params.power_per_kg_fast_twitch,
            lower_aerobic_threshold: pools.slow_twitch_lower * params.power_per_kg_slow_twitch,
            lower_anaerobic_threshold: pools.fast_twitch_lower * params.power_per_kg_fast_twitch,
        }
    }
}

/// Chemical power split of one compartment
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct PowerSplit {
    pub aerobic: f64,
    pub anaerobic: f64,
}

impl PowerSplit {
    /// Aerobic first up to its ceiling, the remainder anaerobic up to its own
    pub(crate) fn new(chemical_power: f64, aerobic_threshold: f64, anaerobic_threshold: f64) -> Self {
        let demand = chemical_power.max(0.0);
        let aerobic = demand.min(aerobic_threshold.max(0.0));
        let anaerobic = (demand - aerobic).clamp(0.0, anaerobic_threshold.max(0.0));
        Self { aerobic, anaerobic }
    }
}
