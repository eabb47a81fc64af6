//! Movement modes and their muscle draw
//!
//! Each ambulation names a pose, whether the body is moving, how far it can be
//! heard, and what fraction of each muscle compartment it draws.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::physique::action::{ActionData, MuscleParams};
use crate::physique::params::MetabolicParams;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Ambulation {
    Stand,
    Walk,
    Run,
    Sprint,
    Crouch,
    Sneak,
    Lay,
    Crawl,
    /// Start state, never re-entered
    Unset,
}

impl Ambulation {
    pub fn all() -> &'static [Ambulation] {
        &[
            Ambulation::Stand,
            Ambulation::Walk,
            Ambulation::Run,
            Ambulation::Sprint,
            Ambulation::Crouch,
            Ambulation::Sneak,
            Ambulation::Lay,
            Ambulation::Crawl,
        ]
    }
}

impl fmt::Display for Ambulation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Pose {
    Standing,
    Crouching,
    Prone,
    Unset,
}

/// One row of a character's ambulation table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmbulationData {
    pub tag: Ambulation,
    pub name: String,
    pub pose: Pose,
    #[serde(default)]
    pub is_still: bool,
    #[serde(default = "default_detection_radius")]
    pub auditory_detection_radius: f64,
    // Fractions of each compartment's ceiling
    #[serde(default)]
    pub upper_aerobic_draw: f64,
    #[serde(default)]
    pub upper_anaerobic_draw: f64,
    #[serde(default)]
    pub lower_aerobic_draw: f64,
    #[serde(default)]
    pub lower_anaerobic_draw: f64,
    /// Relates power output and body mass to movement speed
    #[serde(default = "default_power_to_speed")]
    pub power_to_speed: f64,
}

fn default_detection_radius() -> f64 {
    20.0
}

fn default_power_to_speed() -> f64 {
    8.0
}

impl AmbulationData {
    pub fn new(tag: Ambulation, pose: Pose, is_still: bool) -> Self {
        Self {
            tag,
            name: tag.to_string(),
            pose,
            is_still,
            auditory_detection_radius: default_detection_radius(),
            upper_aerobic_draw: 0.0,
            upper_anaerobic_draw: 0.0,
            lower_aerobic_draw: 0.0,
            lower_anaerobic_draw: 0.0,
            power_to_speed: default_power_to_speed(),
        }
    }

    pub fn with_radius(mut self, radius: f64) -> Self {
        self.auditory_detection_radius = radius;
        self
    }

    pub fn with_upper(mut self, aerobic: f64, anaerobic: f64) -> Self {
        self.upper_aerobic_draw = aerobic;
        self.upper_anaerobic_draw = anaerobic;
        self
    }

    pub fn with_lower(mut self, aerobic: f64, anaerobic: f64) -> Self {
        self.lower_aerobic_draw = aerobic;
        self.lower_anaerobic_draw = anaerobic;
        self
    }

    /// Mechanical output of this ambulation for the given muscle ceilings
    pub fn action_data(&self, muscle: &MuscleParams, params: &MetabolicParams) -> ActionData {
        let power_upper = (muscle.upper_aerobic_threshold * self.upper_aerobic_draw
            + muscle.upper_anaerobic_threshold * self.upper_anaerobic_draw)
            * params.muscle_efficiency;
        let power_lower = (muscle.lower_aerobic_threshold * self.lower_aerobic_draw
            + muscle.lower_anaerobic_threshold * self.lower_anaerobic_draw)
            * params.muscle_efficiency;
        ActionData::new(self.name.clone(), power_upper, power_lower)
    }

    /// Table for an average adult
    pub fn default_table() -> Vec<AmbulationData> {
        vec![
            AmbulationData::new(Ambulation::Stand, Pose::Standing, true).with_radius(2.0),
            AmbulationData::new(Ambulation::Walk, Pose::Standing, false)
                .with_radius(10.0)
                .with_upper(0.05, 0.0)
                .with_lower(0.3, 0.0),
            AmbulationData::new(Ambulation::Run, Pose::Standing, false)
                .with_radius(20.0)
                .with_upper(0.2, 0.0)
                .with_lower(1.0, 0.0),
            AmbulationData::new(Ambulation::Sprint, Pose::Standing, false)
                .with_radius(30.0)
                .with_upper(0.3, 0.2)
                .with_lower(1.0, 1.0),
            AmbulationData::new(Ambulation::Crouch, Pose::Crouching, true)
                .with_radius(1.0)
                .with_lower(0.05, 0.0),
            AmbulationData::new(Ambulation::Sneak, Pose::Crouching, false)
                .with_radius(5.0)
                .with_upper(0.05, 0.0)
                .with_lower(0.3, 0.0),
            AmbulationData::new(Ambulation::Lay, Pose::Prone, true).with_radius(0.5),
            AmbulationData::new(Ambulation::Crawl, Pose::Prone, false)
                .with_radius(5.0)
                .with_upper(0.15, 0.0)
                .with_lower(0.05, 0.0),
        ]
    }
}
