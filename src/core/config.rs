//! Character configuration
//!
//! A body (bones, organs, armor layout) and a physique (composition,
//! metabolic parameters, ambulation table). Loaded from TOML and handed to
//! constructors; there is no global config.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::condition::armor::DEFAULT_MAX_THICKNESS;
use crate::condition::body_part::BodyPart;
use crate::condition::organ::OrganKind;
use crate::core::error::{Result, SimError};
use crate::physique::ambulation::{Ambulation, AmbulationData};
use crate::physique::params::MetabolicParams;
use crate::physique::physique::DEFAULT_INTERVAL;
use crate::physique::pools::MetabolicPools;

/// Bundled humanoid definition
pub const HUMANOID_TOML: &str = include_str!("../../data/humanoid.toml");

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub body: BodyConfig,
    pub physique: PhysiqueConfig,
}

/// Skeleton, organs and armor layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BodyConfig {
    /// Condition of every bone
    ///
    /// Bone health is uniform; a hit that breaks one bone would break any.
    pub bone_health: f32,
    pub organs: Vec<OrganConfig>,
    /// One piece per humanoid body part; each registers its bone
    pub armor: Vec<ArmorPieceConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrganConfig {
    pub name: String,
    pub condition_max: f32,
    #[serde(default)]
    pub regen: f32,
    #[serde(default)]
    pub kind: OrganKind,
    #[serde(default)]
    pub death_prefab: Option<String>,
    #[serde(default)]
    pub death_sound: Option<String>,
}

/// Armor shell over one body part
///
/// `surface_area` (m²) and `cell_count` come from the part's mesh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArmorPieceConfig {
    pub part: BodyPart,
    pub surface_area: f32,
    pub cell_count: usize,
    #[serde(default = "default_max_thickness")]
    pub max_thickness: f32,
    #[serde(default = "default_has_cells")]
    pub has_cells: bool,
}

fn default_max_thickness() -> f32 {
    DEFAULT_MAX_THICKNESS
}

fn default_has_cells() -> bool {
    true
}

/// Metabolic setup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysiqueConfig {
    /// Seconds per metabolic tick
    pub interval: f64,
    pub metabolism_active: bool,
    /// Initial body composition and stores
    pub composition: MetabolicPools,
    pub params: MetabolicParams,
    pub ambulations: Vec<AmbulationData>,
}

impl Default for PhysiqueConfig {
    fn default() -> Self {
        Self {
            interval: DEFAULT_INTERVAL,
            metabolism_active: true,
            composition: MetabolicPools::default(),
            params: MetabolicParams::default(),
            ambulations: AmbulationData::default_table(),
        }
    }
}

impl Default for BodyConfig {
    fn default() -> Self {
        // (part, m², cells)
        let layout = [
            (BodyPart::Head, 0.12, 48),
            (BodyPart::UpperTorso, 0.30, 96),
            (BodyPart::LowerTorso, 0.15, 48),
            (BodyPart::LeftUpperArm, 0.06, 24),
            (BodyPart::RightUpperArm, 0.06, 24),
            (BodyPart::LeftLowerArm, 0.05, 24),
            (BodyPart::RightLowerArm, 0.05, 24),
            (BodyPart::LeftHand, 0.04, 16),
            (BodyPart::RightHand, 0.04, 16),
            (BodyPart::LeftThigh, 0.12, 32),
            (BodyPart::RightThigh, 0.12, 32),
            (BodyPart::LeftCalf, 0.08, 24),
            (BodyPart::RightCalf, 0.08, 24),
            (BodyPart::LeftFoot, 0.05, 16),
            (BodyPart::RightFoot, 0.05, 16),
        ];
        Self {
            bone_health: 100.0,
            organs: vec![
                OrganConfig {
                    name: "Brain".into(),
                    condition_max: 50.0,
                    regen: 0.0,
                    kind: OrganKind::Vital,
                    death_prefab: None,
                    death_sound: Some("death_groan".into()),
                },
                OrganConfig {
                    name: "Heart".into(),
                    condition_max: 50.0,
                    regen: 0.0,
                    kind: OrganKind::Vital,
                    death_prefab: None,
                    death_sound: Some("death_groan".into()),
                },
            ],
            armor: layout
                .into_iter()
                .map(|(part, surface_area, cell_count)| ArmorPieceConfig {
                    part,
                    surface_area,
                    cell_count,
                    max_thickness: DEFAULT_MAX_THICKNESS,
                    has_cells: true,
                })
                .collect(),
        }
    }
}

impl SimulationConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: SimulationConfig = toml::from_str(content)?;
        config.validate().map_err(SimError::InvalidConfig)?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// The humanoid shipped in `data/humanoid.toml`
    pub fn bundled() -> Result<Self> {
        Self::from_toml_str(HUMANOID_TOML)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> std::result::Result<(), String> {
        self.body.validate()?;
        self.physique.validate()
    }
}

impl BodyConfig {
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.bone_health <= 0.0 {
            return Err(format!("bone_health ({}) must be positive", self.bone_health));
        }

        let mut seen = Vec::with_capacity(self.armor.len());
        for piece in &self.armor {
            if piece.part == BodyPart::None {
                return Err("Armor piece has no body part".into());
            }
            if seen.contains(&piece.part) {
                return Err(format!("Two armor pieces cover {:?}", piece.part));
            }
            seen.push(piece.part);
            if piece.surface_area < 0.0 || piece.max_thickness < 0.0 {
                return Err(format!("Armor for {:?} has negative dimensions", piece.part));
            }
        }

        for organ in &self.organs {
            if organ.condition_max <= 0.0 {
                return Err(format!(
                    "Organ {} condition_max ({}) must be positive",
                    organ.name, organ.condition_max
                ));
            }
        }
        Ok(())
    }
}

impl PhysiqueConfig {
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.interval <= 0.0 {
            return Err(format!("interval ({}) must be positive", self.interval));
        }
        self.params.validate()?;
        if !self.composition.is_valid() {
            return Err("Body composition has negative or non-finite stores".into());
        }
        for required in [Ambulation::Lay, Ambulation::Crawl] {
            if !self.ambulations.iter().any(|a| a.tag == required) {
                return Err(format!("Ambulation table is missing {:?}", required));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_valid() {
        assert!(SimulationConfig::default().validate().is_ok());
    }

    #[test]
    fn test_bundled_matches_default() {
        let bundled = SimulationConfig::bundled().unwrap();
        assert_eq!(bundled, SimulationConfig::default());
    }

    #[test]
    fn test_default_covers_every_part() {
        let config = BodyConfig::default();
        for part in BodyPart::all() {
            assert!(config.armor.iter().any(|p| p.part == part), "{part:?}");
        }
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config = SimulationConfig::from_toml_str(
            r#"
            [body]
            bone_health = 250.0

            [physique]
            interval = 0.5
            "#,
        )
        .unwrap();
        assert_eq!(config.body.bone_health, 250.0);
        assert_eq!(config.body.armor.len(), 15);
        assert_eq!(config.physique.interval, 0.5);
        assert_eq!(config.physique.ambulations.len(), 8);
    }

    #[test]
    fn test_duplicate_piece_rejected() {
        let mut config = SimulationConfig::default();
        let head = config.body.armor[0].clone();
        config.body.armor.push(head);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_crawl_rejected() {
        let result = SimulationConfig::from_toml_str(
            r#"
            [[physique.ambulations]]
            tag = "Lay"
            name = "Lay"
            pose = "Prone"
            is_still = true
            "#,
        );
        assert!(matches!(result, Err(SimError::InvalidConfig(_))));
    }

    #[test]
    fn test_bad_toml_reports_error() {
        let result = SimulationConfig::from_toml_str("[body]\nbone_health = \"lots\"");
        assert!(matches!(result, Err(SimError::TomlError(_))));
    }

    #[test]
    fn test_missing_file() {
        let result = SimulationConfig::load(Path::new("/nonexistent/humanoid.toml"));
        assert!(matches!(result, Err(SimError::IoError(_))));
    }
}
