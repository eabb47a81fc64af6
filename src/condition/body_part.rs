//! Humanoid body parts (15 parts + None)
//!
//! Body parts tag armor components and bones. Each part maps to a bone name,
//! an armor piece name and a limb category used for compromise tracking.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum BodyPart {
    Head,
    UpperTorso,
    LowerTorso,
    LeftUpperArm,
    RightUpperArm,
    LeftLowerArm,
    RightLowerArm,
    LeftHand,
    RightHand,
    LeftThigh,
    RightThigh,
    LeftCalf,
    RightCalf,
    LeftFoot,
    RightFoot,
    /// Untagged hit, nothing on the skeleton answers to it
    None,
}

/// Which compromise state a broken bone feeds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LimbCategory {
    Mobility,
    LeftArm,
    RightArm,
    None,
}

/// Component groups exposed to the health UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComponentCategory {
    Armor,
    Bone,
    Organ,
}

/// A (name, condition fraction) pair for UI lists
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentCondition {
    pub name: String,
    pub condition_fraction: f32,
}

impl ComponentCondition {
    pub fn new(name: impl Into<String>, condition_fraction: f32) -> Self {
        Self {
            name: name.into(),
            condition_fraction,
        }
    }
}

impl BodyPart {
    /// The 15 real parts, excluding `None`
    pub fn all() -> [BodyPart; 15] {
        [
            BodyPart::Head,
            BodyPart::UpperTorso,
            BodyPart::LowerTorso,
            BodyPart::LeftUpperArm,
            BodyPart::RightUpperArm,
            BodyPart::LeftLowerArm,
            BodyPart::RightLowerArm,
            BodyPart::LeftHand,
            BodyPart::RightHand,
            BodyPart::LeftThigh,
            BodyPart::RightThigh,
            BodyPart::LeftCalf,
            BodyPart::RightCalf,
            BodyPart::LeftFoot,
            BodyPart::RightFoot,
        ]
    }

    pub fn bone_name(&self) -> &'static str {
        match self {
            BodyPart::Head => "Skull",
            BodyPart::UpperTorso => "Ribcage",
            BodyPart::LowerTorso => "Pelvic Bone",
            BodyPart::LeftUpperArm => "Left Humerus",
            BodyPart::RightUpperArm => "Right Humerus",
            BodyPart::LeftLowerArm => "Left Ulna",
            BodyPart::RightLowerArm => "Right Ulna",
            BodyPart::LeftHand => "Left Metacarpals",
            BodyPart::RightHand => "Right Metacarpals",
            BodyPart::LeftThigh => "Left Femur",
            BodyPart::RightThigh => "Right Femur",
            BodyPart::LeftCalf => "Left Tibia",
            BodyPart::RightCalf => "Right Tibia",
            BodyPart::LeftFoot => "Left Metatarsals",
            BodyPart::RightFoot => "Right Metatarsals",
            BodyPart::None => "Bone",
        }
    }

    pub fn armor_component_name(&self) -> &'static str {
        match self {
            BodyPart::Head => "Helmet",
            BodyPart::UpperTorso => "Breastplate",
            BodyPart::LowerTorso => "Pelvis Guard",
            BodyPart::LeftUpperArm => "Left Arm Guard",
            BodyPart::RightUpperArm => "Right Arm Guard",
            BodyPart::LeftLowerArm => "Left Forearm Guard",
            BodyPart::RightLowerArm => "Right Forearm Guard",
            BodyPart::LeftHand => "Left Glove",
            BodyPart::RightHand => "Right Glove",
            BodyPart::LeftThigh => "Left Thigh Guard",
            BodyPart::RightThigh => "Right Thigh Guard",
            BodyPart::LeftCalf => "Left Shin Guard",
            BodyPart::RightCalf => "Right Shin Guard",
            BodyPart::LeftFoot => "Left Boot",
            BodyPart::RightFoot => "Right Boot",
            BodyPart::None => "Armor",
        }
    }

    /// Legs and pelvis carry the body; arms and hands hold things
    pub fn limb_category(&self) -> LimbCategory {
        match self {
            BodyPart::LowerTorso
            | BodyPart::LeftThigh
            | BodyPart::RightThigh
            | BodyPart::LeftCalf
            | BodyPart::RightCalf
            | BodyPart::LeftFoot
            | BodyPart::RightFoot => LimbCategory::Mobility,
            BodyPart::LeftUpperArm | BodyPart::LeftLowerArm | BodyPart::LeftHand => {
                LimbCategory::LeftArm
            }
            BodyPart::RightUpperArm | BodyPart::RightLowerArm | BodyPart::RightHand => {
                LimbCategory::RightArm
            }
            BodyPart::Head | BodyPart::UpperTorso | BodyPart::None => LimbCategory::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_excludes_none() {
        assert_eq!(BodyPart::all().len(), 15);
        assert!(!BodyPart::all().contains(&BodyPart::None));
    }

    #[test]
    fn test_limb_categories() {
        assert_eq!(BodyPart::LowerTorso.limb_category(), LimbCategory::Mobility);
        assert_eq!(BodyPart::RightFoot.limb_category(), LimbCategory::Mobility);
        assert_eq!(BodyPart::LeftHand.limb_category(), LimbCategory::LeftArm);
        assert_eq!(BodyPart::RightUpperArm.limb_category(), LimbCategory::RightArm);
        assert_eq!(BodyPart::Head.limb_category(), LimbCategory::None);
        assert_eq!(BodyPart::UpperTorso.limb_category(), LimbCategory::None);
    }

    #[test]
    fn test_names() {
        assert_eq!(BodyPart::Head.bone_name(), "Skull");
        assert_eq!(BodyPart::LeftCalf.bone_name(), "Left Tibia");
        assert_eq!(BodyPart::UpperTorso.armor_component_name(), "Breastplate");
        assert_eq!(BodyPart::None.armor_component_name(), "Armor");
    }
}
