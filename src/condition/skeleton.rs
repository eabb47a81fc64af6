//! Skeleton: one damage pool per body part
//!
//! Bones are not cellular. A hit tagged with a body part damages that part's
//! bone; a hit with no matching bone passes straight through.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::condition::body_part::{BodyPart, ComponentCondition};
use crate::condition::component::{fraction, ConditionComponent};
use crate::core::error::{Result, SimError};
use crate::core::signal::Signal;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bone {
    pub name: String,
    pub max_condition: f32,
    condition: f32,
}

impl Bone {
    pub fn new(name: impl Into<String>, max_condition: f32) -> Self {
        let max_condition = max_condition.max(0.0);
        Self {
            name: name.into(),
            max_condition,
            condition: max_condition,
        }
    }

    pub fn condition(&self) -> f32 {
        self.condition
    }

    /// Clamped to [0, max_condition]
    pub fn set_condition(&mut self, condition: f32) {
        self.condition = condition.clamp(0.0, self.max_condition);
    }

    pub fn is_broken(&self) -> bool {
        self.condition <= 0.0
    }

    pub fn condition_fraction(&self) -> f32 {
        fraction(self.condition, self.max_condition)
    }
}

/// A bone changed between intact and broken
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoneBreakChange {
    pub part: BodyPart,
    pub is_broken: bool,
}

/// Result of a single skeleton hit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkeletonHit {
    pub leftover: f32,
    pub change: Option<BoneBreakChange>,
}

#[derive(Debug, Clone, Default)]
pub struct Skeleton {
    bone_health: f32,
    bones: BTreeMap<BodyPart, Bone>,
    finalized: bool,
    pub on_bone_break_change: Signal<BoneBreakChange>,
}

impl Skeleton {
    /// `bone_health` is the max condition given to every registered bone
    pub fn new(bone_health: f32) -> Self {
        Self {
            bone_health,
            ..Default::default()
        }
    }

    /// Register a bone for `part`, named after the part
    pub fn add_bone(&mut self, part: BodyPart) -> Result<()> {
        if self.finalized {
            return Err(SimError::SkeletonFinalized);
        }
        if self.bones.contains_key(&part) {
            return Err(SimError::DuplicateBone(part));
        }
        self.bones.insert(part, Bone::new(part.bone_name(), self.bone_health));
        Ok(())
    }

    /// Lock the bone set
    pub fn finalize_bones(&mut self) {
        self.finalized = true;
    }

    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    /// Damage the bone for `part`, reporting a break if one happened
    pub fn apply_damage(&mut self, energy: f32, part: BodyPart) -> SkeletonHit {
        let energy = energy.max(0.0);
        let Some(bone) = self.bones.get_mut(&part) else {
            debug!("Hit skeleton with unregistered part {:?}", part);
            return SkeletonHit {
                leftover: energy,
                change: None,
            };
        };

        debug!("{} hit!", bone.name);
        let damage = energy.min(bone.condition());
        let already_broken = bone.is_broken();
        bone.set_condition(bone.condition() - damage);

        let change = (bone.is_broken() && !already_broken).then_some(BoneBreakChange {
            part,
            is_broken: true,
        });
        if let Some(change) = &change {
            self.on_bone_break_change.emit(change);
        }

        SkeletonHit {
            leftover: energy - damage,
            change,
        }
    }

    /// Restore every bone, reporting each one that was broken
    pub fn heal(&mut self) -> Vec<BoneBreakChange> {
        let mut changes = Vec::new();
        for (part, bone) in self.bones.iter_mut() {
            let was_broken = bone.is_broken();
            bone.set_condition(bone.max_condition);
            if was_broken {
                changes.push(BoneBreakChange {
                    part: *part,
                    is_broken: false,
                });
            }
        }
        for change in &changes {
            self.on_bone_break_change.emit(change);
        }
        changes
    }

    /// Unregistered parts are never broken
    pub fn is_broken(&self, part: BodyPart) -> bool {
        self.bones.get(&part).is_some_and(Bone::is_broken)
    }

    pub fn bone(&self, part: BodyPart) -> Option<&Bone> {
        self.bones.get(&part)
    }

    /// Bones ordered by body part
    pub fn bones(&self) -> impl Iterator<Item = (BodyPart, &Bone)> {
        self.bones.iter().map(|(part, bone)| (*part, bone))
    }

    /// (name, condition fraction) for every bone, for UI display
    pub fn bone_list(&self) -> Vec<ComponentCondition> {
        self.bones
            .values()
            .map(|bone| ComponentCondition::new(bone.name.clone(), bone.condition_fraction()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.bones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bones.is_empty()
    }

    pub fn bone_health(&self) -> f32 {
        self.bone_health
    }
}

impl ConditionComponent for Skeleton {
    fn component_name(&self) -> &str {
        "Skeleton"
    }

    fn damage_condition(&mut self, energy: f32, _area: f32, targeted_part: BodyPart, _cell_index: usize) -> f32 {
        self.apply_damage(energy, targeted_part).leftover
    }

    /// Combined condition of all bones
    fn condition_fraction(&self) -> f32 {
        let (condition, max) = self
            .bones
            .values()
            .fold((0.0, 0.0), |(c, m), bone| (c + bone.condition(), m + bone.max_condition));
        fraction(condition, max)
    }

    fn cell_condition_fraction(&self, _cell_index: usize) -> f32 {
        self.condition_fraction()
    }
}
