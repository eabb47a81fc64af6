//! Condition manager: armor, skeleton and organs of one character
//!
//! Owns every damageable component of a humanoid and turns bone breaks and
//! organ deaths into four compound flags: mobility, left arm, right arm and
//! dead. Each flag is a reference-counted boolean over the parts currently
//! contributing to it, so it only clears when the last contributor heals.
//!
//! All damage goes through [`ArmorManager::damage_condition`] so that every
//! break and death is seen here. Flag transitions are published both to the
//! `on_condition_change` signal and to an outbox drained with
//! [`ArmorManager::take_events`].

use std::hash::Hash;

use ahash::AHashSet;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::condition::armor::ArmorComponent;
use crate::condition::body_part::{BodyPart, ComponentCategory, ComponentCondition, LimbCategory};
use crate::condition::component::{fraction, ConditionComponent};
use crate::condition::geometry::CellGeometry;
use crate::condition::inventory::{units_to_volume, volume_to_units, InventoryEntry};
use crate::condition::organ::{Organ, OrganKind};
use crate::condition::skeleton::{BoneBreakChange, Skeleton};
use crate::core::config::BodyConfig;
use crate::core::error::{Result, SimError};
use crate::core::signal::Signal;

/// Addresses one damageable component owned by the manager
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConditionTarget {
    Armor(usize),
    Skeleton,
    Organ(usize),
}

/// A compound flag changed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConditionEvent {
    DeathChanged(bool),
    MobilityChanged(bool),
    LeftArmChanged(bool),
    RightArmChanged(bool),
}

/// Boolean that stays set while any contributor remains
#[derive(Debug, Clone)]
struct CompromiseSet<K> {
    contributors: AHashSet<K>,
}

impl<K: Eq + Hash> CompromiseSet<K> {
    fn new() -> Self {
        Self {
            contributors: AHashSet::new(),
        }
    }

    fn is_set(&self) -> bool {
        !self.contributors.is_empty()
    }

    /// Returns true on the clear -> set edge
    fn insert(&mut self, key: K) -> bool {
        let was_set = self.is_set();
        self.contributors.insert(key);
        !was_set && self.is_set()
    }

    /// Returns true on the set -> clear edge
    fn remove(&mut self, key: &K) -> bool {
        let was_set = self.is_set();
        self.contributors.remove(key);
        was_set && !self.is_set()
    }
}

#[derive(Debug, Clone)]
pub struct ArmorManager {
    armor_entry: InventoryEntry,
    skeleton: Skeleton,
    armor_components: Vec<ArmorComponent>,
    organs: Vec<Organ>,
    armor_max_volume: f32,
    equipped_mass: f32,
    mobility: CompromiseSet<BodyPart>,
    left_arm: CompromiseSet<BodyPart>,
    right_arm: CompromiseSet<BodyPart>,
    dead_organs: CompromiseSet<usize>,
    events: Vec<ConditionEvent>,
    pub on_condition_change: Signal<ConditionEvent>,
}

impl ArmorManager {
    /// Assemble a manager, registering one bone per armor component
    pub fn new(mut skeleton: Skeleton, organs: Vec<Organ>, armor_components: Vec<ArmorComponent>) -> Result<Self> {
        let mut armor_max_volume = 0.0;
        for component in &armor_components {
            if !component.is_humanoid() {
                return Err(SimError::NotHumanoid(component.component_name().to_string()));
            }
            armor_max_volume += component.max_volume();
            skeleton.add_bone(component.body_part())?;
        }
        skeleton.finalize_bones();

        Ok(Self {
            armor_entry: InventoryEntry::none(),
            skeleton,
            armor_components,
            organs,
            armor_max_volume,
            equipped_mass: 0.0,
            mobility: CompromiseSet::new(),
            left_arm: CompromiseSet::new(),
            right_arm: CompromiseSet::new(),
            dead_organs: CompromiseSet::new(),
            events: Vec::new(),
            on_condition_change: Signal::new(),
        })
    }

    pub fn from_config(config: &BodyConfig) -> Result<Self> {
        let organs = config
            .organs
            .iter()
            .map(|organ| {
                let built = match organ.kind {
                    OrganKind::Vital => Organ::new(organ.name.clone(), organ.condition_max),
                    OrganKind::Disappearer => Organ::disappearer(organ.name.clone(), organ.condition_max),
                };
                let mut built = built.with_death_effects(organ.death_prefab.clone(), organ.death_sound.clone());
                built.regen = organ.regen;
                built
            })
            .collect();

        let armor = config
            .armor
            .iter()
            .map(|piece| {
                ArmorComponent::humanoid(
                    piece.part,
                    CellGeometry::new(piece.surface_area, piece.cell_count),
                    piece.max_thickness,
                    piece.has_cells,
                )
            })
            .collect();

        Self::new(Skeleton::new(config.bone_health), organs, armor)
    }

    // === DAMAGE ===

    /// Apply a hit to one component, returns the energy left over
    ///
    /// Unknown targets absorb nothing.
    pub fn damage_condition(
        &mut self,
        target: ConditionTarget,
        energy: f32,
        area: f32,
        targeted_part: BodyPart,
        cell_index: usize,
    ) -> f32 {
        match target {
            ConditionTarget::Armor(index) => match self.armor_components.get_mut(index) {
                Some(component) => component.damage_condition(energy, area, targeted_part, cell_index),
                None => energy.max(0.0),
            },
            ConditionTarget::Skeleton => {
                let hit = self.skeleton.apply_damage(energy, targeted_part);
                if let Some(change) = hit.change {
                    self.record_bone_change(change);
                }
                hit.leftover
            }
            ConditionTarget::Organ(index) => {
                let Some(organ) = self.organs.get_mut(index) else {
                    return energy.max(0.0);
                };
                let hit = organ.apply_damage(energy);
                if let Some(is_dead) = hit.death_change {
                    self.record_organ_change(index, is_dead);
                }
                hit.leftover
            }
        }
    }

    pub fn component(&self, target: ConditionTarget) -> Option<&dyn ConditionComponent> {
        match target {
            ConditionTarget::Armor(index) => self.armor_components.get(index).map(|c| c as &dyn ConditionComponent),
            ConditionTarget::Skeleton => Some(&self.skeleton as &dyn ConditionComponent),
            ConditionTarget::Organ(index) => self.organs.get(index).map(|o| o as &dyn ConditionComponent),
        }
    }

    /// Body part a target is tagged with, `None` for untagged components
    pub fn target_body_part(&self, target: ConditionTarget) -> BodyPart {
        self.component(target)
            .map(|component| component.body_part())
            .unwrap_or(BodyPart::None)
    }

    pub fn armor_target(&self, part: BodyPart) -> Option<ConditionTarget> {
        self.armor_components
            .iter()
            .position(|component| component.body_part() == part)
            .map(ConditionTarget::Armor)
    }

    pub fn organ_target(&self, name: &str) -> Option<ConditionTarget> {
        self.organs
            .iter()
            .position(|organ| organ.component_name() == name)
            .map(ConditionTarget::Organ)
    }

    // === COMPROMISE TRACKING ===

    fn record_bone_change(&mut self, change: BoneBreakChange) {
        let (set, event): (&mut CompromiseSet<BodyPart>, fn(bool) -> ConditionEvent) =
            match change.part.limb_category() {
                LimbCategory::Mobility => (&mut self.mobility, ConditionEvent::MobilityChanged),
                LimbCategory::LeftArm => (&mut self.left_arm, ConditionEvent::LeftArmChanged),
                LimbCategory::RightArm => (&mut self.right_arm, ConditionEvent::RightArmChanged),
                LimbCategory::None => return,
            };
        let flipped = if change.is_broken {
            set.insert(change.part)
        } else {
            set.remove(&change.part)
        };
        if flipped {
            self.publish(event(change.is_broken));
        }
    }

    fn record_organ_change(&mut self, organ: usize, is_dead: bool) {
        let flipped = if is_dead {
            self.dead_organs.insert(organ)
        } else {
            self.dead_organs.remove(&organ)
        };
        if flipped {
            self.publish(ConditionEvent::DeathChanged(is_dead));
        }
    }

    fn publish(&mut self, event: ConditionEvent) {
        debug!("Condition changed: {:?}", event);
        self.on_condition_change.emit(&event);
        self.events.push(event);
    }

    /// Drain the flag transitions recorded since the last call
    pub fn take_events(&mut self) -> Vec<ConditionEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn is_mobility_compromised(&self) -> bool {
        self.mobility.is_set()
    }

    pub fn is_left_arm_compromised(&self) -> bool {
        self.left_arm.is_set()
    }

    pub fn is_right_arm_compromised(&self) -> bool {
        self.right_arm.is_set()
    }

    pub fn is_dead(&self) -> bool {
        self.dead_organs.is_set()
    }

    // === ARMOR EQUIPMENT ===

    /// Equip armor from an inventory stack, returns what could not be applied
    ///
    /// Only one armor can be worn at a time: while anything is equipped the
    /// entry comes back untouched, as it does for non-armor items.
    // TODO: top up the worn armor when the entry is the same item
    pub fn install_armor(&mut self, entry: InventoryEntry) -> InventoryEntry {
        if !self.armor_entry.is_none() {
            if self.armor_entry.inventory_id == entry.inventory_id {
                info!("{} already equipped", entry.activator_name);
            } else {
                info!(
                    "Cannot equip {}: {} already equipped",
                    entry.activator_name, self.armor_entry.activator_name
                );
            }
            return entry;
        }
        let Some(armor) = entry.armor().cloned() else {
            return entry;
        };

        let volume_applied = self.armor_max_volume.min(units_to_volume(entry.count));
        let applied_units = volume_to_units(volume_applied).min(entry.count);
        if applied_units == 0 {
            return entry;
        }

        for component in self.armor_components.iter_mut() {
            let share = fraction(component.max_volume(), self.armor_max_volume);
            component.distribute_armor(&armor, volume_applied * share);
        }

        self.armor_entry = entry.with_count(applied_units);
        self.equipped_mass = applied_units as f32 * armor.mass;
        info!("Equipped {} units of {}", applied_units, armor.name);

        entry.with_count(entry.count - applied_units)
    }

    /// Strip the worn armor, returns the recovered stack
    pub fn uninstall_armor(&mut self) -> InventoryEntry {
        if self.armor_entry.is_none() {
            return InventoryEntry::none();
        }
        let volume: f32 = self
            .armor_components
            .iter_mut()
            .map(ArmorComponent::recover_armor)
            .sum();
        let removed = self.armor_entry.with_count(volume_to_units(volume));
        info!("Unequipped {} units of {}", removed.count, removed.activator_name);

        self.armor_entry = InventoryEntry::none();
        self.equipped_mass = 0.0;
        removed
    }

    pub fn equipped_armor(&self) -> &InventoryEntry {
        &self.armor_entry
    }

    /// kg of armor currently worn
    pub fn equipped_mass(&self) -> f32 {
        self.equipped_mass
    }

    /// Combined capacity of every armor component, in m³
    pub fn armor_max_volume(&self) -> f32 {
        self.armor_max_volume
    }

    // === QUERIES ===

    /// (name, condition fraction) for every component in a category
    pub fn component_category(
        &self,
        category: ComponentCategory,
    ) -> Box<dyn Iterator<Item = ComponentCondition> + '_> {
        match category {
            ComponentCategory::Armor => Box::new(
                self.armor_components
                    .iter()
                    .map(|c| ComponentCondition::new(c.component_name(), c.condition_fraction())),
            ),
            ComponentCategory::Bone => Box::new(
                self.skeleton
                    .bones()
                    .map(|(_, bone)| ComponentCondition::new(bone.name.clone(), bone.condition_fraction())),
            ),
            ComponentCategory::Organ => Box::new(
                self.organs
                    .iter()
                    .map(|o| ComponentCondition::new(o.component_name(), o.condition_fraction())),
            ),
        }
    }

    pub fn skeleton(&self) -> &Skeleton {
        &self.skeleton
    }

    pub fn organs(&self) -> &[Organ] {
        &self.organs
    }

    pub fn armor_components(&self) -> &[ArmorComponent] {
        &self.armor_components
    }

    // === HEALING ===

    /// Repair all bones and organs
    pub fn heal(&mut self) {
        self.heal_organs();
        self.heal_bones();
    }

    pub fn heal_organs(&mut self) {
        for index in 0..self.organs.len() {
            if let Some(is_dead) = self.organs[index].heal() {
                self.record_organ_change(index, is_dead);
            }
        }
    }

    pub fn heal_bones(&mut self) {
        for change in self.skeleton.heal() {
            self.record_bone_change(change);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::condition::inventory::{ArmorItem, InventoryItem};

    fn legs_and_heart() -> ArmorManager {
        let armor = [BodyPart::LeftThigh, BodyPart::RightThigh, BodyPart::LeftHand]
            .into_iter()
            .map(|part| ArmorComponent::humanoid(part, CellGeometry::new(0.1, 2), 0.01, true))
            .collect();
        ArmorManager::new(Skeleton::new(100.0), vec![Organ::new("Heart", 50.0)], armor).unwrap()
    }

    fn weave_entry(count: u32) -> InventoryEntry {
        InventoryEntry::new(
            "Nanite Weave",
            7,
            InventoryItem::Armor(ArmorItem {
                name: "Nanite Weave".into(),
                rating: 1.0,
                regen: 0.0,
                density: 7.8,
                dynamic: false,
                mass: 0.01,
            }),
            count,
        )
    }

    #[test]
    fn test_bones_registered_per_component() {
        let manager = legs_and_heart();
        assert_eq!(manager.skeleton().len(), 3);
        assert!(manager.skeleton().is_finalized());
        assert!((manager.armor_max_volume() - 0.003).abs() < 1e-7);
    }

    #[test]
    fn test_independent_component_rejected() {
        let door = ArmorComponent::independent("Door", CellGeometry::new(1.0, 1), 0.01, false, 1.0, false);
        let result = ArmorManager::new(Skeleton::new(100.0), Vec::new(), vec![door]);
        assert!(matches!(result, Err(SimError::NotHumanoid(_))));
    }

    #[test]
    fn test_mobility_reference_counted() {
        let mut manager = legs_and_heart();
        manager.damage_condition(ConditionTarget::Skeleton, 150.0, 0.01, BodyPart::LeftThigh, 0);
        manager.damage_condition(ConditionTarget::Skeleton, 150.0, 0.01, BodyPart::RightThigh, 0);
        assert!(manager.is_mobility_compromised());
        assert_eq!(manager.take_events(), vec![ConditionEvent::MobilityChanged(true)]);

        manager.heal_bones();
        assert!(!manager.is_mobility_compromised());
        assert_eq!(manager.take_events(), vec![ConditionEvent::MobilityChanged(false)]);
    }

    #[test]
    fn test_compromise_clears_on_last_contributor() {
        let mut set = CompromiseSet::new();
        assert!(set.insert(BodyPart::LeftThigh));
        assert!(!set.insert(BodyPart::RightThigh));
        assert!(!set.insert(BodyPart::RightThigh));

        assert!(!set.remove(&BodyPart::LeftThigh));
        assert!(set.is_set());
        assert!(set.remove(&BodyPart::RightThigh));
        assert!(!set.is_set());
        assert!(!set.remove(&BodyPart::RightThigh));
    }

    #[test]
    fn test_arm_flag() {
        let mut manager = legs_and_heart();
        manager.damage_condition(ConditionTarget::Skeleton, 100.0, 0.01, BodyPart::LeftHand, 0);
        assert!(manager.is_left_arm_compromised());
        assert!(!manager.is_right_arm_compromised());
        assert!(!manager.is_mobility_compromised());
    }

    #[test]
    fn test_organ_death_and_heal() {
        let mut manager = legs_and_heart();
        let heart = manager.organ_target("Heart").unwrap();
        let leftover = manager.damage_condition(heart, 80.0, 0.01, BodyPart::None, 0);
        assert_eq!(leftover, 30.0);
        assert!(manager.is_dead());

        manager.heal();
        assert!(!manager.is_dead());
        assert_eq!(
            manager.take_events(),
            vec![ConditionEvent::DeathChanged(true), ConditionEvent::DeathChanged(false)]
        );
    }

    #[test]
    fn test_unknown_target_passes_through() {
        let mut manager = legs_and_heart();
        assert_eq!(
            manager.damage_condition(ConditionTarget::Organ(9), 10.0, 0.01, BodyPart::None, 0),
            10.0
        );
        assert_eq!(
            manager.damage_condition(ConditionTarget::Armor(9), 10.0, 0.01, BodyPart::None, 0),
            10.0
        );
    }

    #[test]
    fn test_install_splits_leftover() {
        let mut manager = legs_and_heart();
        // capacity is 3000 units
        let leftover = manager.install_armor(weave_entry(5000));
        assert_eq!(leftover.count, 2000);
        assert_eq!(manager.equipped_armor().count, 3000);
        assert!((manager.equipped_mass() - 30.0).abs() < 1e-3);
        for component in manager.armor_components() {
            assert!((component.condition_fraction() - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_install_rejected_while_equipped() {
        let mut manager = legs_and_heart();
        manager.install_armor(weave_entry(1500));
        let second = weave_entry(800);
        assert_eq!(manager.install_armor(second.clone()), second);
        assert_eq!(manager.equipped_armor().count, 1500);
    }

    #[test]
    fn test_non_armor_returned_unchanged() {
        let mut manager = legs_and_heart();
        let entry = InventoryEntry::new("Rock", 3, InventoryItem::Other { name: "Rock".into() }, 4);
        assert_eq!(manager.install_armor(entry.clone()), entry);
        assert!(manager.equipped_armor().is_none());
    }

    #[test]
    fn test_uninstall_recovers_units() {
        let mut manager = legs_and_heart();
        manager.install_armor(weave_entry(1500));
        let removed = manager.uninstall_armor();
        assert_eq!(removed.count, 1500);
        assert_eq!(removed.inventory_id, Some(7));
        assert!(manager.equipped_armor().is_none());
        assert_eq!(manager.equipped_mass(), 0.0);
        assert!(manager.uninstall_armor().is_none());
    }

    #[test]
    fn test_component_category_lists() {
        let manager = legs_and_heart();
        let bones: Vec<_> = manager.component_category(ComponentCategory::Bone).collect();
        assert_eq!(bones.len(), 3);
        assert_eq!(bones[0].name, "Left Metacarpals");
        let organs: Vec<_> = manager.component_category(ComponentCategory::Organ).collect();
        assert_eq!(organs, vec![ComponentCondition::new("Heart", 1.0)]);
        let armor: Vec<_> = manager.component_category(ComponentCategory::Armor).collect();
        assert_eq!(armor[0].name, "Left Thigh Guard");
        assert_eq!(armor[0].condition_fraction, 0.0);
    }
}
