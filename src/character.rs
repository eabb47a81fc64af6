//! A character: body condition and physique side by side
//!
//! The manager and the physique never reference each other. Every operation
//! that can break or heal a bone drains the manager's transitions and feeds
//! mobility into the physique before returning.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::condition::body_part::{BodyPart, ComponentCategory, ComponentCondition};
use crate::condition::impact::{resolve_impacts, Impact, ImpactResult};
use crate::condition::inventory::InventoryEntry;
use crate::condition::manager::{ArmorManager, ConditionEvent, ConditionTarget};
use crate::core::config::SimulationConfig;
use crate::core::error::Result;
use crate::physique::ambulation::Ambulation;
use crate::physique::ingestible::Ingestible;
use crate::physique::physique::{Physique, PhysiqueSnapshot};

pub struct Character {
    pub name: String,
    pub manager: ArmorManager,
    pub physique: Physique,
    /// Condition transitions seen since the last `take_events`
    events: Vec<ConditionEvent>,
}

impl Character {
    pub fn new(name: impl Into<String>, manager: ArmorManager, physique: Physique) -> Self {
        let mut character = Self {
            name: name.into(),
            manager,
            physique,
            events: Vec::new(),
        };
        character.physique.set_mobility_compromised(character.manager.is_mobility_compromised());
        character
    }

    pub fn from_config(name: impl Into<String>, config: &SimulationConfig) -> Result<Self> {
        let manager = ArmorManager::from_config(&config.body)?;
        let physique_config = &config.physique;
        let mut physique = Physique::new(
            physique_config.params,
            physique_config.composition,
            physique_config.ambulations.clone(),
            physique_config.interval,
        )?;
        physique.set_metabolism_active(physique_config.metabolism_active);
        physique.try_to_set_ambulation(Ambulation::Stand);
        Ok(Self::new(name, manager, physique))
    }

    /// Default humanoid, standing
    pub fn humanoid(name: impl Into<String>) -> Result<Self> {
        Self::from_config(name, &SimulationConfig::default())
    }

    // === CONDITION ===

    pub fn damage(
        &mut self,
        target: ConditionTarget,
        energy: f32,
        area: f32,
        targeted_part: BodyPart,
        cell_index: usize,
    ) -> f32 {
        let leftover = self
            .manager
            .damage_condition(target, energy, area, targeted_part, cell_index);
        self.sync();
        leftover
    }

    pub fn resolve_impacts(
        &mut self,
        energy: f32,
        area: f32,
        targeted_part: BodyPart,
        impacts: &[Impact],
    ) -> ImpactResult {
        let result = resolve_impacts(&mut self.manager, energy, area, targeted_part, impacts);
        self.sync();
        result
    }

    pub fn heal(&mut self) {
        self.manager.heal();
        self.sync();
    }

    pub fn heal_bones(&mut self) {
        self.manager.heal_bones();
        self.sync();
    }

    pub fn equip(&mut self, entry: InventoryEntry) -> InventoryEntry {
        self.manager.install_armor(entry)
    }

    pub fn unequip(&mut self) -> InventoryEntry {
        self.manager.uninstall_armor()
    }

    fn sync(&mut self) {
        for event in self.manager.take_events() {
            match event {
                ConditionEvent::MobilityChanged(compromised) => {
                    self.physique.set_mobility_compromised(compromised);
                }
                ConditionEvent::DeathChanged(true) => {
                    info!("{} died", self.name);
                }
                _ => {}
            }
            self.events.push(event);
        }
    }

    pub fn take_events(&mut self) -> Vec<ConditionEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn is_dead(&self) -> bool {
        self.manager.is_dead()
    }

    // === PHYSIQUE ===

    pub fn consume(&mut self, ingestible: &Ingestible) -> bool {
        self.physique.consume(ingestible)
    }

    pub fn try_to_set_ambulation(&mut self, ambulation: Ambulation) -> bool {
        self.physique.try_to_set_ambulation(ambulation)
    }

    pub fn advance(&mut self, dt: f64) -> u32 {
        self.physique.advance(dt)
    }

    pub fn report(&self) -> CharacterReport {
        let collect = |category| self.manager.component_category(category).collect::<Vec<_>>();
        CharacterReport {
            name: self.name.clone(),
            dead: self.manager.is_dead(),
            mobility_compromised: self.manager.is_mobility_compromised(),
            left_arm_compromised: self.manager.is_left_arm_compromised(),
            right_arm_compromised: self.manager.is_right_arm_compromised(),
            equipped_armor: self.manager.equipped_armor().activator_name.clone(),
            equipped_mass: self.manager.equipped_mass(),
            armor: collect(ComponentCategory::Armor),
            bones: collect(ComponentCategory::Bone),
            organs: collect(ComponentCategory::Organ),
            physique: self.physique.snapshot(),
        }
    }
}

impl std::fmt::Debug for Character {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Character")
            .field("name", &self.name)
            .field("dead", &self.is_dead())
            .field("physique", &self.physique)
            .finish()
    }
}

/// Serializable state of one character
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterReport {
    pub name: String,
    pub dead: bool,
    pub mobility_compromised: bool,
    pub left_arm_compromised: bool,
    pub right_arm_compromised: bool,
    pub equipped_armor: String,
    pub equipped_mass: f32,
    pub armor: Vec<ComponentCondition>,
    pub bones: Vec<ComponentCondition>,
    pub organs: Vec<ComponentCondition>,
    pub physique: PhysiqueSnapshot,
}

/// Independent characters advanced together
pub struct Population {
    characters: Vec<Character>,
    /// Minimum population before ticking in parallel
    ///
    /// Below this, thread overhead exceeds the work per character.
    pub parallel_threshold: usize,
}

impl Default for Population {
    fn default() -> Self {
        Self {
            characters: Vec::new(),
            parallel_threshold: 64,
        }
    }
}

impl Population {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, character: Character) {
        self.characters.push(character);
    }

    pub fn len(&self) -> usize {
        self.characters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }

    pub fn characters(&self) -> &[Character] {
        &self.characters
    }

    pub fn characters_mut(&mut self) -> &mut [Character] {
        &mut self.characters
    }

    /// Advance every living character by `dt`; returns total ticks run
    pub fn advance(&mut self, dt: f64) -> u64 {
        if self.characters.len() >= self.parallel_threshold {
            // PARALLEL: characters share no state
            self.characters
                .par_iter_mut()
                .filter(|c| !c.is_dead())
                .map(|c| c.advance(dt) as u64)
                .sum()
        } else {
            self.characters
                .iter_mut()
                .filter(|c| !c.is_dead())
                .map(|c| c.advance(dt) as u64)
                .sum()
        }
    }

    pub fn alive_count(&self) -> usize {
        self.characters.iter().filter(|c| !c.is_dead()).count()
    }
}
