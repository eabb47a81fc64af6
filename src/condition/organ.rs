//! Organs: depletable health pools that decide whether a character lives
//!
//! Vital organs report death and revival. Disappearers are targets that
//! simply switch their owner off when destroyed.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::condition::body_part::BodyPart;
use crate::condition::component::{fraction, ConditionComponent};
use crate::core::signal::Signal;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrganKind {
    #[default]
    Vital,
    Disappearer,
}

/// Everything an organ tells the outside world
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrganEvent {
    DeathChanged { organ: String, is_dead: bool },
    SpawnPrefab(String),
    PlaySound(String),
    /// The owning entity should be switched off
    Deactivated,
}

/// Result of a single organ hit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrganHit {
    pub leftover: f32,
    /// `Some(true)` when this hit killed a vital organ
    pub death_change: Option<bool>,
}

#[derive(Debug, Clone)]
pub struct Organ {
    name: String,
    kind: OrganKind,
    condition_max: f32,
    /// Not simulated
    pub regen: f32,
    condition: f32,
    pub death_prefab: Option<String>,
    pub death_sound: Option<String>,
    active: bool,
    pub on_event: Signal<OrganEvent>,
}

impl Organ {
    pub fn new(name: impl Into<String>, condition_max: f32) -> Self {
        let condition_max = condition_max.max(0.0);
        Self {
            name: name.into(),
            kind: OrganKind::Vital,
            condition_max,
            regen: 0.0,
            condition: condition_max,
            death_prefab: None,
            death_sound: None,
            active: true,
            on_event: Signal::new(),
        }
    }

    pub fn disappearer(name: impl Into<String>, condition_max: f32) -> Self {
        Self {
            kind: OrganKind::Disappearer,
            ..Self::new(name, condition_max)
        }
    }

    pub fn with_death_effects(mut self, prefab: Option<String>, sound: Option<String>) -> Self {
        self.death_prefab = prefab;
        self.death_sound = sound;
        self
    }

    pub fn is_dead(&self) -> bool {
        self.condition <= 0.0
    }

    /// False once a disappearer has been destroyed
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn kind(&self) -> OrganKind {
        self.kind
    }

    pub fn condition(&self) -> f32 {
        self.condition
    }

    pub fn condition_max(&self) -> f32 {
        self.condition_max
    }

    pub fn apply_damage(&mut self, energy: f32) -> OrganHit {
        let energy = energy.max(0.0);
        if self.is_dead() {
            // a destroyed organ no longer stops anything
            return OrganHit {
                leftover: energy,
                death_change: None,
            };
        }

        let damage = energy.min(self.condition);
        self.condition -= damage;

        let mut death_change = None;
        if self.is_dead() {
            self.on_death();
            if self.kind == OrganKind::Vital {
                death_change = Some(true);
            }
        }

        OrganHit {
            leftover: energy - damage,
            death_change,
        }
    }

    fn on_death(&mut self) {
        info!("{} destroyed", self.name);
        if let Some(prefab) = self.death_prefab.clone() {
            self.on_event.emit(&OrganEvent::SpawnPrefab(prefab));
        }
        if let Some(sound) = self.death_sound.clone() {
            self.on_event.emit(&OrganEvent::PlaySound(sound));
        }
        match self.kind {
            OrganKind::Vital => self.on_event.emit(&OrganEvent::DeathChanged {
                organ: self.name.clone(),
                is_dead: true,
            }),
            OrganKind::Disappearer => {
                self.active = false;
                self.on_event.emit(&OrganEvent::Deactivated);
            }
        }
    }

    /// Restore to full, returns `Some(false)` if a dead vital organ revived
    pub fn heal(&mut self) -> Option<bool> {
        let was_dead = self.is_dead();
        self.condition = self.condition_max;
        self.active = true;
        if !was_dead || self.kind == OrganKind::Disappearer {
            return None;
        }
        self.on_event.emit(&OrganEvent::DeathChanged {
            organ: self.name.clone(),
            is_dead: false,
        });
        Some(false)
    }
}

impl ConditionComponent for Organ {
    fn component_name(&self) -> &str {
        &self.name
    }

    fn damage_condition(&mut self, energy: f32, _area: f32, _targeted_part: BodyPart, _cell_index: usize) -> f32 {
        self.apply_damage(energy).leftover
    }

    fn condition_fraction(&self) -> f32 {
        fraction(self.condition, self.condition_max).clamp(0.0, 1.0)
    }

    fn cell_condition_fraction(&self, _cell_index: usize) -> f32 {
        self.condition_fraction()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn recording(organ: &mut Organ) -> Arc<Mutex<Vec<OrganEvent>>> {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let log = Arc::clone(&seen);
        organ.on_event.subscribe(move |event| log.lock().unwrap().push(event.clone()));
        seen
    }

    #[test]
    fn test_overkill_returns_leftover() {
        let mut heart = Organ::new("Heart", 100.0);
        let seen = recording(&mut heart);

        let hit = heart.apply_damage(150.0);
        assert_eq!(hit.leftover, 50.0);
        assert_eq!(hit.death_change, Some(true));
        assert!(heart.is_dead());
        assert_eq!(
            *seen.lock().unwrap(),
            vec![OrganEvent::DeathChanged {
                organ: "Heart".into(),
                is_dead: true
            }]
        );
    }

    #[test]
    fn test_dead_organ_absorbs_nothing() {
        let mut heart = Organ::new("Heart", 100.0);
        heart.apply_damage(100.0);
        let hit = heart.apply_damage(40.0);
        assert_eq!(hit.leftover, 40.0);
        assert_eq!(hit.death_change, None);
    }

    #[test]
    fn test_heal_revives_once() {
        let mut brain = Organ::new("Brain", 50.0);
        brain.apply_damage(60.0);
        assert_eq!(brain.heal(), Some(false));
        assert_eq!(brain.heal(), None);
        assert_eq!(brain.condition_fraction(), 1.0);
    }

    #[test]
    fn test_death_effects_emitted() {
        let mut heart = Organ::new("Heart", 10.0)
            .with_death_effects(Some("BloodSplatter".into()), Some("Flatline".into()));
        let seen = recording(&mut heart);
        heart.apply_damage(10.0);
        let seen = seen.lock().unwrap();
        assert_eq!(seen[0], OrganEvent::SpawnPrefab("BloodSplatter".into()));
        assert_eq!(seen[1], OrganEvent::PlaySound("Flatline".into()));
        assert_eq!(seen.len(), 3);
    }

    #[test]
    fn test_disappearer_deactivates_without_death_change() {
        let mut target = Organ::disappearer("Target Core", 20.0);
        let seen = recording(&mut target);
        let hit = target.apply_damage(25.0);
        assert_eq!(hit.leftover, 5.0);
        assert_eq!(hit.death_change, None);
        assert!(!target.is_active());
        assert_eq!(*seen.lock().unwrap(), vec![OrganEvent::Deactivated]);

        assert_eq!(target.heal(), None);
        assert!(target.is_active());
    }

    #[test]
    fn test_zero_energy_changes_nothing() {
        let mut heart = Organ::new("Heart", 100.0);
        assert_eq!(heart.damage_condition(0.0, 0.01, BodyPart::None, 0), 0.0);
        assert_eq!(heart.condition(), 100.0);
    }

    #[test]
    fn test_zero_capacity_fraction() {
        let organ = Organ::new("Vestigial", 0.0);
        assert_eq!(organ.condition_fraction(), 0.0);
    }
}
