//! Metabolic simulation of one character
//!
//! Each tick runs, in order: digestion, glycogen distribution (with
//! gluconeogenesis), basal metabolism, the current ambulation's cost, then
//! any queued actions. Pool arithmetic clamps; the tick never fails.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::clock::TickClock;
use crate::core::error::{Result, SimError};
use crate::core::signal::Signal;
use crate::physique::action::{ActionData, MuscleParams, PowerSplit};
use crate::physique::ambulation::{Ambulation, AmbulationData};
use crate::physique::constants::*;
use crate::physique::ingestible::Ingestible;
use crate::physique::params::MetabolicParams;
use crate::physique::pools::{clamped_add, drain, transfer, MetabolicPools};

pub const DEFAULT_INTERVAL: f64 = 0.2;

/// State published after every tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhysiqueSnapshot {
    pub pools: MetabolicPools,
    pub ambulation: Ambulation,
    pub mobility_compromised: bool,
    /// kCal/s over the last tick
    pub calorie_rate: f64,
    /// m/s
    pub speed: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PhysiqueEvent {
    AmbulationChanged(AmbulationData),
    Updated(Box<PhysiqueSnapshot>),
}

pub struct Physique {
    params: MetabolicParams,
    pub pools: MetabolicPools,

    ambulations: Vec<AmbulationData>,
    ambulation_index: Option<usize>,
    ambulation_actions: BTreeMap<Ambulation, ActionData>,
    muscle: MuscleParams,
    actions: Vec<ActionData>,

    mobility_compromised: bool,
    metabolism_active: bool,
    clock: TickClock,

    calories_consumed: f64,
    calorie_rate: f64,
    ticks: u64,

    pub on_event: Signal<PhysiqueEvent>,
}

impl Default for Physique {
    fn default() -> Self {
        Self::build(
            MetabolicParams::default(),
            MetabolicPools::default(),
            AmbulationData::default_table(),
            DEFAULT_INTERVAL,
        )
    }
}

impl Physique {
    /// Table must contain Lay and Crawl, the compromised-mobility fallbacks
    pub fn new(
        params: MetabolicParams,
        pools: MetabolicPools,
        ambulations: Vec<AmbulationData>,
        interval: f64,
    ) -> Result<Self> {
        params.validate().map_err(SimError::InvalidConfig)?;
        if interval <= 0.0 {
            return Err(SimError::InvalidConfig(format!(
                "Physique interval ({interval}) must be positive"
            )));
        }
        for required in [Ambulation::Lay, Ambulation::Crawl] {
            if !ambulations.iter().any(|a| a.tag == required) {
                return Err(SimError::MissingAmbulation(required));
            }
        }
        Ok(Self::build(params, pools, ambulations, interval))
    }

    fn build(
        params: MetabolicParams,
        pools: MetabolicPools,
        ambulations: Vec<AmbulationData>,
        interval: f64,
    ) -> Self {
        let mut physique = Self {
            params,
            pools,
            ambulations,
            ambulation_index: None,
            ambulation_actions: BTreeMap::new(),
            muscle: MuscleParams::default(),
            actions: Vec::new(),
            mobility_compromised: false,
            metabolism_active: true,
            clock: TickClock::new(interval),
            calories_consumed: 0.0,
            calorie_rate: 0.0,
            ticks: 0,
            on_event: Signal::new(),
        };
        physique.refresh_strength();
        physique
    }

    /// Recompute muscle ceilings and per-ambulation power after muscle mass changes
    pub fn refresh_strength(&mut self) {
        self.muscle = MuscleParams::from_pools(&self.pools, &self.params);
        self.ambulation_actions = self
            .ambulations
            .iter()
            .map(|a| (a.tag, a.action_data(&self.muscle, &self.params)))
            .collect();
    }

    // === TICK ===

    /// Advance by elapsed time; runs as many whole ticks as have accumulated
    ///
    /// Returns the number of ticks run. Nothing accumulates while the
    /// metabolism is inactive.
    pub fn advance(&mut self, dt: f64) -> u32 {
        if !self.metabolism_active {
            return 0;
        }
        let steps = self.clock.advance(dt);
        for _ in 0..steps {
            self.step();
        }
        steps
    }

    /// Run exactly one tick of `interval` seconds
    pub fn step(&mut self) {
        let dt = self.clock.interval();
        self.calories_consumed = 0.0;

        self.digest(dt);
        self.distribute_glycogen(dt);
        self.process_bmr(dt);
        self.process_movement(dt);
        self.process_actions(dt);

        self.calorie_rate = self.calories_consumed / dt;
        self.ticks += 1;

        trace!(
            tick = self.ticks,
            calorie_rate = self.calorie_rate,
            lower_lactate = self.pools.lower_lactate_fraction(),
            "Metabolic tick"
        );

        if !self.on_event.is_empty() {
            let snapshot = self.snapshot();
            self.on_event.emit(&PhysiqueEvent::Updated(Box::new(snapshot)));
        }
    }

    /// Move food from the digestion buffers into the body
    pub fn digest(&mut self, dt: f64) {
        let pools = &mut self.pools;
        let water_rate = pools.water_digestion_rate();
        let protein_rate = pools.protein_digestion_rate();
        let fat_rate = pools.fat_digestion_rate();
        let carb_rate = pools.carb_digestion_rate();
        let hydration_max = pools.hydration_max();

        drain(&mut pools.satiety, SATIETY_RATE * dt);

        let water = drain(&mut pools.water_digesting, water_rate * dt);
        clamped_add(&mut pools.hydration, hydration_max, water);

        drain(&mut pools.protein_digesting, protein_rate * dt);

        let fat = drain(&mut pools.fat_digesting, fat_rate * dt);
        pools.mass_fat += fat;

        let carbs = drain(&mut pools.carb_digesting, carb_rate * dt);
        if carbs <= 0.0 {
            return;
        }
        let upper_room = (pools.upper_glycogen_max() - pools.glycogen_upper).max(0.0);
        let lower_room = (pools.lower_glycogen_max() - pools.glycogen_lower).max(0.0);
        let liver_room = (pools.liver_glycogen_max() - pools.glycogen_liver).max(0.0);
        let total_room = upper_room + lower_room + liver_room;

        let stored = carbs.min(total_room);
        let surplus = carbs - stored;
        if surplus > 0.0 {
            pools.mass_fat += surplus * KCAL_PER_KG_CARB / KCAL_PER_KG_FAT;
        }
        if stored > 0.0 {
            pools.glycogen_upper += stored * upper_room / total_room;
            pools.glycogen_lower += stored * lower_room / total_room;
            pools.glycogen_liver += stored * liver_room / total_room;
        }
    }

    /// Liver to muscle diffusion, then lactate clearance
    pub fn distribute_glycogen(&mut self, dt: f64) {
        let rate = self.params.glucose_transfer_rate;
        let pools = &mut self.pools;

        let gradient = pools.liver_glycogen_fraction() - pools.upper_glycogen_fraction();
        if gradient > 0.0 {
            let amount = gradient * rate * pools.upper_glycogen_max() * dt;
            let max = pools.upper_glycogen_max();
            transfer(&mut pools.glycogen_liver, &mut pools.glycogen_upper, max, amount);
        }

        let gradient = pools.liver_glycogen_fraction() - pools.lower_glycogen_fraction();
        if gradient > 0.0 {
            let amount = gradient * rate * pools.lower_glycogen_max() * dt;
            let max = pools.lower_glycogen_max();
            transfer(&mut pools.glycogen_liver, &mut pools.glycogen_lower, max, amount);
        }

        // Gluconeogenesis
        let gluconeogenesis_rate = pools.mass_lean() * self.params.kg_blood_lactate_per_kg_per_s;
        let lactate_consumed = drain(&mut pools.blood_lactate, gluconeogenesis_rate * dt / GLUCOSE_PER_LACTATE);
        let glucose_created = lactate_consumed * GLUCOSE_PER_LACTATE;

        // Recovery slows as the blood saturates
        let headroom = (1.0 - pools.blood_lactate_fraction()).max(0.0);
        let recovery = self.params.kg_muscle_lactate_per_kg_per_s * dt * headroom;
        let upper = drain(&mut pools.upper_lactate, pools.fast_twitch_upper * recovery);
        let lower = drain(&mut pools.lower_lactate, pools.fast_twitch_lower * recovery);
        pools.blood_lactate += upper + lower;

        let liver_max = pools.liver_glycogen_max();
        let stored = clamped_add(&mut pools.glycogen_liver, liver_max, glucose_created);
        let surplus = glucose_created - stored;
        if surplus > 0.0 {
            pools.mass_fat += surplus * KCAL_PER_KG_CARB / KCAL_PER_KG_FAT;
        }
    }

    /// Basal carb and fat burn
    pub fn process_bmr(&mut self, dt: f64) {
        let carb_burn = self.pools.glycogen_bmr() * dt;
        let fat_burn = self.pools.fat_bmr() * dt;
        let carb = drain(&mut self.pools.glycogen_liver, carb_burn);
        let fat = drain(&mut self.pools.mass_fat, fat_burn);
        self.calories_consumed += carb * KCAL_PER_KG_CARB + fat * KCAL_PER_KG_FAT;
    }

    /// Cost of the current ambulation; a sprint that outruns lactate clearance drops to Run
    pub fn process_movement(&mut self, dt: f64) {
        let ambulation = self.ambulation();
        let Some(action) = self.ambulation_actions.get(&ambulation).cloned() else {
            return;
        };
        self.process_action(&action, dt);
        if ambulation == Ambulation::Sprint && self.sprint_exhausted() {
            debug!(lactate = self.pools.lower_lactate_fraction(), "Sprint exhausted");
            self.try_to_set_ambulation(Ambulation::Run);
        }
    }

    pub fn process_actions(&mut self, dt: f64) {
        let actions = std::mem::take(&mut self.actions);
        for action in &actions {
            self.process_action(action, dt);
        }
        self.actions = actions;
    }

    /// Charge one action's energy to fat and muscle glycogen
    ///
    /// Anaerobic work turns glycogen into lactate one to one. The share the
    /// Cori cycle will later return to the liver is not counted as burned.
    pub fn process_action(&mut self, action: &ActionData, dt: f64) {
        let efficiency = self.params.muscle_efficiency;
        let upper = PowerSplit::new(
            action.power_upper / efficiency,
            self.muscle.upper_aerobic_threshold,
            self.muscle.upper_anaerobic_threshold,
        );
        let lower = PowerSplit::new(
            action.power_lower / efficiency,
            self.muscle.lower_aerobic_threshold,
            self.muscle.lower_anaerobic_threshold,
        );

        let pools = &mut self.pools;
        let fat = drain(&mut pools.mass_fat, (upper.aerobic + lower.aerobic) * dt / JOULES_PER_KG_FAT);
        let upper_glycogen = drain(&mut pools.glycogen_upper, upper.anaerobic * dt / JOULES_PER_KG_MUSCLE_GLYCOGEN);
        let lower_glycogen = drain(&mut pools.glycogen_lower, lower.anaerobic * dt / JOULES_PER_KG_MUSCLE_GLYCOGEN);
        pools.upper_lactate += upper_glycogen;
        pools.lower_lactate += lower_glycogen;

        let glycogen = upper_glycogen + lower_glycogen;
        let liver_credit = glycogen * GLUCOSE_PER_LACTATE;
        self.calories_consumed += fat * KCAL_PER_KG_FAT + (glycogen - liver_credit) * KCAL_PER_KG_CARB;
    }

    // === AMBULATION ===

    pub fn ambulation(&self) -> Ambulation {
        self.current_ambulation()
            .map(|a| a.tag)
            .unwrap_or(Ambulation::Unset)
    }

    pub fn current_ambulation(&self) -> Option<&AmbulationData> {
        self.ambulation_index.and_then(|i| self.ambulations.get(i))
    }

    pub fn ambulations(&self) -> &[AmbulationData] {
        &self.ambulations
    }

    fn ambulation_index_of(&self, ambulation: Ambulation) -> Option<usize> {
        self.ambulations.iter().position(|a| a.tag == ambulation)
    }

    fn sprint_exhausted(&self) -> bool {
        self.pools.lower_lactate_fraction() > self.params.sprint_lactate_limit
    }

    /// Request a movement mode; returns true if the ambulation changed
    ///
    /// Compromised mobility turns moving requests into Crawl and still ones
    /// into Lay. Sprint with exhausted legs becomes Run. Unknown ambulations
    /// are ignored.
    pub fn try_to_set_ambulation(&mut self, requested: Ambulation) -> bool {
        if requested == Ambulation::Unset {
            return false;
        }
        let Some(mut index) = self.ambulation_index_of(requested) else {
            return false;
        };
        if Some(index) == self.ambulation_index {
            return false;
        }

        let mut attempted = requested;
        if self.mobility_compromised && !matches!(attempted, Ambulation::Crawl | Ambulation::Lay) {
            let fallback = if self.ambulations[index].is_still {
                Ambulation::Lay
            } else {
                Ambulation::Crawl
            };
            match self.ambulation_index_of(fallback) {
                Some(i) => {
                    index = i;
                    attempted = fallback;
                }
                None => return false,
            }
        }
        if attempted == Ambulation::Sprint && self.sprint_exhausted() {
            match self.ambulation_index_of(Ambulation::Run) {
                Some(i) => index = i,
                None => return false,
            }
        }

        if Some(index) == self.ambulation_index {
            return false;
        }
        self.ambulation_index = Some(index);
        let data = self.ambulations[index].clone();
        debug!(requested = %requested, ambulation = %data.tag, "Ambulation changed");
        self.on_event.emit(&PhysiqueEvent::AmbulationChanged(data));
        true
    }

    /// Broken legs force the body down: Lay if still, Crawl if moving
    pub fn set_mobility_compromised(&mut self, compromised: bool) {
        if compromised {
            let still = self.current_ambulation().map(|a| a.is_still).unwrap_or(true);
            self.try_to_set_ambulation(if still { Ambulation::Lay } else { Ambulation::Crawl });
        }
        self.mobility_compromised = compromised;
    }

    pub fn is_mobility_compromised(&self) -> bool {
        self.mobility_compromised
    }

    /// m/s for the current ambulation
    pub fn ambulation_speed(&self) -> f64 {
        let (Some(data), Some(action)) = (
            self.current_ambulation(),
            self.ambulation_actions.get(&self.ambulation()),
        ) else {
            return 0.0;
        };
        let mass = self.pools.mass_total();
        if mass <= 0.0 {
            return 0.0;
        }
        data.power_to_speed * action.total_power() / mass
    }

    // === ACTIONS ===

    /// Add a non-ambulation action charged every tick until cleared
    pub fn queue_action(&mut self, action: ActionData) {
        self.actions.push(action);
    }

    pub fn clear_actions(&mut self) {
        self.actions.clear();
    }

    pub fn queued_actions(&self) -> &[ActionData] {
        &self.actions
    }

    // === FOOD ===

    /// Eat or drink; false, with nothing changed, when too full
    pub fn consume(&mut self, ingestible: &Ingestible) -> bool {
        let cost = self.adjust_satiety(ingestible.satiety());
        if cost >= 1.0 - self.pools.satiety {
            debug!(food = %ingestible.name, cost, satiety = self.pools.satiety, "Too full to eat");
            return false;
        }
        let pools = &mut self.pools;
        pools.satiety += cost;
        pools.protein_digesting += ingestible.protein / 1000.0;
        pools.carb_digesting += ingestible.carbs / 1000.0;
        pools.fat_digesting += ingestible.fat / 1000.0;
        pools.water_digesting += ingestible.water / 1000.0;
        true
    }

    /// Scale reference-body fullness to this body
    pub fn adjust_satiety(&self, satiety: f64) -> f64 {
        let lean = self.pools.mass_lean();
        if lean <= 0.0 {
            return satiety;
        }
        satiety * REFERENCE_MASS_LEAN / lean
    }

    // === ACCESSORS ===

    pub fn params(&self) -> &MetabolicParams {
        &self.params
    }

    pub fn muscle_params(&self) -> &MuscleParams {
        &self.muscle
    }

    pub fn interval(&self) -> f64 {
        self.clock.interval()
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn is_metabolism_active(&self) -> bool {
        self.metabolism_active
    }

    pub fn set_metabolism_active(&mut self, active: bool) {
        if !active {
            self.clock.reset();
        }
        self.metabolism_active = active;
    }

    /// kCal/s over the last tick
    pub fn calorie_rate(&self) -> f64 {
        self.calorie_rate
    }

    pub fn upper_glycogen_fraction(&self) -> f64 {
        self.pools.upper_glycogen_fraction()
    }

    pub fn lower_glycogen_fraction(&self) -> f64 {
        self.pools.lower_glycogen_fraction()
    }

    pub fn liver_glycogen_fraction(&self) -> f64 {
        self.pools.liver_glycogen_fraction()
    }

    pub fn hydration_fraction(&self) -> f64 {
        self.pools.hydration_fraction()
    }

    pub fn blood_lactate_fraction(&self) -> f64 {
        self.pools.blood_lactate_fraction()
    }

    pub fn upper_lactate_fraction(&self) -> f64 {
        self.pools.upper_lactate_fraction()
    }

    pub fn lower_lactate_fraction(&self) -> f64 {
        self.pools.lower_lactate_fraction()
    }

    pub fn protein_fraction(&self) -> f64 {
        self.pools.protein_fraction()
    }

    pub fn snapshot(&self) -> PhysiqueSnapshot {
        PhysiqueSnapshot {
            pools: self.pools,
            ambulation: self.ambulation(),
            mobility_compromised: self.mobility_compromised,
            calorie_rate: self.calorie_rate,
            speed: self.ambulation_speed(),
        }
    }
}

impl std::fmt::Debug for Physique {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Physique")
            .field("ambulation", &self.ambulation())
            .field("mobility_compromised", &self.mobility_compromised)
            .field("ticks", &self.ticks)
            .field("pools", &self.pools)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn standing() -> Physique {
        let mut physique = Physique::default();
        physique.try_to_set_ambulation(Ambulation::Stand);
        physique
    }

    #[test]
    fn test_starts_unset() {
        let physique = Physique::default();
        assert_eq!(physique.ambulation(), Ambulation::Unset);
        assert_eq!(physique.ambulation_speed(), 0.0);
    }

    #[test]
    fn test_missing_fallback_rejected() {
        let table: Vec<_> = AmbulationData::default_table()
            .into_iter()
            .filter(|a| a.tag != Ambulation::Crawl)
            .collect();
        let result = Physique::new(MetabolicParams::default(), MetabolicPools::default(), table, 0.2);
        assert!(matches!(result, Err(SimError::MissingAmbulation(Ambulation::Crawl))));
    }

    #[test]
    fn test_unset_never_reentered() {
        let mut physique = standing();
        assert!(!physique.try_to_set_ambulation(Ambulation::Unset));
        assert_eq!(physique.ambulation(), Ambulation::Stand);
    }

    #[test]
    fn test_same_ambulation_no_event() {
        let mut physique = standing();
        let count = Arc::new(Mutex::new(0));
        let seen = Arc::clone(&count);
        physique.on_event.subscribe(move |event| {
            if matches!(event, PhysiqueEvent::AmbulationChanged(_)) {
                *seen.lock().unwrap() += 1;
            }
        });
        assert!(!physique.try_to_set_ambulation(Ambulation::Stand));
        assert!(physique.try_to_set_ambulation(Ambulation::Walk));
        assert_eq!(*count.lock().unwrap(), 1);
    }

    #[test]
    fn test_compromised_moving_becomes_crawl() {
        let mut physique = standing();
        physique.set_mobility_compromised(true);
        assert_eq!(physique.ambulation(), Ambulation::Lay);
        assert!(physique.try_to_set_ambulation(Ambulation::Run));
        assert_eq!(physique.ambulation(), Ambulation::Crawl);
        assert!(physique.try_to_set_ambulation(Ambulation::Crouch));
        assert_eq!(physique.ambulation(), Ambulation::Lay);
    }

    #[test]
    fn test_compromise_while_moving_crawls() {
        let mut physique = standing();
        physique.try_to_set_ambulation(Ambulation::Walk);
        physique.set_mobility_compromised(true);
        assert_eq!(physique.ambulation(), Ambulation::Crawl);
        physique.set_mobility_compromised(false);
        assert!(physique.try_to_set_ambulation(Ambulation::Walk));
        assert_eq!(physique.ambulation(), Ambulation::Walk);
    }

    #[test]
    fn test_exhausted_sprint_becomes_run() {
        let mut physique = standing();
        physique.pools.lower_lactate = physique.pools.lower_lactate_max() * 1.1;
        assert!(physique.try_to_set_ambulation(Ambulation::Sprint));
        assert_eq!(physique.ambulation(), Ambulation::Run);
    }

    #[test]
    fn test_bmr_burns_calories() {
        let mut physique = standing();
        let fat = physique.pools.mass_fat;
        physique.step();
        assert!(physique.pools.mass_fat < fat);
        assert!(physique.calorie_rate() > 0.0);
        // roughly 1600 kCal/day at rest
        let per_day = physique.calorie_rate() * 86_400.0;
        assert!(per_day > 1000.0 && per_day < 2500.0, "{per_day}");
    }

    #[test]
    fn test_sprint_builds_lactate() {
        let mut physique = standing();
        physique.try_to_set_ambulation(Ambulation::Sprint);
        let glycogen = physique.pools.glycogen_lower;
        for _ in 0..50 {
            physique.step();
        }
        assert!(physique.pools.glycogen_lower < glycogen);
        assert!(physique.pools.lower_lactate + physique.pools.blood_lactate > 0.0);
    }

    #[test]
    fn test_process_action_costs_scale_with_dt() {
        let mut a = standing();
        let mut b = standing();
        // past the aerobic ceiling, so both fat and glycogen are charged
        let action = ActionData::new("Lift", 50.0, 0.0);
        let fat = a.pools.mass_fat;
        a.process_action(&action, 0.1);
        b.process_action(&action, 0.2);
        assert!(a.pools.upper_lactate > 0.0);
        assert!((b.pools.upper_lactate - 2.0 * a.pools.upper_lactate).abs() < 1e-12);
        let spent_a = fat - a.pools.mass_fat;
        let spent_b = fat - b.pools.mass_fat;
        assert!((spent_b - 2.0 * spent_a).abs() < 1e-12);
    }

    #[test]
    fn test_queued_actions_charged() {
        let mut idle = standing();
        let mut busy = standing();
        busy.queue_action(ActionData::new("Chop", 60.0, 10.0));
        idle.step();
        busy.step();
        assert!(busy.calorie_rate() > idle.calorie_rate());
        busy.clear_actions();
        assert!(busy.queued_actions().is_empty());
    }

    #[test]
    fn test_consume_rejected_when_full() {
        let mut physique = standing();
        physique.pools.satiety = 0.9;
        let before = physique.pools;
        // 0.2 satiety at reference lean mass
        let meal = Ingestible::new("Stew", 0.0, 0.0, 0.0, 0.2 / 0.00060);
        assert!((physique.adjust_satiety(meal.satiety()) - 0.2).abs() < 0.01);
        assert!(!physique.consume(&meal));
        assert_eq!(physique.pools, before);
    }

    #[test]
    fn test_consume_fills_buffers() {
        let mut physique = standing();
        let meal = Ingestible::new("Oats", 10.0, 60.0, 5.0, 200.0);
        assert!(physique.consume(&meal));
        assert!(physique.pools.satiety > 0.0);
        assert!((physique.pools.carb_digesting - 0.060).abs() < 1e-6);
        assert!((physique.pools.water_digesting - 0.200).abs() < 1e-6);
    }

    #[test]
    fn test_carb_surplus_becomes_fat() {
        let mut physique = standing();
        physique.pools.glycogen_upper = physique.pools.upper_glycogen_max();
        physique.pools.glycogen_lower = physique.pools.lower_glycogen_max();
        physique.pools.glycogen_liver = physique.pools.liver_glycogen_max();
        physique.pools.carb_digesting = 1.0;
        let fat = physique.pools.mass_fat;
        physique.digest(60.0);
        assert!(physique.pools.mass_fat > fat);
        assert!(physique.pools.carb_digesting < 1.0);
    }

    #[test]
    fn test_liver_feeds_depleted_muscle() {
        let mut physique = standing();
        physique.pools.glycogen_lower = 0.0;
        let liver = physique.pools.glycogen_liver;
        physique.distribute_glycogen(1.0);
        assert!(physique.pools.glycogen_lower > 0.0);
        assert!(physique.pools.glycogen_liver < liver);
    }

    #[test]
    fn test_lactate_recovers_into_blood() {
        let mut physique = standing();
        physique.pools.lower_lactate = 0.01;
        physique.distribute_glycogen(1.0);
        assert!(physique.pools.lower_lactate < 0.01);
        assert!(physique.pools.blood_lactate > 0.0);
    }

    #[test]
    fn test_advance_accumulates_ticks() {
        let mut physique = standing();
        assert_eq!(physique.advance(0.1), 0);
        assert_eq!(physique.advance(0.1), 1);
        assert_eq!(physique.advance(1.0), 5);
        assert_eq!(physique.ticks(), 6);
    }

    #[test]
    fn test_inactive_metabolism_frozen() {
        let mut physique = standing();
        physique.set_metabolism_active(false);
        let before = physique.pools;
        assert_eq!(physique.advance(10.0), 0);
        assert_eq!(physique.pools, before);
    }

    #[test]
    fn test_updated_event_carries_snapshot() {
        let mut physique = standing();
        let last = Arc::new(Mutex::new(None));
        let sink = Arc::clone(&last);
        physique.on_event.subscribe(move |event| {
            if let PhysiqueEvent::Updated(snapshot) = event {
                *sink.lock().unwrap() = Some(snapshot.ambulation);
            }
        });
        physique.step();
        assert_eq!(*last.lock().unwrap(), Some(Ambulation::Stand));
    }

    #[test]
    fn test_run_speed_plausible() {
        let mut physique = standing();
        physique.try_to_set_ambulation(Ambulation::Run);
        let speed = physique.ambulation_speed();
        assert!(speed > 2.0 && speed < 6.0, "{speed}");
    }
}
