//! Headless Body Simulation
//!
//! Builds one character, puts it through a scripted exertion, a seeded volley
//! of hits and a meal, and prints what is left of it.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use clap::Parser;
use physique_sim::character::{Character, CharacterReport};
use physique_sim::condition::{
    ArmorItem, BodyPart, ConditionEvent, ConditionTarget, Impact, InventoryEntry, InventoryItem,
};
use physique_sim::core::SimulationConfig;
use physique_sim::physique::{Ambulation, Ingestible, PhysiqueEvent};
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

/// Headless Body Simulation - exertion, damage and recovery of one character
#[derive(Parser, Debug)]
#[command(name = "body_sim")]
#[command(about = "Run a scripted exertion and damage scenario and report the body state")]
struct Args {
    /// Character config (TOML); the bundled humanoid when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Units (cm³) of armor to equip
    #[arg(long, default_value_t = 6000)]
    armor_units: u32,

    /// Armor rating in J/cm³
    #[arg(long, default_value_t = 40.0)]
    armor_rating: f32,

    /// Maximum sprint duration in seconds before giving up
    #[arg(long, default_value_t = 1800.0)]
    max_sprint: f64,

    /// Number of random hits
    #[arg(long, default_value_t = 12)]
    impacts: u32,

    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Output format: json or text
    #[arg(long, default_value = "json")]
    format: String,
}

#[derive(Serialize)]
struct HitLog {
    part: BodyPart,
    energy: f32,
    area: f32,
    leftover: f32,
    components_hit: usize,
}

/// JSON output structure
#[derive(Serialize)]
struct RunResult {
    seed: u64,
    sprint_seconds: f64,
    sprint_exhausted: bool,
    armor_returned: u32,
    hits: Vec<HitLog>,
    ate: bool,
    ambulation_changes: Vec<Ambulation>,
    condition_events: Vec<ConditionEvent>,
    report: CharacterReport,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("physique_sim=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let seed = args.seed.unwrap_or_else(rand::random);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let config = match &args.config {
        Some(path) => SimulationConfig::load(path),
        None => SimulationConfig::bundled(),
    };
    let config = config.unwrap_or_else(|e| {
        eprintln!("Failed to load config: {}", e);
        std::process::exit(1);
    });

    let mut character = Character::from_config("Subject", &config).unwrap_or_else(|e| {
        eprintln!("Failed to build character: {}", e);
        std::process::exit(1);
    });

    let ambulation_changes = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&ambulation_changes);
    character.physique.on_event.subscribe(move |event| {
        if let PhysiqueEvent::AmbulationChanged(data) = event {
            if let Ok(mut changes) = sink.lock() {
                changes.push(data.tag);
            }
        }
    });

    // Armor
    let plate = ArmorItem {
        name: "Plate".into(),
        rating: args.armor_rating,
        regen: 0.0,
        density: 7.8,
        dynamic: false,
        mass: 0.0078,
    };
    let stack = InventoryEntry::new("Plate", 1, InventoryItem::Armor(plate), args.armor_units);
    let armor_returned = character.equip(stack).count;

    // Sprint until the legs give out
    character.try_to_set_ambulation(Ambulation::Sprint);
    let interval = character.physique.interval();
    let mut sprint_seconds = 0.0;
    while character.physique.ambulation() == Ambulation::Sprint && sprint_seconds < args.max_sprint {
        character.physique.step();
        sprint_seconds += interval;
    }
    let sprint_exhausted = character.physique.ambulation() == Ambulation::Run;
    character.try_to_set_ambulation(Ambulation::Stand);

    // Hits
    let mut hits = Vec::new();
    for _ in 0..args.impacts {
        if character.is_dead() {
            break;
        }
        let part = BodyPart::all()[rng.gen_range(0..BodyPart::all().len())];
        let Some(armor) = character.manager.armor_target(part) else {
            continue;
        };
        let cells = match armor {
            ConditionTarget::Armor(i) => character.manager.armor_components()[i].geometry().cell_count,
            _ => 1,
        };
        let mut impacts = vec![
            Impact {
                distance: 0.0,
                target: Some(armor),
                cell_index: rng.gen_range(0..cells),
            },
            Impact {
                distance: 0.03,
                target: Some(ConditionTarget::Skeleton),
                cell_index: 0,
            },
        ];
        let organ = match part {
            BodyPart::Head => character.manager.organ_target("Brain"),
            BodyPart::UpperTorso => character.manager.organ_target("Heart"),
            _ => None,
        };
        if let Some(organ) = organ {
            impacts.push(Impact {
                distance: 0.08,
                target: Some(organ),
                cell_index: 0,
            });
        }

        let energy = rng.gen_range(200.0..3000.0);
        let area = rng.gen_range(0.000_05..0.000_4);
        let result = character.resolve_impacts(energy, area, BodyPart::None, &impacts);
        hits.push(HitLog {
            part,
            energy,
            area,
            leftover: result.leftover,
            components_hit: result.components_hit,
        });
    }

    // Meal and a minute of rest
    let ration = Ingestible::new("Ration", 20.0, 60.0, 15.0, 250.0);
    let ate = character.consume(&ration);
    character.advance(60.0);

    let condition_events = character.take_events();
    let ambulation_changes = ambulation_changes
        .lock()
        .map(|changes| changes.clone())
        .unwrap_or_default();

    let result = RunResult {
        seed,
        sprint_seconds,
        sprint_exhausted,
        armor_returned,
        hits,
        ate,
        ambulation_changes,
        condition_events,
        report: character.report(),
    };

    if args.format == "json" {
        match serde_json::to_string_pretty(&result) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Failed to serialize report: {}", e);
                std::process::exit(1);
            }
        }
    } else {
        print_text(&result);
    }
}

fn print_text(result: &RunResult) {
    let report = &result.report;
    println!("=== {} (seed {}) ===", report.name, result.seed);
    println!(
        "Sprinted {:.1}s{}",
        result.sprint_seconds,
        if result.sprint_exhausted { ", then dropped to a run" } else { "" }
    );
    println!(
        "Armor: {} ({:.2} kg), {} units left over",
        report.equipped_armor, report.equipped_mass, result.armor_returned
    );
    for hit in &result.hits {
        println!(
            "  hit {:?}: {:.0} J over {:.5} m², {} layers, {:.0} J through",
            hit.part, hit.energy, hit.area, hit.components_hit, hit.leftover
        );
    }
    println!("Ate ration: {}", result.ate);
    println!(
        "Dead: {}  Mobility compromised: {}  Left arm: {}  Right arm: {}",
        report.dead, report.mobility_compromised, report.left_arm_compromised, report.right_arm_compromised
    );
    for bone in report.bones.iter().filter(|b| b.condition_fraction < 1.0) {
        println!("  {}: {:.0}%", bone.name, bone.condition_fraction * 100.0);
    }
    let snapshot = &report.physique;
    println!(
        "Ambulation {:?}, {:.2} kCal/s, lower lactate {:.0}%, satiety {:.2}",
        snapshot.ambulation,
        snapshot.calorie_rate,
        snapshot.pools.lower_lactate_fraction() * 100.0,
        snapshot.pools.satiety
    );
}
