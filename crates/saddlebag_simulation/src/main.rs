//! Headless симуляция Saddlebag
//!
//! Спавнит табун, прогоняет стартовый sweep, затем добавляет маунтов
//! по ходу и печатает итоговую экипировку.
//!
//! Usage: `saddlebag_simulation [config.json] [seed]`

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use saddlebag_simulation::{
    create_headless_app, log_info, EquipmentContainer, ItemDefinitions, Mount, OutfitAssigned, OutfitSource,
    OutfitterSettings, SaddleSeats, SaddlebagPlugin, DEFAULT_SEED,
};

const HERD_SIZE: usize = 40;
const TICK_COUNT: usize = 200;
const SWEEP_STEP: Duration = Duration::from_millis(20);

#[derive(Resource, Default)]
struct AssignmentStats {
    by_source: BTreeMap<&'static str, usize>,
}

fn count_assignments(mut events: EventReader<OutfitAssigned>, mut stats: ResMut<AssignmentStats>) {
    for event in events.read() {
        let key = match event.source {
            OutfitSource::Sweep => "sweep",
            OutfitSource::Spawn => "spawn",
        };
        *stats.by_source.entry(key).or_default() += 1;
    }
}

fn spawn_mount(world: &mut World) -> Entity {
    world.spawn((Mount, EquipmentContainer::empty())).id()
}

fn main() {
    let mut args = std::env::args().skip(1);
    let config_path = args.next().map(PathBuf::from);
    let seed = args.next().and_then(|raw| raw.parse().ok()).unwrap_or(DEFAULT_SEED);

    println!("Starting Saddlebag headless simulation (seed: {})", seed);

    let mut app = create_headless_app(seed);

    // Табун существует до outfitter'а → его обработает стартовый sweep
    for _ in 0..HERD_SIZE {
        spawn_mount(app.world_mut());
    }

    app.insert_resource(TimeUpdateStrategy::ManualDuration(SWEEP_STEP))
        .insert_resource(OutfitterSettings {
            sweep_step: SWEEP_STEP,
            config_path,
            ..Default::default()
        })
        .init_resource::<AssignmentStats>()
        .add_plugins(SaddlebagPlugin)
        .add_systems(Update, count_assignments);

    for tick in 0..TICK_COUNT {
        app.update();

        // Новые маунты по ходу симуляции
        if tick % 25 == 10 {
            spawn_mount(app.world_mut());
        }

        if tick % 50 == 0 {
            let mounts = app.world_mut().query::<&Mount>().iter(app.world()).count();
            println!("Tick {}: {} mounts", tick, mounts);
        }
    }

    print_summary(app.world_mut());
    println!("Simulation complete!");
}

fn print_summary(world: &mut World) {
    let stats = world.resource::<AssignmentStats>();
    log_info(&format!("Assignments by source: {:?}", stats.by_source));

    let mut seat_totals = [0usize; 3];
    let mut item_totals: BTreeMap<String, usize> = BTreeMap::new();

    let mut query = world.query::<(&SaddleSeats, &EquipmentContainer)>();
    let rows: Vec<_> = query.iter(world).map(|(seats, container)| (*seats, container.clone())).collect();

    let definitions = world.resource::<ItemDefinitions>();
    for (seats, container) in rows {
        seat_totals[seats.seat_count().as_u8() as usize] += 1;
        for item in container.items() {
            let name = definitions
                .by_handle(item.handle)
                .map(|def| def.id.to_string())
                .unwrap_or_else(|| format!("#{}", item.handle.0));
            *item_totals.entry(name).or_default() += 1;
        }
    }

    println!(
        "Seats: none={} single={} double={}",
        seat_totals[0], seat_totals[1], seat_totals[2]
    );
    for (name, count) in item_totals {
        println!("  {:<24} {}", name, count);
    }
}
