use drone_pathfinding::{Cell, Simulator, SimulationConfig};
use log::info;
use std::{thread, time::Duration};

// Runs a few episodes in the terminal. Every frame prints the grid with
// - # for obstacles
// - S and G for the start and goal
// - * for the cells of the path
// - D for the cell the drone is currently in
//
// Usage: cargo run --example ascii_drone [seed] [episodes]

fn render(sim: &Simulator) -> String {
    let episode = sim.episode();
    let world = &episode.world;
    let drone = Cell::new(
        episode.drone.position.x.round() as i32,
        episode.drone.position.y.round() as i32,
    );
    let mut out = String::new();
    for y in 0..world.size() as i32 {
        for x in 0..world.size() as i32 {
            let cell = Cell::new(x, y);
            let c = if !episode.path.is_empty() && cell == drone {
                'D'
            } else if cell == world.start() {
                'S'
            } else if cell == world.goal() {
                'G'
            } else if world.is_blocked(cell).unwrap_or(true) {
                '#'
            } else if episode.path.cells().contains(&cell) {
                '*'
            } else {
                '.'
            };
            out.push(c);
        }
        out.push('\n');
    }
    out
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let mut args = std::env::args().skip(1);
    let seed: u64 = args.next().map(|s| s.parse()).transpose()?.unwrap_or(0);
    let episodes: usize = args.next().map(|s| s.parse()).transpose()?.unwrap_or(3);

    let config = SimulationConfig::default();
    let frame_ticks = (1.0 / config.drone_speed).ceil() as usize;
    let mut sim = Simulator::seeded(config, seed)?;
    for i in 0..episodes {
        if i > 0 {
            sim.reset()?;
        }
        let episode = sim.episode();
        info!("Episode {}: path {}", i, episode.path);
        if episode.path.is_empty() {
            println!("Episode {i}: goal unreachable\n{}", render(&sim));
            continue;
        }
        while !sim.episode().is_finished() {
            println!("Episode {i}\n{}", render(&sim));
            for _ in 0..frame_ticks {
                sim.tick();
            }
            thread::sleep(Duration::from_millis(100));
        }
        println!("Episode {i}: goal reached\n{}", render(&sim));
    }
    Ok(())
}
