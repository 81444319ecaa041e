//! hollowmark: headless driver for the HOLLOWMARK combat simulation.
//!
//! Usage:
//!   hollowmark run --seed 42 --ticks 900
//!   hollowmark demo --seed 42 --realtime

use std::process;
use std::time::{Duration, Instant};

use glam::DVec2;

use hollowmark_core::commands::{ActorRef, PlayerCommand};
use hollowmark_core::constants::TICK_RATE;
use hollowmark_core::enums::GamePhase;
use hollowmark_sim::engine::{SimConfig, SimulationEngine};

/// Nominal duration of one tick.
const TICK_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TICK_RATE as u64);

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    match args[1].as_str() {
        "run" => cmd_run(&args[2..]),
        "demo" => cmd_demo(&args[2..]),
        "help" | "--help" | "-h" => print_usage(),
        other => {
            eprintln!("Unknown command: {other}");
            print_usage();
            process::exit(1);
        }
    }
}

fn print_usage() {
    eprintln!(
        "hollowmark: headless combat simulation driver\n\
         \n\
         Commands:\n\
         \n\
         run       Simulate an idle session and print one snapshot per second\n\
         \n\
           --seed <N>     RNG seed (default: 42)\n\
           --ticks <N>    Number of ticks to simulate (default: 900)\n\
           --realtime     Pace the loop at the nominal tick rate\n\
         \n\
         demo      Run a scripted session: collect the coins, win, restart\n\
         \n\
           --seed <N>     RNG seed (default: 42)\n\
           --realtime     Pace the loop at the nominal tick rate\n\
         \n\
         Events are printed to stdout as JSON lines as they fire.\n"
    );
}

fn parse_seed(args: &[String]) -> u64 {
    for i in 0..args.len() {
        if args[i] == "--seed" && i + 1 < args.len() {
            if let Ok(n) = args[i + 1].parse::<u64>() {
                return n;
            }
        }
    }
    42
}

fn parse_ticks(args: &[String], default: u64) -> u64 {
    for i in 0..args.len() {
        if args[i] == "--ticks" && i + 1 < args.len() {
            if let Ok(n) = args[i + 1].parse::<u64>() {
                return n;
            }
        }
    }
    default
}

fn parse_realtime(args: &[String]) -> bool {
    args.iter().any(|a| a == "--realtime")
}

fn make_engine(seed: u64) -> SimulationEngine {
    let mut engine = SimulationEngine::new(SimConfig { seed });
    engine.subscribe(|event| {
        if let Ok(line) = serde_json::to_string(event) {
            println!("{line}");
        }
    });
    engine
}

// --- Run command ---

fn cmd_run(args: &[String]) {
    let seed = parse_seed(args);
    let ticks = parse_ticks(args, 900);
    let realtime = parse_realtime(args);

    eprintln!("Simulating {ticks} ticks (seed {seed})...");

    let mut engine = make_engine(seed);
    let mut next_tick_time = Instant::now();

    for _ in 0..ticks {
        let snapshot = engine.tick();

        if snapshot.time.tick % TICK_RATE as u64 == 0 {
            match serde_json::to_string(&snapshot) {
                Ok(line) => println!("{line}"),
                Err(e) => eprintln!("Snapshot serialization failed: {e}"),
            }
        }

        if realtime {
            next_tick_time += TICK_DURATION;
            let now = Instant::now();
            if next_tick_time > now {
                std::thread::sleep(next_tick_time - now);
            }
        }
    }

    eprintln!("Done.");
}

// --- Demo command ---

/// A timed command for the demo script.
struct Cue {
    at_tick: u64,
    command: PlayerCommand,
}

fn demo_script() -> Vec<Cue> {
    vec![
        // Walk onto each coin in turn.
        Cue {
            at_tick: 15,
            command: PlayerCommand::SetPlayerPosition {
                position: DVec2::new(1.5, 0.5),
            },
        },
        Cue {
            at_tick: 45,
            command: PlayerCommand::SetPlayerPosition {
                position: DVec2::new(-2.0, 1.0),
            },
        },
        // The boss objects.
        Cue {
            at_tick: 60,
            command: PlayerCommand::CastSpell {
                target: ActorRef::Player,
            },
        },
        // Step off the mark before the blast lands.
        Cue {
            at_tick: 70,
            command: PlayerCommand::SetPlayerPosition {
                position: DVec2::new(-2.0, 3.0),
            },
        },
        Cue {
            at_tick: 105,
            command: PlayerCommand::SummonReinforcements { count: 2 },
        },
        Cue {
            at_tick: 120,
            command: PlayerCommand::SetPlayerPosition {
                position: DVec2::new(3.0, -1.0),
            },
        },
        // Win fires here; the end screen follows. Restart once unlocked.
        Cue {
            at_tick: 200,
            command: PlayerCommand::Restart,
        },
    ]
}

fn cmd_demo(args: &[String]) {
    let seed = parse_seed(args);
    let realtime = parse_realtime(args);

    eprintln!("Running scripted demo (seed {seed})...");

    let mut engine = make_engine(seed);
    let mut script = demo_script();
    script.sort_by_key(|cue| cue.at_tick);
    let mut script = script.into_iter().peekable();

    let mut next_tick_time = Instant::now();
    let mut tick: u64 = 0;

    loop {
        while let Some(cue) = script.next_if(|cue| cue.at_tick <= tick) {
            engine.queue_command(cue.command);
        }

        let snapshot = engine.tick();

        // Stop shortly after the restarted session comes back up.
        if tick > 200 && snapshot.phase == GamePhase::Active && script.peek().is_none() {
            eprintln!(
                "Session restarted: {} coins remaining, player lives {}",
                snapshot.session.remaining, snapshot.player.lives
            );
            break;
        }
        if tick > 600 {
            eprintln!("Demo timed out before restart.");
            process::exit(1);
        }

        tick += 1;
        if realtime {
            next_tick_time += TICK_DURATION;
            let now = Instant::now();
            if next_tick_time > now {
                std::thread::sleep(next_tick_time - now);
            }
        }
    }
}
