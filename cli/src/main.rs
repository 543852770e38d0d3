use anyhow::Context;
use clap::Parser;
use flume::{Receiver, Sender};
use racesim::core::handle_race::{handle_race, run_autopilot_race, spawn_ticker, RaceCommand};
use racesim::core::participant::{ProgressSource, RngProgress};
use racesim::core::race_engine::{RaceAction, RaceEngine};
use racesim::core::race_log::SystemClock;
use racesim::interfaces::race_interface::RaceSnapshot;
use racesim::post::race_result::RaceResult;
use racesim::pre::read_race_pars::{read_race_pars, RacePars};
use racesim::pre::sim_opts::SimOpts;
use rayon::prelude::*;
use std::io::BufRead;
use std::thread;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

fn init_tracing(debug: bool) {
    let level = if debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(std::io::stderr)
        .init();
}

fn seed_from_time() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

fn print_catalog(race_pars: &RacePars) {
    println!("INFO: Available vehicles:");
    for (i, vehicle_pars) in race_pars.vehicle_pars_all.iter().enumerate() {
        println!(
            "{:3}: {} ({}) - max speed {} km/h, tank {:.0} l, {:.1} l/action",
            i,
            vehicle_pars.name,
            vehicle_pars.category,
            vehicle_pars.max_speed,
            vehicle_pars.max_fuel,
            vehicle_pars.fuel_rate
        );
    }
}

fn print_snapshot(snapshot: &RaceSnapshot) {
    if let Some(e) = &snapshot.last_error {
        println!("WARNING: {}", e);
    }

    if snapshot.is_active {
        if let Some(log_line) = snapshot.last_log_line() {
            println!("INFO: {}", log_line);
        }
        println!("{}", snapshot.status_line());
    } else if let Some(vehicle_name) = &snapshot.vehicle_name {
        if snapshot.final_result.is_none() {
            println!("INFO: {} is ready, enter 'r' to start", vehicle_name);
        }
    }

    if let Some(result) = &snapshot.final_result {
        result.print_standings();
        println!("INFO: Enter 'r' to race again or 'q' to quit");
    }
}

/// The printer shows every snapshot until the engine thread hangs up.
fn spawn_printer(rx: Receiver<RaceSnapshot>) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        for snapshot in rx.iter() {
            print_snapshot(&snapshot);
        }
    })
}

fn read_commands(tx: &Sender<RaceCommand>) -> anyhow::Result<()> {
    println!("INFO: Actions: 's' speed up, 'm' maintain speed, 'p' pit stop, 'r' (re)start, 'q' quit");

    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let line = line.context("Failed to read from stdin!")?;
        let input = line.trim();

        let command = match input {
            "" => continue,
            "q" | "quit" => RaceCommand::Quit,
            "r" | "start" => RaceCommand::Start,
            _ => match input.parse::<RaceAction>() {
                Ok(action) => RaceCommand::Action(action),
                Err(e) => {
                    println!("WARNING: {}", e);
                    continue;
                }
            },
        };

        let quit = command == RaceCommand::Quit;
        if tx.send(command).is_err() || quit {
            break;
        }
    }

    Ok(())
}

fn ask_vehicle(race_pars: &RacePars) -> anyhow::Result<usize> {
    print_catalog(race_pars);
    println!("INFO: Choose a vehicle by its number:");

    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let line = line.context("Failed to read from stdin!")?;
        match line.trim().parse::<usize>() {
            Ok(idx) if race_pars.check_vehicle_idx(idx).is_ok() => return Ok(idx),
            _ => println!(
                "WARNING: Enter a number between 0 and {}",
                race_pars.vehicle_pars_all.len() - 1
            ),
        }
    }

    anyhow::bail!("No vehicle chosen!")
}

fn run_interactive(sim_opts: &SimOpts, race_pars: RacePars) -> anyhow::Result<Option<RaceResult>> {
    let vehicle_idx = match sim_opts.vehicle {
        Some(idx) => {
            race_pars.check_vehicle_idx(idx)?;
            idx
        }
        None => ask_vehicle(&race_pars)?,
    };

    let (cmd_tx, cmd_rx) = flume::unbounded();
    let (snap_tx, snap_rx) = flume::unbounded();

    let ai_progress: Box<dyn ProgressSource + Send> = match sim_opts.seed {
        Some(seed) => Box::new(RngProgress::seeded(seed)),
        None => Box::new(RngProgress::from_entropy()),
    };

    // the engine thread is the only owner of the race
    let race_pars_thread = race_pars.clone();
    let engine_thread = thread::spawn(move || {
        let mut engine = RaceEngine::new(&race_pars_thread, Box::new(SystemClock), ai_progress);
        handle_race(&mut engine, &cmd_rx, Some(&snap_tx))
    });
    let printer = spawn_printer(snap_rx);

    cmd_tx
        .send(RaceCommand::SelectVehicle(vehicle_idx))
        .context("Race engine is not running!")?;
    cmd_tx
        .send(RaceCommand::Start)
        .context("Race engine is not running!")?;

    let _ticker = spawn_ticker(
        Duration::from_secs_f64(race_pars.tick_pars.interval),
        race_pars.tick_pars.decrement,
        cmd_tx.clone(),
    );

    read_commands(&cmd_tx)?;
    cmd_tx.send(RaceCommand::Quit).ok();
    drop(cmd_tx);

    let result = engine_thread
        .join()
        .map_err(|_| anyhow::anyhow!("Race engine thread panicked!"))??;
    printer
        .join()
        .map_err(|_| anyhow::anyhow!("Printer thread panicked!"))?;

    Ok(result)
}

fn run_autopilot(sim_opts: &SimOpts, race_pars: &RacePars) -> anyhow::Result<Option<RaceResult>> {
    let vehicle_idx = sim_opts.vehicle.unwrap_or(0);
    race_pars.check_vehicle_idx(vehicle_idx)?;
    let seed_base = sim_opts.seed.unwrap_or_else(seed_from_time);
    let no_sim_runs = sim_opts.no_sim_runs.max(1);

    println!(
        "INFO: Running {} autopilot race(s) with vehicle {}...",
        no_sim_runs, vehicle_idx
    );
    let t_start = Instant::now();

    let race_results = (0..no_sim_runs as u64)
        .into_par_iter()
        .map(|i| run_autopilot_race(race_pars, vehicle_idx, seed_base.wrapping_add(i)))
        .collect::<anyhow::Result<Vec<RaceResult>>>()?;

    println!("INFO: Execution time: {}ms", t_start.elapsed().as_millis());

    if race_results.len() == 1 {
        race_results[0].print_standings();
    } else {
        let no_wins = race_results
            .iter()
            .filter(|r| r.player_position() == Some(1))
            .count();
        let avg_position = race_results
            .iter()
            .filter_map(|r| r.player_position())
            .map(f64::from)
            .sum::<f64>()
            / race_results.len() as f64;

        println!(
            "RESULT: {} of {} races finished 1st, average position {:.2}",
            no_wins,
            race_results.len(),
            avg_position
        );
    }

    Ok(race_results.into_iter().last())
}

fn main() -> anyhow::Result<()> {
    // PRE-PROCESSING ------------------------------------------------------------------------------
    let sim_opts: SimOpts = SimOpts::parse();
    init_tracing(sim_opts.debug);

    let mut race_pars = if let Some(parfile_path) = &sim_opts.parfile_path {
        println!("INFO: Reading race parameters from {:?}", parfile_path);
        read_race_pars(parfile_path)?
    } else {
        RacePars::default()
    };

    if let Some(tick_interval) = sim_opts.tick_interval {
        race_pars.tick_pars.interval = tick_interval;
    }
    race_pars.check_pars()?;

    println!(
        "INFO: {} laps, {:.0}s time budget",
        race_pars.circuit_pars.tot_no_laps, race_pars.max_time
    );

    // EXECUTION -----------------------------------------------------------------------------------
    let race_result = if sim_opts.auto {
        run_autopilot(&sim_opts, &race_pars)?
    } else {
        run_interactive(&sim_opts, race_pars)?
    };

    // POST-PROCESSING -----------------------------------------------------------------------------
    if let (Some(csv_path), Some(race_result)) = (&sim_opts.csv_path, &race_result) {
        race_result.write_standings_to_file(csv_path)?;
        println!("INFO: Standings written to {:?}", csv_path);
    }

    Ok(())
}
