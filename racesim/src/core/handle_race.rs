use crate::core::participant::RngProgress;
use crate::core::race_engine::{RaceAction, RaceEngine};
use crate::core::race_log::SystemClock;
use crate::core::state_handler::RaceStatus;
use crate::core::strategy::choose_action;
use crate::error::Result;
use crate::interfaces::race_interface::RaceSnapshot;
use crate::post::race_result::RaceResult;
use crate::pre::read_race_pars::RacePars;
use anyhow::Context;
use flume::{Receiver, Sender};
use std::thread::{self, sleep, JoinHandle};
use std::time::Duration;
use tracing::{debug, warn};

/// Commands accepted by the race command loop.
#[derive(Debug, Clone, PartialEq)]
pub enum RaceCommand {
    SelectVehicle(usize),
    Start,
    Action(RaceAction),
    /// One tick of the race clock removing the given race time (s).
    Tick(f64),
    Quit,
}

fn apply_command(engine: &mut RaceEngine, command: &RaceCommand) -> Result<()> {
    match command {
        RaceCommand::SelectVehicle(idx) => engine.select_vehicle_by_index(*idx),
        RaceCommand::Start => engine.start_race(),
        RaceCommand::Action(action) => engine.execute_action(*action),
        RaceCommand::Tick(decrement) => engine.tick(*decrement),
        RaceCommand::Quit => Ok(()),
    }
}

/// handle_race owns the engine and applies the received commands one after another until `Quit`
/// is received or all senders are gone. Rejected commands do not stop the loop, they are reported
/// in the `last_error` field of the next snapshot. A snapshot is sent after every command except
/// ticks that leave the race status unchanged. Returns the result of the last race, if it ended.
pub fn handle_race(
    engine: &mut RaceEngine,
    rx: &Receiver<RaceCommand>,
    tx: Option<&Sender<RaceSnapshot>>,
) -> anyhow::Result<Option<RaceResult>> {
    while let Ok(command) = rx.recv() {
        if command == RaceCommand::Quit {
            debug!("Quit received");
            break;
        }

        let status_prev = engine.status();
        let cmd_result = apply_command(engine, &command);

        let silent_tick = matches!(command, RaceCommand::Tick(_))
            && cmd_result.is_ok()
            && engine.status() == status_prev;

        if silent_tick {
            continue;
        }

        let mut snapshot = engine.snapshot();
        if let Err(e) = cmd_result {
            warn!(?command, error = %e, "Command rejected");
            snapshot.last_error = Some(e.to_string());
        }

        if let Some(tx) = tx {
            tx.send(snapshot)
                .context("Failed to send race snapshot to the front end!")?;
        }
    }

    Ok(engine.race_result())
}

/// spawn_ticker starts the race clock: every `interval` a `Tick(decrement)` is sent until the
/// command channel is closed.
pub fn spawn_ticker(interval: Duration, decrement: f64, tx: Sender<RaceCommand>) -> JoinHandle<()> {
    thread::spawn(move || loop {
        sleep(interval);
        if tx.send(RaceCommand::Tick(decrement)).is_err() {
            break;
        }
    })
}

/// run_autopilot_race drives a whole race with the autopilot strategy. The seed controls the AI
/// competitors.
pub fn run_autopilot_race(
    race_pars: &RacePars,
    vehicle_idx: usize,
    seed: u64,
) -> anyhow::Result<RaceResult> {
    let mut engine = RaceEngine::new(
        race_pars,
        Box::new(SystemClock),
        Box::new(RngProgress::seeded(seed)),
    );
    engine.select_vehicle_by_index(vehicle_idx)?;
    engine.start_race()?;

    while engine.status() == RaceStatus::Active {
        let action = choose_action(&engine);
        engine
            .execute_action(action)
            .context(format!("Autopilot action {} failed!", action))?;
    }

    engine
        .race_result()
        .context("Race ended without a result!")
}
