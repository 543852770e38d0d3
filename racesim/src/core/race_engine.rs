use crate::core::circuit::Circuit;
use crate::core::participant::{Participant, ProgressSource, RngProgress};
use crate::core::race_log::{Clock, RaceLog, SystemClock};
use crate::core::state_handler::{RaceOutcome, RaceStatus, StateHandler};
use crate::core::vehicle::Vehicle;
use crate::error::{RaceError, Result};
use crate::interfaces::race_interface::RaceSnapshot;
use crate::post::race_result::{RaceResult, StandingEntry};
use crate::pre::read_race_pars::RacePars;
use helpers::general::{argsort, ordinal, SortOrder};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, info, warn};

/// A pit stop is refused if the tank is filled to at least this fraction.
pub const PIT_FUEL_THRESHOLD: f64 = 0.95;

const SPEED_UP_STEP: u32 = 20;
const SPEED_UP_FUEL_MULT: f64 = 1.5;
const SPEED_UP_TIME: f64 = 5.0;
const MAINTAIN_FUEL_MULT: f64 = 1.0;
const MAINTAIN_TIME: f64 = 3.0;
const PIT_STOP_TIME: f64 = 15.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RaceAction {
    SpeedUp,
    MaintainSpeed,
    PitStop,
}

impl RaceAction {
    /// (s) Race time spent on the action.
    pub fn time_cost(&self) -> f64 {
        match self {
            RaceAction::SpeedUp => SPEED_UP_TIME,
            RaceAction::MaintainSpeed => MAINTAIN_TIME,
            RaceAction::PitStop => PIT_STOP_TIME,
        }
    }

    /// Multiplier applied to the fuel rate of the vehicle, zero for pit stops.
    pub fn fuel_multiplier(&self) -> f64 {
        match self {
            RaceAction::SpeedUp => SPEED_UP_FUEL_MULT,
            RaceAction::MaintainSpeed => MAINTAIN_FUEL_MULT,
            RaceAction::PitStop => 0.0,
        }
    }

    fn log_message(&self) -> &'static str {
        match self {
            RaceAction::SpeedUp => "Speed increased",
            RaceAction::MaintainSpeed => "Speed maintained",
            RaceAction::PitStop => "Pit stop completed",
        }
    }
}

impl fmt::Display for RaceAction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            RaceAction::SpeedUp => "speed up",
            RaceAction::MaintainSpeed => "maintain speed",
            RaceAction::PitStop => "pit stop",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for RaceAction {
    type Err = RaceError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "s" | "speed" | "speedup" | "speed up" => Ok(RaceAction::SpeedUp),
            "m" | "maintain" | "maintainspeed" | "maintain speed" => Ok(RaceAction::MaintainSpeed),
            "p" | "pit" | "pitstop" | "pit stop" => Ok(RaceAction::PitStop),
            other => Err(RaceError::Precondition(format!("Unknown action '{}'", other))),
        }
    }
}

/// Outcome of resolving one action against the selected vehicle.
#[derive(Debug, Clone, PartialEq)]
pub enum ActionResolution {
    Resolved,
    /// The vehicle could not burn the fuel the action needs.
    FuelExhausted(RaceError),
}

/// RaceEngine runs one race of the player against the AI competitors.
#[derive(Debug)]
pub struct RaceEngine {
    max_time: f64,
    time_remaining: f64,
    sh: StateHandler,
    vehicles: Vec<Vehicle>,
    selected_vehicle: Option<Vehicle>,
    circuit: Circuit,
    participants: Vec<Participant>,
    race_log: RaceLog,
    ai_progress: Box<dyn ProgressSource + Send>,
    no_turns: u32,
}

impl Default for RaceEngine {
    fn default() -> Self {
        RaceEngine::with_max_time(300.0)
    }
}

impl RaceEngine {
    pub fn new(
        race_pars: &RacePars,
        clock: Box<dyn Clock + Send>,
        ai_progress: Box<dyn ProgressSource + Send>,
    ) -> RaceEngine {
        // player first, AI competitors behind in the given order
        let mut participants = Vec::with_capacity(race_pars.ai_names.len() + 1);
        participants.push(Participant::new(&race_pars.player_name, true));

        for ai_name in race_pars.ai_names.iter() {
            participants.push(Participant::new(ai_name, false));
        }

        RaceEngine {
            max_time: race_pars.max_time,
            time_remaining: race_pars.max_time,
            sh: StateHandler::default(),
            vehicles: race_pars.vehicle_pars_all.iter().map(Vehicle::new).collect(),
            selected_vehicle: None,
            circuit: Circuit::new(&race_pars.circuit_pars),
            participants,
            race_log: RaceLog::new(clock),
            ai_progress,
            no_turns: 0,
        }
    }

    /// Engine with the built-in catalog and roster, local time stamps and random AI progress.
    pub fn with_max_time(max_time: f64) -> RaceEngine {
        RaceEngine::new(
            &RacePars::with_max_time(max_time),
            Box::new(SystemClock),
            Box::new(RngProgress::from_entropy()),
        )
    }

    // ---------------------------------------------------------------------------------------------
    // ACCESSORS -----------------------------------------------------------------------------------
    // ---------------------------------------------------------------------------------------------

    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    pub fn selected_vehicle(&self) -> Option<&Vehicle> {
        self.selected_vehicle.as_ref()
    }

    pub fn circuit(&self) -> &Circuit {
        &self.circuit
    }

    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    pub fn status(&self) -> RaceStatus {
        self.sh.status()
    }

    pub fn is_active(&self) -> bool {
        self.sh.is_active()
    }

    pub fn result_message(&self) -> &'static str {
        self.sh.result_message()
    }

    pub fn max_time(&self) -> f64 {
        self.max_time
    }

    pub fn time_remaining(&self) -> f64 {
        self.time_remaining
    }

    pub fn get_action_log_text(&self) -> String {
        self.race_log.get_action_log_text()
    }

    /// (%) Remaining share of the time budget. Not clamped.
    pub fn time_percentage(&self) -> f64 {
        self.time_remaining / self.max_time * 100.0
    }

    pub fn player(&self) -> Option<&Participant> {
        self.participants.iter().find(|p| p.is_player)
    }

    /// Position of the player as ordinal, e.g. "2nd".
    pub fn player_position_label(&self) -> String {
        ordinal(self.player().map_or(1, |p| p.position))
    }

    // ---------------------------------------------------------------------------------------------
    // LIFECYCLE -----------------------------------------------------------------------------------
    // ---------------------------------------------------------------------------------------------

    /// The method stores a copy of the given vehicle for the next race. It does not have to be
    /// part of the catalog.
    pub fn select_vehicle(&mut self, vehicle: Vehicle) -> Result<()> {
        if self.sh.is_active() {
            return Err(RaceError::InvalidState(
                "Cannot change vehicle - race is active".to_owned(),
            ));
        }

        debug!(vehicle = %vehicle.name, "Vehicle selected");
        self.selected_vehicle = Some(vehicle);
        Ok(())
    }

    pub fn select_vehicle_by_index(&mut self, idx: usize) -> Result<()> {
        let vehicle = self.vehicles.get(idx).cloned().ok_or_else(|| {
            RaceError::Precondition(format!(
                "No vehicle with index {} (catalog holds {})",
                idx,
                self.vehicles.len()
            ))
        })?;
        self.select_vehicle(vehicle)
    }

    /// The method (re)starts the race: full tank, standing start on lap 1 and the whole time
    /// budget. Standings are reset as well, the log is kept.
    pub fn start_race(&mut self) -> Result<()> {
        let vehicle = self.selected_vehicle.as_mut().ok_or_else(|| {
            RaceError::Precondition("No vehicle selected for race start".to_owned())
        })?;
        vehicle.reset();
        let vehicle_name = vehicle.name.to_owned();

        self.time_remaining = self.max_time;
        self.circuit.reset();
        self.no_turns = 0;

        for participant in self.participants.iter_mut() {
            participant.reset();
        }

        self.sh.act_race();
        self.race_log
            .log_action(&format!("Race started with {}", vehicle_name));

        info!(
            vehicle = %vehicle_name,
            tot_no_laps = self.circuit.tot_no_laps,
            max_time = self.max_time,
            "Race started"
        );
        Ok(())
    }

    // ---------------------------------------------------------------------------------------------
    // MAIN METHODS --------------------------------------------------------------------------------
    // ---------------------------------------------------------------------------------------------

    /// The method resolves one player action and updates the race afterwards. Running out of fuel
    /// is not an error: the race simply ends.
    pub fn execute_action(&mut self, action: RaceAction) -> Result<()> {
        if !self.sh.is_active() {
            return Err(RaceError::InvalidState(
                "Cannot execute action - race is not active".to_owned(),
            ));
        }

        match self.resolve_action(action)? {
            ActionResolution::Resolved => {
                self.no_turns += 1;
                self.race_log.log_action(action.log_message());
                debug!(
                    %action,
                    time_remaining = self.time_remaining,
                    "Action resolved"
                );
                self.update_race_state();
            }
            ActionResolution::FuelExhausted(reason) => {
                warn!(%action, %reason, "Action failed");
                self.race_log
                    .log_action(&format!("Action failed: {}", reason));
                self.end_race(RaceOutcome::FuelExhausted);
            }
        }

        Ok(())
    }

    /// The method handles one tick of the external race clock. Once the time budget is used up,
    /// a final maintain-speed action is forced, which ends the race.
    pub fn tick(&mut self, decrement: f64) -> Result<()> {
        if !self.sh.is_active() {
            return Ok(());
        }

        self.time_remaining = (self.time_remaining - decrement).max(0.0);

        if self.time_remaining <= 0.0 {
            self.execute_action(RaceAction::MaintainSpeed)?;
        }
        Ok(())
    }

    // ---------------------------------------------------------------------------------------------
    // RACE PARTS ----------------------------------------------------------------------------------
    // ---------------------------------------------------------------------------------------------

    fn resolve_action(&mut self, action: RaceAction) -> Result<ActionResolution> {
        let vehicle = self.selected_vehicle.as_mut().ok_or_else(|| {
            RaceError::InvalidState("No vehicle in an active race".to_owned())
        })?;

        match action {
            RaceAction::SpeedUp => {
                vehicle.set_speed(vehicle.cur_speed() + SPEED_UP_STEP);
                if let Err(e) = vehicle.consume_fuel(SPEED_UP_FUEL_MULT) {
                    return Ok(ActionResolution::FuelExhausted(e));
                }
            }
            RaceAction::MaintainSpeed => {
                if let Err(e) = vehicle.consume_fuel(MAINTAIN_FUEL_MULT) {
                    return Ok(ActionResolution::FuelExhausted(e));
                }
            }
            RaceAction::PitStop => {
                if vehicle.is_near_full(PIT_FUEL_THRESHOLD) {
                    return Err(RaceError::Precondition(
                        "Cannot pit stop - fuel tank is already full".to_owned(),
                    ));
                }
                vehicle.refuel();
                vehicle.set_speed(0);
            }
        }

        self.time_remaining -= action.time_cost();
        Ok(ActionResolution::Resolved)
    }

    fn update_race_state(&mut self) {
        let cur_speed = self.selected_vehicle.as_ref().map_or(0, |v| v.cur_speed());

        if cur_speed > 0 {
            let lap_completed = self.circuit.advance_progress(cur_speed);

            if lap_completed && !self.circuit.is_race_completed() {
                let compl_lap = self.circuit.cur_lap() - 1;
                self.race_log
                    .log_action(&format!("Lap {} completed!", compl_lap));
                info!(lap = compl_lap, "Lap completed");
            }
        }

        self.update_positions();
        self.check_race_conditions();
    }

    /// The method moves the AI competitors and ranks all participants by total progress. Equal
    /// progress keeps the roster order.
    pub fn update_positions(&mut self) {
        let cur_lap = self.circuit.cur_lap();
        let lap_progress = self.circuit.lap_progress();
        let race_active = self.sh.is_active();

        for participant in self.participants.iter_mut() {
            if participant.is_player {
                participant.cur_lap = cur_lap;
                participant.lap_progress = lap_progress;
            } else if race_active {
                participant.advance_ai(self.ai_progress.next_increment());
            }
        }

        let total_progress: Vec<f64> = self
            .participants
            .iter()
            .map(|p| p.get_total_progress())
            .collect();

        for (rank, &idx) in argsort(&total_progress, SortOrder::Descending)
            .iter()
            .enumerate()
        {
            self.participants[idx].position = rank as u32 + 1;
        }
    }

    fn check_race_conditions(&mut self) {
        let cur_fuel = self.selected_vehicle.as_ref().map_or(0.0, |v| v.cur_fuel());

        if let Some(outcome) = StateHandler::check_state_transition(
            self.circuit.is_race_completed(),
            self.time_remaining,
            cur_fuel,
        ) {
            self.end_race(outcome);
        }
    }

    fn end_race(&mut self, outcome: RaceOutcome) {
        if self.sh.end_race(outcome) {
            info!(
                result = outcome.message(),
                position = %self.player_position_label(),
                no_turns = self.no_turns,
                "Race ended"
            );
        }
    }

    // ---------------------------------------------------------------------------------------------
    // OUTPUT --------------------------------------------------------------------------------------
    // ---------------------------------------------------------------------------------------------

    /// The method returns the final result, `None` while the race has not ended.
    pub fn race_result(&self) -> Option<RaceResult> {
        let outcome = self.sh.outcome()?;
        let vehicle = self.selected_vehicle.as_ref()?;

        let mut standings: Vec<StandingEntry> = self
            .participants
            .iter()
            .map(|p| StandingEntry {
                position: p.position,
                name: p.name.to_owned(),
                is_player: p.is_player,
                cur_lap: p.cur_lap,
                lap_progress: p.lap_progress,
            })
            .collect();
        standings.sort_by_key(|entry| entry.position);

        Some(RaceResult {
            vehicle_name: vehicle.name.to_owned(),
            outcome,
            tot_no_laps: self.circuit.tot_no_laps,
            compl_laps: (self.circuit.cur_lap() - 1).min(self.circuit.tot_no_laps),
            time_remaining: self.time_remaining,
            fuel_remaining: vehicle.cur_fuel(),
            no_turns: self.no_turns,
            standings,
            log: self.race_log.lines(),
        })
    }

    /// The method collects everything a front end displays.
    pub fn snapshot(&self) -> RaceSnapshot {
        let vehicle = self.selected_vehicle.as_ref();

        RaceSnapshot {
            is_active: self.sh.is_active(),
            vehicle_name: vehicle.map(|v| v.name.to_owned()),
            display_lap: self.circuit.display_lap(),
            tot_no_laps: self.circuit.tot_no_laps,
            lap_progress: self.circuit.lap_progress(),
            overall_progress: self.circuit.overall_progress(),
            time_remaining: self.time_remaining,
            time_percentage: self.time_percentage(),
            cur_fuel: vehicle.map_or(0.0, |v| v.cur_fuel()),
            fuel_percentage: vehicle.map_or(0.0, |v| v.fuel_percentage()),
            cur_speed: vehicle.map_or(0, |v| v.cur_speed()),
            position_label: self.player_position_label(),
            result_message: self.result_message().to_owned(),
            log_text: self.get_action_log_text(),
            last_error: None,
            final_result: self.race_result(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::participant::FixedProgress;
    use crate::core::race_log::FixedClock;
    use crate::core::vehicle::{VehicleCategory, VehiclePars};
    use approx::assert_relative_eq;

    fn test_engine(race_pars: &RacePars, ai_increment: f64) -> RaceEngine {
        RaceEngine::new(
            race_pars,
            Box::new(FixedClock("10:00:00".to_owned())),
            Box::new(FixedProgress::new(vec![ai_increment])),
        )
    }

    fn started_engine(vehicle_idx: usize) -> RaceEngine {
        let mut engine = test_engine(&RacePars::default(), 10.0);
        engine.select_vehicle_by_index(vehicle_idx).unwrap();
        engine.start_race().unwrap();
        engine
    }

    #[test]
    fn new_engine_is_idle() {
        let engine = test_engine(&RacePars::default(), 10.0);
        assert_eq!(engine.status(), RaceStatus::Idle);
        assert_eq!(engine.vehicles().len(), 5);
        assert_eq!(engine.participants().len(), 4);
        assert_eq!(engine.participants().iter().filter(|p| p.is_player).count(), 1);
        assert_relative_eq!(engine.time_remaining(), 300.0);
        assert_eq!(engine.result_message(), "");
    }

    #[test]
    fn start_without_vehicle_fails() {
        let mut engine = test_engine(&RacePars::default(), 10.0);
        assert!(matches!(
            engine.start_race(),
            Err(RaceError::Precondition(_))
        ));
        assert_eq!(engine.status(), RaceStatus::Idle);
    }

    #[test]
    fn action_before_start_fails() {
        let mut engine = test_engine(&RacePars::default(), 10.0);
        engine.select_vehicle_by_index(0).unwrap();
        assert!(matches!(
            engine.execute_action(RaceAction::SpeedUp),
            Err(RaceError::InvalidState(_))
        ));
    }

    #[test]
    fn select_out_of_range_fails() {
        let mut engine = test_engine(&RacePars::default(), 10.0);
        assert!(matches!(
            engine.select_vehicle_by_index(5),
            Err(RaceError::Precondition(_))
        ));
    }

    #[test]
    fn select_during_race_fails() {
        let mut engine = started_engine(0);
        let other = engine.vehicles()[1].clone();
        assert!(matches!(
            engine.select_vehicle(other),
            Err(RaceError::InvalidState(_))
        ));
    }

    #[test]
    fn start_race_logs_vehicle() {
        let engine = started_engine(1);
        assert_eq!(
            engine.get_action_log_text(),
            "10:00:00 - Race started with Mater"
        );
    }

    #[test]
    fn speed_up_is_capped_at_max_speed() {
        // Mater: max speed 90
        let mut engine = started_engine(1);
        for _ in 0..5 {
            engine.execute_action(RaceAction::SpeedUp).unwrap();
        }
        assert_eq!(engine.selected_vehicle().unwrap().cur_speed(), 90);
    }

    #[test]
    fn maintain_speed_keeps_speed() {
        let mut engine = started_engine(0);
        engine.execute_action(RaceAction::SpeedUp).unwrap();
        engine.execute_action(RaceAction::MaintainSpeed).unwrap();

        let vehicle = engine.selected_vehicle().unwrap();
        assert_eq!(vehicle.cur_speed(), 20);
        assert_relative_eq!(vehicle.cur_fuel(), 40.0);
        assert_relative_eq!(engine.time_remaining(), 292.0);
        assert_relative_eq!(engine.circuit().lap_progress(), 80.0);
    }

    #[test]
    fn pit_stop_refuels_and_stops_the_car() {
        let mut engine = started_engine(0);
        engine.execute_action(RaceAction::SpeedUp).unwrap();
        engine.execute_action(RaceAction::SpeedUp).unwrap();
        engine.execute_action(RaceAction::PitStop).unwrap();

        let vehicle = engine.selected_vehicle().unwrap();
        assert_eq!(vehicle.cur_speed(), 0);
        assert_relative_eq!(vehicle.cur_fuel(), 65.0);
        assert_relative_eq!(engine.time_remaining(), 300.0 - 5.0 - 5.0 - 15.0);
        assert!(engine.get_action_log_text().ends_with("Pit stop completed"));
    }

    #[test]
    fn pit_stop_on_full_tank_is_refused() {
        let mut engine = started_engine(0);
        let log_before = engine.get_action_log_text();

        let err = engine.execute_action(RaceAction::PitStop).unwrap_err();
        assert_eq!(
            err,
            RaceError::Precondition("Cannot pit stop - fuel tank is already full".to_owned())
        );
        assert!(engine.is_active());
        assert_relative_eq!(engine.time_remaining(), 300.0);
        assert_eq!(engine.get_action_log_text(), log_before);
    }

    #[test]
    fn lap_completion_is_logged() {
        // speed 20, 40, 60 -> progress 40, 120, 240: laps close on the second and third turn
        let mut engine = started_engine(0);
        for _ in 0..3 {
            engine.execute_action(RaceAction::SpeedUp).unwrap();
        }
        assert_eq!(engine.circuit().cur_lap(), 3);
        assert!(engine.get_action_log_text().contains("Lap 1 completed!"));
    }

    #[test]
    fn failed_fuel_consumption_ends_race() {
        let mut pars = RacePars::default();
        pars.vehicle_pars_all = vec![VehiclePars {
            name: "Thirsty".to_owned(),
            category: VehicleCategory::RaceCar,
            max_speed: 100,
            fuel_rate: 10.0,
            max_fuel: 25.0,
        }];
        let mut engine = test_engine(&pars, 10.0);
        engine.select_vehicle_by_index(0).unwrap();
        engine.start_race().unwrap();

        // 25 -> 10
        engine.execute_action(RaceAction::SpeedUp).unwrap();
        assert!(engine.is_active());

        // 15 needed, 10 available
        engine.execute_action(RaceAction::SpeedUp).unwrap();
        assert_eq!(
            engine.status(),
            RaceStatus::Ended(RaceOutcome::FuelExhausted)
        );
        assert_eq!(engine.result_message(), "Out of fuel!");
        assert_relative_eq!(engine.selected_vehicle().unwrap().cur_fuel(), 10.0);
        // the failed action costs no time
        assert_relative_eq!(engine.time_remaining(), 295.0);
        assert!(engine
            .get_action_log_text()
            .contains("Action failed: Insufficient fuel"));
    }

    #[test]
    fn empty_tank_after_action_ends_race() {
        let mut pars = RacePars::default();
        pars.vehicle_pars_all = vec![VehiclePars {
            name: "Exact".to_owned(),
            category: VehicleCategory::EcoCar,
            max_speed: 100,
            fuel_rate: 10.0,
            max_fuel: 20.0,
        }];
        let mut engine = test_engine(&pars, 10.0);
        engine.select_vehicle_by_index(0).unwrap();
        engine.start_race().unwrap();

        engine.execute_action(RaceAction::MaintainSpeed).unwrap();
        engine.execute_action(RaceAction::MaintainSpeed).unwrap();
        assert_eq!(engine.status(), RaceStatus::Ended(RaceOutcome::OutOfFuel));
        assert_eq!(engine.result_message(), "Out of fuel! Race over.");
    }

    #[test]
    fn race_completion_wins() {
        let mut pars = RacePars::default();
        pars.circuit_pars.tot_no_laps = 1;
        let mut engine = test_engine(&pars, 10.0);
        engine.select_vehicle_by_index(0).unwrap();
        engine.start_race().unwrap();

        // progress 40, 120 -> lap 2 > 1 lap
        engine.execute_action(RaceAction::SpeedUp).unwrap();
        engine.execute_action(RaceAction::SpeedUp).unwrap();
        assert_eq!(engine.status(), RaceStatus::Ended(RaceOutcome::Won));
        assert_eq!(engine.result_message(), "Race completed! You won!");
        // the closing lap of the race is not logged as a regular lap
        assert!(!engine.get_action_log_text().contains("Lap 1 completed!"));
    }

    #[test]
    fn completion_beats_time_up() {
        let mut pars = RacePars::with_max_time(8.0);
        pars.circuit_pars.tot_no_laps = 1;
        let mut engine = test_engine(&pars, 10.0);
        engine.select_vehicle_by_index(0).unwrap();
        engine.start_race().unwrap();

        engine.execute_action(RaceAction::SpeedUp).unwrap();
        engine.execute_action(RaceAction::SpeedUp).unwrap();
        assert!(engine.time_remaining() <= 0.0);
        assert_eq!(engine.status(), RaceStatus::Ended(RaceOutcome::Won));
    }

    #[test]
    fn action_after_end_fails() {
        let mut engine = started_engine(0);
        for _ in 0..600 {
            engine.tick(0.5).unwrap();
        }
        assert!(!engine.is_active());
        assert!(matches!(
            engine.execute_action(RaceAction::MaintainSpeed),
            Err(RaceError::InvalidState(_))
        ));
    }

    #[test]
    fn tick_is_ignored_while_idle() {
        let mut engine = test_engine(&RacePars::default(), 10.0);
        engine.tick(0.5).unwrap();
        assert_relative_eq!(engine.time_remaining(), 300.0);
    }

    #[test]
    fn tick_decrements_time() {
        let mut engine = started_engine(0);
        engine.tick(0.5).unwrap();
        engine.tick(0.5).unwrap();
        assert_relative_eq!(engine.time_remaining(), 299.0);
        assert_relative_eq!(engine.time_percentage(), 299.0 / 300.0 * 100.0);
    }

    #[test]
    fn standings_follow_total_progress() {
        // AI gains 14 per turn, player 40 on the first turn
        let mut engine = test_engine(&RacePars::default(), 14.0);
        engine.select_vehicle_by_index(0).unwrap();
        engine.start_race().unwrap();
        engine.execute_action(RaceAction::SpeedUp).unwrap();

        assert_eq!(engine.player_position_label(), "1st");
        let positions: Vec<u32> = engine.participants().iter().map(|p| p.position).collect();
        // AI competitors are tied and keep roster order
        assert_eq!(positions, vec![1, 2, 3, 4]);
    }

    #[test]
    fn player_falls_back_when_standing_still() {
        let mut engine = started_engine(0);
        engine.execute_action(RaceAction::MaintainSpeed).unwrap();

        // player has no speed, every AI competitor moved 10
        assert_eq!(engine.player_position_label(), "4th");
        let mut positions: Vec<u32> = engine.participants().iter().map(|p| p.position).collect();
        positions.sort_unstable();
        assert_eq!(positions, vec![1, 2, 3, 4]);
    }

    #[test]
    fn restart_resets_race_entities() {
        let mut engine = started_engine(0);
        for _ in 0..4 {
            engine.execute_action(RaceAction::SpeedUp).unwrap();
        }
        engine.start_race().unwrap();

        assert!(engine.is_active());
        assert_eq!(engine.circuit().cur_lap(), 1);
        assert_relative_eq!(engine.circuit().lap_progress(), 0.0);
        assert_relative_eq!(engine.time_remaining(), 300.0);
        assert!(engine
            .participants()
            .iter()
            .all(|p| p.cur_lap == 1 && p.lap_progress == 0.0 && p.position == 1));
    }

    #[test]
    fn race_result_after_end() {
        let mut engine = started_engine(0);
        assert!(engine.race_result().is_none());

        for _ in 0..600 {
            engine.tick(0.5).unwrap();
        }

        let result = engine.race_result().unwrap();
        assert_eq!(result.outcome, RaceOutcome::TimeUp);
        assert_eq!(result.vehicle_name, "Lightning McQueen");
        assert_eq!(result.standings.len(), 4);
        assert_eq!(result.standings[0].position, 1);
        assert_eq!(result.player_position(), Some(4));
    }

    #[test]
    fn parse_actions() {
        assert_eq!("s".parse::<RaceAction>().unwrap(), RaceAction::SpeedUp);
        assert_eq!(
            "Maintain".parse::<RaceAction>().unwrap(),
            RaceAction::MaintainSpeed
        );
        assert_eq!("pit stop".parse::<RaceAction>().unwrap(), RaceAction::PitStop);
        assert!("brake".parse::<RaceAction>().is_err());
    }
}
