use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RaceOutcome {
    Won,
    TimeUp,
    /// Tank ran dry after an action.
    OutOfFuel,
    /// An action needed more fuel than was left in the tank.
    FuelExhausted,
}

impl RaceOutcome {
    pub fn message(&self) -> &'static str {
        match self {
            RaceOutcome::Won => "Race completed! You won!",
            RaceOutcome::TimeUp => "Time's up! Race over.",
            RaceOutcome::OutOfFuel => "Out of fuel! Race over.",
            RaceOutcome::FuelExhausted => "Out of fuel!",
        }
    }
}

impl fmt::Display for RaceOutcome {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RaceStatus {
    #[default]
    Idle,
    Active,
    Ended(RaceOutcome),
}

/// StateHandler tracks the lifecycle of one race: Idle -> Active -> Ended.
#[derive(Debug, Default)]
pub struct StateHandler {
    status: RaceStatus,
}

impl StateHandler {
    pub fn status(&self) -> RaceStatus {
        self.status
    }

    pub fn is_active(&self) -> bool {
        matches!(self.status, RaceStatus::Active)
    }

    pub fn outcome(&self) -> Option<RaceOutcome> {
        match self.status {
            RaceStatus::Ended(outcome) => Some(outcome),
            _ => None,
        }
    }

    /// Result message, empty unless the race has ended.
    pub fn result_message(&self) -> &'static str {
        self.outcome().map_or("", |outcome| outcome.message())
    }

    /// act_race (re)starts the race. The caller is responsible for resetting the race entities.
    pub fn act_race(&mut self) {
        self.status = RaceStatus::Active;
    }

    /// end_race ends an active race. Returns false if the race was not active, in which case the
    /// first outcome is kept.
    pub fn end_race(&mut self, outcome: RaceOutcome) -> bool {
        if !self.is_active() {
            return false;
        }
        self.status = RaceStatus::Ended(outcome);
        true
    }

    /// check_state_transition evaluates the end conditions in priority order: completed race, time
    /// exhausted, empty tank.
    pub fn check_state_transition(
        race_completed: bool,
        time_remaining: f64,
        cur_fuel: f64,
    ) -> Option<RaceOutcome> {
        if race_completed {
            Some(RaceOutcome::Won)
        } else if time_remaining <= 0.0 {
            Some(RaceOutcome::TimeUp)
        } else if cur_fuel <= 0.0 {
            Some(RaceOutcome::OutOfFuel)
        } else {
            None
        }
    }
}
