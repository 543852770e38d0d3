use crate::post::race_result::RaceResult;

/// RaceSnapshot contains everything a front end needs to display the current race.
#[derive(Debug, Clone, Default)]
pub struct RaceSnapshot {
    pub is_active: bool,
    pub vehicle_name: Option<String>,

    // circuit
    pub display_lap: u32,
    pub tot_no_laps: u32,
    pub lap_progress: f64,
    pub overall_progress: f64,

    // budgets
    pub time_remaining: f64,
    pub time_percentage: f64,
    pub cur_fuel: f64,
    pub fuel_percentage: f64,
    pub cur_speed: u32,

    pub position_label: String,
    pub result_message: String,
    pub log_text: String,

    // message of a rejected command (set by the command loop)
    pub last_error: Option<String>,

    // final results payload (set once the race has ended)
    pub final_result: Option<RaceResult>,
}

impl RaceSnapshot {
    /// Compact single-line status, e.g. "Lap 2/5 |  35% | time 271.0s | fuel 44.0 | speed 40 | 1st".
    pub fn status_line(&self) -> String {
        format!(
            "Lap {}/{} | {:3.0}% | time {:.1}s | fuel {:.1} | speed {} | {}",
            self.display_lap,
            self.tot_no_laps,
            self.lap_progress,
            self.time_remaining,
            self.cur_fuel,
            self.cur_speed,
            self.position_label
        )
    }

    /// Newest entry of the race log, if any.
    pub fn last_log_line(&self) -> Option<&str> {
        self.log_text.lines().last()
    }
}
