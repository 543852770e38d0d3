use serde::{Deserialize, Serialize};

/// Progress points gained per unit of speed in one turn.
const PROGRESS_PER_SPEED: f64 = 2.0;

/// * `tot_no_laps` - Total number of laps, at least 1
/// * `lap_distance` - (km) Length of one lap (informational only)
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct CircuitPars {
    pub tot_no_laps: u32,
    pub lap_distance: f64,
}

impl Default for CircuitPars {
    fn default() -> Self {
        CircuitPars {
            tot_no_laps: 5,
            lap_distance: 10.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Circuit {
    pub tot_no_laps: u32,
    pub lap_distance: f64,
    cur_lap: u32,
    lap_progress: f64,
}

impl Circuit {
    pub fn new(circuit_pars: &CircuitPars) -> Circuit {
        Circuit {
            tot_no_laps: circuit_pars.tot_no_laps,
            lap_distance: circuit_pars.lap_distance,
            cur_lap: 1,
            lap_progress: 0.0,
        }
    }

    pub fn cur_lap(&self) -> u32 {
        self.cur_lap
    }

    /// (%) Progress within the current lap, always in [0, 100).
    pub fn lap_progress(&self) -> f64 {
        self.lap_progress
    }

    /// The method places the car at the given lap and in-lap progress. Progress of 100 or more is
    /// renormalized into following laps.
    pub fn set_position(&mut self, cur_lap: u32, lap_progress: f64) {
        self.cur_lap = cur_lap.max(1);
        self.lap_progress = lap_progress.max(0.0);

        while self.lap_progress >= 100.0 {
            self.lap_progress -= 100.0;
            self.cur_lap += 1;
        }
    }

    pub fn reset(&mut self) {
        self.cur_lap = 1;
        self.lap_progress = 0.0;
    }

    /// The method moves the car forward according to its speed and returns true if a lap was
    /// completed in this step. Overflow beyond 100% is carried into the next lap.
    pub fn advance_progress(&mut self, speed: u32) -> bool {
        self.lap_progress += speed as f64 * PROGRESS_PER_SPEED;

        if self.lap_progress >= 100.0 {
            // at most one lap per step, the remainder stays below 100%
            self.lap_progress = (self.lap_progress - 100.0) % 100.0;
            self.cur_lap += 1;
            return true;
        }
        false
    }

    /// The race counts as completed only once the lap counter is beyond the last lap.
    pub fn is_race_completed(&self) -> bool {
        self.cur_lap > self.tot_no_laps
    }

    /// (%) Share of the whole race distance covered so far.
    pub fn overall_progress(&self) -> f64 {
        if self.is_race_completed() {
            return 100.0;
        }

        let compl_laps = (self.cur_lap - 1) as f64;
        (compl_laps + self.lap_progress / 100.0) / self.tot_no_laps as f64 * 100.0
    }

    /// Lap number to display, which stays at the last lap once the race is completed.
    pub fn display_lap(&self) -> u32 {
        if self.is_race_completed() {
            self.tot_no_laps
        } else {
            self.cur_lap
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn circuit(tot_no_laps: u32) -> Circuit {
        Circuit::new(&CircuitPars {
            tot_no_laps,
            lap_distance: 10.0,
        })
    }

    #[test]
    fn advance_below_lap_end() {
        let mut circuit = circuit(5);
        assert!(!circuit.advance_progress(20));
        assert_eq!(circuit.cur_lap(), 1);
        assert_relative_eq!(circuit.lap_progress(), 40.0);
    }

    #[test]
    fn advance_exactly_to_lap_end_completes_lap() {
        let mut circuit = circuit(5);
        assert!(circuit.advance_progress(50));
        assert_eq!(circuit.cur_lap(), 2);
        assert_relative_eq!(circuit.lap_progress(), 0.0);
    }

    #[test]
    fn advance_carries_overflow_into_next_lap() {
        let mut circuit = circuit(5);
        circuit.set_position(1, 80.0);
        assert!(circuit.advance_progress(25));
        assert_eq!(circuit.cur_lap(), 2);
        assert_relative_eq!(circuit.lap_progress(), 30.0);
    }

    #[test]
    fn progress_stays_below_one_hundred() {
        let mut circuit = circuit(50);
        for speed in (0..=160).step_by(20) {
            let lap_before = circuit.cur_lap();
            let expect_lap = circuit.lap_progress() + 2.0 * speed as f64 >= 100.0;
            let lap_completed = circuit.advance_progress(speed);

            assert_eq!(lap_completed, expect_lap);
            assert_eq!(circuit.cur_lap() - lap_before, lap_completed as u32);
            assert!(circuit.lap_progress() >= 0.0 && circuit.lap_progress() < 100.0);
        }
    }

    #[test]
    fn fast_step_completes_one_lap() {
        let mut circuit = circuit(5);
        circuit.set_position(1, 40.0);
        assert!(circuit.advance_progress(160));
        assert_eq!(circuit.cur_lap(), 2);
        assert_relative_eq!(circuit.lap_progress(), 60.0);
    }

    #[test]
    fn race_completed_only_beyond_last_lap() {
        let mut circuit = circuit(3);
        circuit.set_position(3, 90.0);
        assert!(!circuit.is_race_completed());

        circuit.set_position(4, 0.0);
        assert!(circuit.is_race_completed());
        assert_eq!(circuit.display_lap(), 3);

        // laps never decrease, so completion is sticky
        circuit.advance_progress(40);
        assert!(circuit.is_race_completed());
    }

    #[test]
    fn overall_progress() {
        let mut circuit = circuit(4);
        assert_relative_eq!(circuit.overall_progress(), 0.0);

        circuit.set_position(3, 50.0);
        assert_relative_eq!(circuit.overall_progress(), 62.5);

        circuit.set_position(5, 10.0);
        assert_relative_eq!(circuit.overall_progress(), 100.0);
    }

    #[test]
    fn reset_returns_to_start() {
        let mut circuit = circuit(3);
        circuit.set_position(2, 55.0);
        circuit.reset();
        assert_eq!(circuit.cur_lap(), 1);
        assert_relative_eq!(circuit.lap_progress(), 0.0);
    }
}
