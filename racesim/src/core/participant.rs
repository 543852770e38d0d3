use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Uniform};
use std::fmt;

/// ProgressSource yields the lap progress an AI competitor gains in one turn.
pub trait ProgressSource: fmt::Debug {
    fn next_increment(&mut self) -> f64;
}

/// RngProgress draws whole-numbered increments uniformly from [8, 15).
#[derive(Debug)]
pub struct RngProgress<R: Rng> {
    rng: R,
    distr: Uniform<u32>,
}

impl<R: Rng> RngProgress<R> {
    pub fn new(rng: R) -> Self {
        RngProgress {
            rng,
            distr: Uniform::new(8, 15),
        }
    }
}

impl RngProgress<ChaCha8Rng> {
    pub fn seeded(seed: u64) -> Self {
        RngProgress::new(ChaCha8Rng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        RngProgress::new(ChaCha8Rng::from_entropy())
    }
}

impl<R: Rng + fmt::Debug> ProgressSource for RngProgress<R> {
    fn next_increment(&mut self) -> f64 {
        self.distr.sample(&mut self.rng) as f64
    }
}

/// FixedProgress cycles through a given list of increments.
#[derive(Debug, Clone)]
pub struct FixedProgress {
    increments: Vec<f64>,
    idx: usize,
}

impl FixedProgress {
    pub fn new(increments: Vec<f64>) -> Self {
        FixedProgress { increments, idx: 0 }
    }
}

impl ProgressSource for FixedProgress {
    fn next_increment(&mut self) -> f64 {
        if self.increments.is_empty() {
            return 0.0;
        }
        let increment = self.increments[self.idx % self.increments.len()];
        self.idx += 1;
        increment
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Participant {
    pub name: String,
    pub is_player: bool,
    pub cur_lap: u32,
    pub lap_progress: f64,
    pub position: u32,
}

impl Participant {
    pub fn new(name: &str, is_player: bool) -> Participant {
        Participant {
            name: name.to_owned(),
            is_player,
            cur_lap: 1,
            lap_progress: 0.0,
            position: 1,
        }
    }

    /// Metric used for ranking: completed laps times 100 plus the progress in the current lap.
    pub fn get_total_progress(&self) -> f64 {
        (self.cur_lap - 1) as f64 * 100.0 + self.lap_progress
    }

    /// The method advances an AI competitor. Crossing the line starts the next lap at zero, i.e.
    /// any overflow is dropped.
    pub fn advance_ai(&mut self, increment: f64) {
        self.lap_progress += increment;

        if self.lap_progress >= 100.0 {
            self.lap_progress = 0.0;
            self.cur_lap += 1;
        }
    }

    pub fn reset(&mut self) {
        self.cur_lap = 1;
        self.lap_progress = 0.0;
        self.position = 1;
    }
}
