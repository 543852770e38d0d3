use std::collections::VecDeque;

pub const LOG_CAPACITY: usize = 10;

/// Clock provides the wall-clock time stamped on log entries.
pub trait Clock: std::fmt::Debug {
    /// Current time of day formatted as HH:MM:SS.
    fn time_of_day(&self) -> String;
}

/// SystemClock reads the local time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn time_of_day(&self) -> String {
        chrono::Local::now().format("%H:%M:%S").to_string()
    }
}

/// FixedClock always reports the same time.
#[derive(Debug, Clone)]
pub struct FixedClock(pub String);

impl Clock for FixedClock {
    fn time_of_day(&self) -> String {
        self.0.to_owned()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    pub timestamp: String,
    pub message: String,
}

impl LogEntry {
    pub fn text(&self) -> String {
        format!("{} - {}", self.timestamp, self.message)
    }
}

/// RaceLog keeps the most recent race events, the oldest are dropped first.
#[derive(Debug)]
pub struct RaceLog {
    entries: VecDeque<LogEntry>,
    clock: Box<dyn Clock + Send>,
}

impl RaceLog {
    pub fn new(clock: Box<dyn Clock + Send>) -> RaceLog {
        RaceLog {
            entries: VecDeque::with_capacity(LOG_CAPACITY + 1),
            clock,
        }
    }

    pub fn log_action(&mut self, message: &str) {
        self.entries.push_back(LogEntry {
            timestamp: self.clock.time_of_day(),
            message: message.to_owned(),
        });

        while self.entries.len() > LOG_CAPACITY {
            self.entries.pop_front();
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries as text lines, newest last.
    pub fn lines(&self) -> Vec<String> {
        self.entries.iter().map(|entry| entry.text()).collect()
    }

    pub fn get_action_log_text(&self) -> String {
        self.lines().join("\n")
    }
}
