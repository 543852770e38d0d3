use crate::core::state_handler::RaceOutcome;
use serde::Serialize;
use std::fmt::Write;
use std::path::Path;

/// StandingEntry is one line of the final standings.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct StandingEntry {
    pub position: u32,
    pub name: String,
    pub is_player: bool,
    pub cur_lap: u32,
    pub lap_progress: f64,
}

/// RaceResult contains all race information that is required for post-processing the results.
#[derive(Debug, Serialize, Clone)]
pub struct RaceResult {
    pub vehicle_name: String,
    pub outcome: RaceOutcome,
    pub tot_no_laps: u32,
    pub compl_laps: u32,
    pub time_remaining: f64,
    pub fuel_remaining: f64,
    pub no_turns: u32,
    pub standings: Vec<StandingEntry>,
    pub log: Vec<String>,
}

impl RaceResult {
    pub fn player_position(&self) -> Option<u32> {
        self.standings
            .iter()
            .find(|entry| entry.is_player)
            .map(|entry| entry.position)
    }

    /// format_standings returns the result message followed by one line per participant and the
    /// last entries of the race log.
    pub fn format_standings(&self) -> Result<String, std::fmt::Error> {
        let mut tmp_string = String::new();

        writeln!(&mut tmp_string, "{}", self.outcome)?;
        writeln!(
            &mut tmp_string,
            "vehicle: {}, laps: {}/{}, turns: {}, time left: {:.1}s, fuel left: {:.1}",
            self.vehicle_name,
            self.compl_laps,
            self.tot_no_laps,
            self.no_turns,
            self.time_remaining,
            self.fuel_remaining
        )?;
        writeln!(&mut tmp_string, "pos, name, lap, progress")?;

        for entry in self.standings.iter() {
            let marker = if entry.is_player { "*" } else { " " };
            writeln!(
                &mut tmp_string,
                "{:3}{}, {}, {:3}, {:5.1}%",
                entry.position, marker, entry.name, entry.cur_lap, entry.lap_progress
            )?;
        }

        if !self.log.is_empty() {
            writeln!(&mut tmp_string, "log:")?;
            for line in self.log.iter() {
                writeln!(&mut tmp_string, "{}", line)?;
            }
        }

        Ok(tmp_string)
    }

    /// print_standings prints the resulting standings to the console output.
    pub fn print_standings(&self) {
        match self.format_standings() {
            Ok(standings) => {
                println!("RESULT: Standings");
                print!("{}", standings);
            }
            Err(e) => eprintln!("WARNING: Could not format standings: {}", e),
        }
    }

    /// write_standings_to_file writes the standings as CSV to the given path.
    pub fn write_standings_to_file(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(out_dir) = path.parent() {
            if !out_dir.as_os_str().is_empty() {
                std::fs::create_dir_all(out_dir)?;
            }
        }

        let mut writer = csv::Writer::from_path(path)?;
        for entry in self.standings.iter() {
            writer.serialize(entry)?;
        }
        writer.flush()?;
        Ok(())
    }
}
