use crate::core::circuit::CircuitPars;
use crate::core::vehicle::{VehicleCategory, VehiclePars};
use anyhow::Context;
use helpers::general::InputValueError;
use serde::{Deserialize, Serialize};
use std::fs::OpenOptions;
use std::path::Path;

/// * `interval` - (s) Wall-clock interval between two ticks of the race clock
/// * `decrement` - (s) Race time removed from the budget by one tick
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct TickPars {
    pub interval: f64,
    pub decrement: f64,
}

impl Default for TickPars {
    fn default() -> Self {
        TickPars {
            interval: 1.0,
            decrement: 0.5,
        }
    }
}

/// * `max_time` - (s) Time budget of one race
/// * `circuit_pars` - Lap count and lap distance
/// * `vehicle_pars_all` - Vehicle catalog the player chooses from
/// * `player_name` - Name of the player in the standings
/// * `ai_names` - Names of the AI competitors
/// * `tick_pars` - Settings of the race clock
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct RacePars {
    #[serde(default = "default_max_time")]
    pub max_time: f64,
    #[serde(default)]
    pub circuit_pars: CircuitPars,
    #[serde(default = "default_vehicle_pars_all")]
    pub vehicle_pars_all: Vec<VehiclePars>,
    #[serde(default = "default_player_name")]
    pub player_name: String,
    #[serde(default = "default_ai_names")]
    pub ai_names: Vec<String>,
    #[serde(default)]
    pub tick_pars: TickPars,
}

fn default_max_time() -> f64 {
    300.0
}

fn default_player_name() -> String {
    "You".to_owned()
}

fn default_ai_names() -> Vec<String> {
    vec![
        "Speed Racer".to_owned(),
        "Lightning McQueen".to_owned(),
        "Turbo Tom".to_owned(),
    ]
}

fn vehicle_pars(
    category: VehicleCategory,
    name: &str,
    max_speed: u32,
    fuel_rate: f64,
    max_fuel: f64,
) -> VehiclePars {
    VehiclePars {
        name: name.to_owned(),
        category,
        max_speed,
        fuel_rate,
        max_fuel,
    }
}

fn default_vehicle_pars_all() -> Vec<VehiclePars> {
    vec![
        vehicle_pars(VehicleCategory::RaceCar, "Lightning McQueen", 160, 10.0, 65.0),
        vehicle_pars(VehicleCategory::EcoCar, "Mater", 90, 5.0, 90.0),
        vehicle_pars(VehicleCategory::SportsCar, "Sally Carrera", 140, 8.5, 60.0),
        vehicle_pars(VehicleCategory::SportsCar, "Doc Hudson", 130, 7.5, 70.0),
        vehicle_pars(VehicleCategory::EcoCar, "Ramone", 110, 6.0, 75.0),
    ]
}

impl Default for RacePars {
    fn default() -> Self {
        RacePars {
            max_time: default_max_time(),
            circuit_pars: CircuitPars::default(),
            vehicle_pars_all: default_vehicle_pars_all(),
            player_name: default_player_name(),
            ai_names: default_ai_names(),
            tick_pars: TickPars::default(),
        }
    }
}

impl RacePars {
    /// Default parameters with a custom time budget.
    pub fn with_max_time(max_time: f64) -> RacePars {
        RacePars {
            max_time,
            ..RacePars::default()
        }
    }

    /// check_pars rejects parameter sets the race cannot be run with.
    pub fn check_pars(&self) -> Result<(), InputValueError> {
        if !(self.max_time > 0.0) {
            return Err(InputValueError::new("max_time must be positive"));
        }

        if self.circuit_pars.tot_no_laps < 1 {
            return Err(InputValueError::new("tot_no_laps must be at least 1"));
        }

        if self.vehicle_pars_all.is_empty() {
            return Err(InputValueError::new("vehicle catalog is empty"));
        }

        for vehicle_pars in self.vehicle_pars_all.iter() {
            if !(vehicle_pars.max_fuel > 0.0) || vehicle_pars.fuel_rate < 0.0 {
                return Err(InputValueError::new(&format!(
                    "vehicle {} needs a positive tank capacity and a non-negative fuel rate",
                    vehicle_pars.name
                )));
            }
        }

        let tick_pars = &self.tick_pars;
        if !(tick_pars.interval > 0.0 && tick_pars.interval.is_finite())
            || !(tick_pars.decrement > 0.0 && tick_pars.decrement.is_finite())
        {
            return Err(InputValueError::new(
                "tick interval and decrement must be positive and finite",
            ));
        }

        Ok(())
    }

    /// check_vehicle_idx rejects indices outside of the vehicle catalog.
    pub fn check_vehicle_idx(&self, idx: usize) -> Result<(), InputValueError> {
        if idx >= self.vehicle_pars_all.len() {
            return Err(InputValueError::new(&format!(
                "vehicle index {} is out of range (catalog holds {})",
                idx,
                self.vehicle_pars_all.len()
            )));
        }
        Ok(())
    }
}

/// read_race_pars reads the JSON file and decodes the JSON string into the race parameters
/// struct. Missing fields fall back to the built-in defaults.
pub fn read_race_pars(filepath: &Path) -> anyhow::Result<RacePars> {
    let fh = OpenOptions::new()
        .read(true)
        .open(filepath)
        .context(format!(
            "Failed to open parameter file {}!",
            filepath.display()
        ))?;
    let pars: RacePars = serde_json::from_reader(&fh).context(format!(
        "Failed to parse parameter file {}!",
        filepath.display()
    ))?;
    pars.check_pars().context(format!(
        "Invalid parameters in file {}!",
        filepath.display()
    ))?;
    Ok(pars)
}
