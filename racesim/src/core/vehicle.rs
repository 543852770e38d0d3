use crate::error::{RaceError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VehicleCategory {
    SportsCar,
    EcoCar,
    RaceCar,
}

impl fmt::Display for VehicleCategory {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            VehicleCategory::SportsCar => "sports car",
            VehicleCategory::EcoCar => "eco car",
            VehicleCategory::RaceCar => "race car",
        };
        write!(f, "{}", name)
    }
}

/// * `name` - Vehicle name, e.g. Lightning McQueen
/// * `category` - Vehicle category
/// * `max_speed` - (km/h) Maximum speed
/// * `fuel_rate` - (l/action) Fuel consumed by one action at multiplier 1.0
/// * `max_fuel` - (l) Fuel tank capacity
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct VehiclePars {
    pub name: String,
    pub category: VehicleCategory,
    pub max_speed: u32,
    pub fuel_rate: f64,
    pub max_fuel: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Vehicle {
    pub name: String,
    pub category: VehicleCategory,
    max_speed: u32,
    fuel_rate: f64,
    max_fuel: f64,
    cur_fuel: f64,
    cur_speed: u32,
}

impl Vehicle {
    pub fn new(vehicle_pars: &VehiclePars) -> Vehicle {
        Vehicle {
            name: vehicle_pars.name.to_owned(),
            category: vehicle_pars.category,
            max_speed: vehicle_pars.max_speed,
            fuel_rate: vehicle_pars.fuel_rate,
            max_fuel: vehicle_pars.max_fuel,
            cur_fuel: vehicle_pars.max_fuel,
            cur_speed: 0,
        }
    }

    pub fn max_speed(&self) -> u32 {
        self.max_speed
    }

    pub fn fuel_rate(&self) -> f64 {
        self.fuel_rate
    }

    pub fn max_fuel(&self) -> f64 {
        self.max_fuel
    }

    pub fn cur_fuel(&self) -> f64 {
        self.cur_fuel
    }

    pub fn cur_speed(&self) -> u32 {
        self.cur_speed
    }

    /// The method sets the current speed, capped at the maximum speed of the vehicle.
    pub fn set_speed(&mut self, speed: u32) {
        self.cur_speed = speed.min(self.max_speed);
    }

    /// The method sets the current fuel level, clamped to the tank capacity.
    pub fn set_fuel(&mut self, fuel: f64) {
        self.cur_fuel = fuel.max(0.0).min(self.max_fuel);
    }

    /// The method burns `fuel_rate * multiplier` of fuel. If the tank holds less than that, the
    /// fuel level is left untouched and `InsufficientFuel` is returned.
    pub fn consume_fuel(&mut self, multiplier: f64) -> Result<()> {
        let required = self.fuel_rate * multiplier;

        if self.cur_fuel < required {
            return Err(RaceError::InsufficientFuel {
                required,
                available: self.cur_fuel,
            });
        }

        self.cur_fuel = (self.cur_fuel - required).max(0.0);
        Ok(())
    }

    pub fn refuel(&mut self) {
        self.cur_fuel = self.max_fuel;
    }

    pub fn fuel_percentage(&self) -> f64 {
        self.cur_fuel / self.max_fuel * 100.0
    }

    /// The method returns true if the tank is filled to at least `threshold` (fraction of the
    /// capacity).
    pub fn is_near_full(&self, threshold: f64) -> bool {
        self.cur_fuel >= self.max_fuel * threshold
    }

    /// Standing start with a full tank.
    pub fn reset(&mut self) {
        self.cur_speed = 0;
        self.cur_fuel = self.max_fuel;
    }
}
