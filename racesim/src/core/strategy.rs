use crate::core::race_engine::{RaceAction, RaceEngine, PIT_FUEL_THRESHOLD};

/// choose_action picks the next action for the autopilot: accelerate up to maximum speed, then
/// hold it, and pit as soon as the tank could not serve the next action without running dry.
pub fn choose_action(engine: &RaceEngine) -> RaceAction {
    let vehicle = match engine.selected_vehicle() {
        Some(vehicle) => vehicle,
        None => return RaceAction::MaintainSpeed,
    };

    let preferred = if vehicle.cur_speed() < vehicle.max_speed() {
        RaceAction::SpeedUp
    } else {
        RaceAction::MaintainSpeed
    };

    // an empty tank after the action ends the race as well
    let fuel_needed = vehicle.fuel_rate() * preferred.fuel_multiplier();
    if vehicle.cur_fuel() > fuel_needed || vehicle.is_near_full(PIT_FUEL_THRESHOLD) {
        preferred
    } else {
        RaceAction::PitStop
    }
}
