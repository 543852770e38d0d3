pub mod circuit;
pub mod handle_race;
pub mod participant;
pub mod race_engine;
pub mod race_log;
pub mod state_handler;
pub mod strategy;
pub mod vehicle;
