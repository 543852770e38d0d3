pub mod read_race_pars;
pub mod sim_opts;
