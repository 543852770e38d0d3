pub mod race_interface;
