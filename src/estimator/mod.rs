pub mod config;
pub mod kalman;
pub mod state;
