pub mod config;
pub mod generate;
pub mod servers;
pub mod session;
pub mod spec;
pub mod task;
