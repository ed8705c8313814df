pub mod cmd;
pub mod config_path;
pub mod output;
