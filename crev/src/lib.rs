pub mod cli;
pub mod load_config;
pub mod review_client;

pub use cli::{run, Cli, Commands};
