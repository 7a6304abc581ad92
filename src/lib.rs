pub mod car;
pub mod config;
pub mod game_logic;
pub mod plugin;

pub use config::{ConfigError, RaceConfig};
pub use plugin::{RacePlugin, RaceTickSet};
