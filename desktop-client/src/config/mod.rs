mod main_config;

pub(crate) use common::config::{ConfigManager, FileContentConfigProvider};

pub use main_config::{get_config_manager, Config};
