pub mod files;
pub mod settings;

pub use files::{config_file, log_file};
pub use settings::{load_settings, save_settings, Overrides, Settings};
