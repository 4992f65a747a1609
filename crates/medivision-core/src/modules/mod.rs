pub mod config;
pub mod logger;

pub use config::{get_data_dir, load_config, save_config, update_config};
pub use logger::init_logging;
