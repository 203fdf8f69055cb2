pub mod config;
pub mod fd_limit;
pub mod logger;
pub mod secrets;
pub mod settings_toml;

pub use config::*;
pub use fd_limit::effective_workers;
pub use logger::{Colors, setup_logging};
pub use secrets::smtp_from_env;
pub use settings_toml::{apply_file_to_opts, load_settings_toml, parse_settings_toml};
