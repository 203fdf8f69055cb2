//! Engine module: hashing, listing, baseline persistence, reconciliation, notification

pub mod arg_parser;
pub mod cli;
pub mod db_ops;
pub mod hashing;
pub mod listing;
pub mod notify;
pub mod reconcile;
pub mod tools;

// Re-export commonly used functions
pub use arg_parser::Cli;
pub use cli::{build_opts, handle_run, publish_report};
pub use db_ops::{Baseline, SqliteBaseline};
pub use hashing::{hash_bytes, hash_file};
pub use listing::list_dir_by_size;
pub use notify::{Notifier, SmtpNotifier, notify_verdict};
pub use reconcile::{reconcile, reconcile_one};
pub use tools::{check_root_dir, excluded_paths_for, is_excluded, path_to_db_string};
