//! SMTP credentials: env var, then `.env` in the audited directory.

use std::path::Path;

use crate::types::SmtpSettings;
use crate::utils::config::PackagePaths;

const PASSWORD_KEY: &str = "SMTP_PASSWORD";
const USERNAME_KEY: &str = "SMTP_USERNAME";
const FROM_KEY: &str = "SMTP_FROM";

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Fill SMTP password (and username/from, when set) from the environment.
/// Loads `.env` from `dir` first if present; existing env vars win over `.env`.
pub fn smtp_from_env(dir: &Path, smtp: &mut SmtpSettings) {
    let env_path = dir.join(".env");
    if env_path.is_file() {
        let _ = dotenvy::from_path(&env_path);
    }
    let paths = PackagePaths::get();
    if let Some(p) = non_empty_var(&paths.env_key(PASSWORD_KEY)) {
        smtp.password = Some(p);
    }
    if let Some(u) = non_empty_var(&paths.env_key(USERNAME_KEY)) {
        smtp.username = Some(u);
    }
    if let Some(f) = non_empty_var(&paths.env_key(FROM_KEY)) {
        smtp.from = Some(f);
    }
}
