//! Load `.hashwarden.toml` (CLI only). Library callers build [`Opts`] directly.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::Opts;
use crate::utils::config::PackagePaths;

#[derive(Debug, Default, Deserialize)]
pub struct SettingsToml {
    #[serde(default)]
    settings: RunSection,
    #[serde(default)]
    smtp: SmtpSection,
}

#[derive(Debug, Default, Deserialize)]
struct RunSection {
    workers: Option<usize>,
    verbose: Option<bool>,
}

/// No password here: it comes from the environment or `.env` only.
#[derive(Debug, Default, Deserialize)]
struct SmtpSection {
    host: Option<String>,
    port: Option<u16>,
    username: Option<String>,
    from: Option<String>,
}

/// Config file location: `explicit` when given, else `.hashwarden.toml` in `dir`.
pub fn settings_path(dir: &Path, explicit: Option<&Path>) -> PathBuf {
    explicit
        .map(Path::to_path_buf)
        .unwrap_or_else(|| dir.join(PackagePaths::get().config_filename()))
}

/// Parse the config at `path`. `Ok(None)` when the file does not exist; an error when it exists
/// but cannot be read or parsed (callers log it and carry on with defaults).
pub fn load_settings_toml(path: &Path) -> Result<Option<SettingsToml>> {
    let s = match std::fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e).with_context(|| format!("read {}", path.display())),
    };
    let parsed = parse_settings_toml(&s).with_context(|| format!("parse {}", path.display()))?;
    Ok(Some(parsed))
}

/// Overwrite opts field from file when present.
macro_rules! apply_file_opt {
    ($section:expr, $target:expr, $field:ident) => {
        if let Some(v) = $section.$field.clone() {
            $target.$field = v;
        }
    };
    ($section:expr, $target:expr, $field:ident => some) => {
        if let Some(v) = $section.$field.clone() {
            $target.$field = Some(v);
        }
    };
}

/// Apply file config to opts (only fields present in the file). Call before env and CLI.
pub fn apply_file_to_opts(file: &SettingsToml, opts: &mut Opts) {
    apply_file_opt!(file.settings, opts, workers);
    apply_file_opt!(file.settings, opts, verbose);
    apply_file_opt!(file.smtp, opts.smtp, host);
    apply_file_opt!(file.smtp, opts.smtp, port);
    apply_file_opt!(file.smtp, opts.smtp, username => some);
    apply_file_opt!(file.smtp, opts.smtp, from => some);
}

/// Parse config from a string (used by tests and callers that embed config).
pub fn parse_settings_toml(s: &str) -> Result<SettingsToml, toml::de::Error> {
    toml::from_str(s)
}
