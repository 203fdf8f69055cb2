//! Public and internal types for the hashwarden API and pipeline.

use std::fmt;
use std::path::PathBuf;

use crate::utils::config::WorkerLimits;

/// What a directory entry is, as reported by its own file type (links are not followed).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Dir,
    Symlink,
    Other,
}

/// One immediate child of the audited directory, as produced by
/// [`list_dir_by_size`](crate::engine::list_dir_by_size).
#[derive(Clone, Debug)]
pub struct ListedEntry {
    /// Joined path (`root/name`).
    pub path: PathBuf,
    /// Size in bytes; 0 when metadata could not be read.
    pub size: u64,
    pub kind: EntryKind,
}

/// Digest of one file, produced by a worker and consumed once by the reconciler.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HashResult {
    pub path: PathBuf,
    /// Lower-case hex blake3 digest.
    pub digest: String,
}

/// A file a worker could not hash. Returned through the worker's join handle.
#[derive(Clone, Debug)]
pub struct HashFailure {
    pub path: PathBuf,
    pub error: String,
}

/// Aggregate owned by the reconciler for the duration of one run.
#[derive(Clone, Debug, Default)]
pub struct RunState {
    pub saw_error: bool,
    pub saw_new_file: bool,
    /// Files whose digest matched the baseline.
    pub success_count: usize,
    pub inserted: usize,
    pub mismatched: usize,
    /// Lookup or insert failures.
    pub errors: usize,
    pub log: Vec<String>,
}

impl RunState {
    /// Final verdict from the accumulated flags.
    pub fn verdict(&self) -> Verdict {
        classify(self.saw_error, self.saw_new_file)
    }

    /// Full textual report: every log line, each newline-terminated.
    pub fn report(&self) -> String {
        let mut out = String::new();
        for line in &self.log {
            out.push_str(line);
            out.push('\n');
        }
        out
    }
}

/// Overall outcome of a run. Priority: error, then new files, then success.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    Error,
    NewFiles,
    Success,
}

impl Verdict {
    pub const ERROR_SUBJECT: &'static str = "Error detected while verifying integrity";
    pub const NEW_FILES_SUBJECT: &'static str = "New files found in the database";
    pub const SUCCESS_SUBJECT: &'static str = "Integrity check successful";

    /// Subject line used for the notification.
    pub fn subject(self) -> &'static str {
        match self {
            Verdict::Error => Self::ERROR_SUBJECT,
            Verdict::NewFiles => Self::NEW_FILES_SUBJECT,
            Verdict::Success => Self::SUCCESS_SUBJECT,
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.subject())
    }
}

/// First match wins: `saw_error` beats `saw_new_file`.
pub fn classify(saw_error: bool, saw_new_file: bool) -> Verdict {
    if saw_error {
        Verdict::Error
    } else if saw_new_file {
        Verdict::NewFiles
    } else {
        Verdict::Success
    }
}

/// SMTP settings for the notifier. Built once per run and passed explicitly.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SmtpSettings {
    pub host: String,
    pub port: u16,
    pub username: Option<String>,
    pub from: Option<String>,
    pub password: Option<String>,
}

impl Default for SmtpSettings {
    fn default() -> Self {
        Self {
            host: crate::utils::config::SmtpDefaults::HOST.to_string(),
            port: crate::utils::config::SmtpDefaults::PORT,
            username: None,
            from: None,
            password: None,
        }
    }
}

/// Full options for a run (CLI merges defaults, `.hashwarden.toml`, env, and flags into this).
#[derive(Clone, Debug)]
pub struct Opts {
    /// Requested worker count before the FD-limit cap.
    pub workers: usize,
    /// Debug logging and per-file listing of skipped files.
    pub verbose: bool,
    /// Paths never dispatched even if they sit inside the audited directory (baseline, config).
    pub exclude_paths: Vec<PathBuf>,
    /// Notification recipient. When None, no notification is sent.
    pub recipient: Option<String>,
    pub smtp: SmtpSettings,
}

impl Default for Opts {
    fn default() -> Self {
        Self {
            workers: WorkerLimits::DEFAULT_WORKERS,
            verbose: false,
            exclude_paths: Vec::new(),
            recipient: None,
            smtp: SmtpSettings::default(),
        }
    }
}
