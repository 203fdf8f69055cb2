//! Command-line layer: option layering, config-file exclusion, report delivery.

use anyhow::{Result, anyhow};
use clap::Parser;
use hashwarden::engine::{Cli, Notifier, build_opts, handle_run, publish_report};
use hashwarden::pipeline::PoolSummary;
use hashwarden::utils::settings_toml::settings_path;
use hashwarden::utils::{WorkerLimits, load_settings_toml};
use hashwarden::{AuditReport, Opts, RunState, Verdict};
use std::cell::RefCell;
use std::io::{self, Write};
use std::path::Path;

fn parse(args: &[&str]) -> Cli {
    Cli::parse_from(std::iter::once("hashwarden").chain(args.iter().copied()))
}

fn opts_for(cli: &Cli) -> Opts {
    let config_path = settings_path(&cli.dir, cli.config.as_deref());
    let file = load_settings_toml(&config_path).unwrap();
    build_opts(cli, &config_path, file.as_ref())
}

fn write_config(dir: &Path, body: &str) {
    std::fs::write(dir.join(".hashwarden.toml"), body).unwrap();
}

fn s(p: &Path) -> &str {
    p.to_str().unwrap()
}

// --- option layering ---

#[test]
fn test_defaults_without_config_file() {
    let tmp = tempfile::tempdir().unwrap();
    let db = tmp.path().join("baseline.db");
    let opts = opts_for(&parse(&[s(&db), s(tmp.path())]));

    assert_eq!(opts.workers, WorkerLimits::DEFAULT_WORKERS);
    assert!(!opts.verbose);
    assert!(opts.recipient.is_none());
}

#[test]
fn test_config_file_applies_without_flags() {
    let tmp = tempfile::tempdir().unwrap();
    write_config(
        tmp.path(),
        "[settings]\nworkers = 5\nverbose = true\n\n[smtp]\nhost = \"mail.example.com\"\nport = 2525\n",
    );
    let db = tmp.path().join("baseline.db");
    let opts = opts_for(&parse(&[s(&db), s(tmp.path())]));

    assert_eq!(opts.workers, 5);
    assert!(opts.verbose);
    assert_eq!(opts.smtp.host, "mail.example.com");
    assert_eq!(opts.smtp.port, 2525);
}

#[test]
fn test_flags_override_config_file() {
    let tmp = tempfile::tempdir().unwrap();
    write_config(tmp.path(), "[settings]\nworkers = 5\nverbose = true\n");
    let db = tmp.path().join("baseline.db");
    let cli = parse(&[
        s(&db),
        s(tmp.path()),
        "ops@example.com",
        "--workers",
        "2",
        "--verbose",
        "false",
    ]);
    let opts = opts_for(&cli);

    assert_eq!(opts.workers, 2);
    assert!(!opts.verbose);
    assert_eq!(opts.recipient.as_deref(), Some("ops@example.com"));
}

#[test]
fn test_bare_verbose_flag_means_true() {
    let tmp = tempfile::tempdir().unwrap();
    let db = tmp.path().join("baseline.db");
    let opts = opts_for(&parse(&[s(&db), s(tmp.path()), "-v"]));
    assert!(opts.verbose);
}

#[test]
fn test_dotenv_overrides_config_file() {
    let tmp = tempfile::tempdir().unwrap();
    write_config(tmp.path(), "[smtp]\nusername = \"file-user\"\n");
    std::fs::write(
        tmp.path().join(".env"),
        "HASHWARDEN_SMTP_USERNAME=dotenv-user\n",
    )
    .unwrap();
    let db = tmp.path().join("baseline.db");
    let opts = opts_for(&parse(&[s(&db), s(tmp.path())]));

    assert_eq!(opts.smtp.username.as_deref(), Some("dotenv-user"));
}

#[test]
fn test_baseline_and_config_file_are_excluded() {
    let tmp = tempfile::tempdir().unwrap();
    let db = tmp.path().join("baseline.db");
    let opts = opts_for(&parse(&[s(&db), s(tmp.path())]));
    assert!(opts.exclude_paths.contains(&db));
    assert!(opts.exclude_paths.contains(&tmp.path().join(".hashwarden.toml")));

    let explicit = tmp.path().join("other.toml");
    std::fs::write(&explicit, "[settings]\nworkers = 3\n").unwrap();
    let opts = opts_for(&parse(&[s(&db), s(tmp.path()), "--config", s(&explicit)]));
    assert_eq!(opts.workers, 3);
    assert!(opts.exclude_paths.contains(&explicit));
}

// --- handle_run ---

#[test]
fn test_run_with_recipient_but_no_credentials_succeeds() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path().join("data");
    std::fs::create_dir(&root).unwrap();
    std::fs::write(root.join("a.txt"), b"x").unwrap();
    let db = tmp.path().join("baseline.db");

    let cli = parse(&[s(&db), s(&root), "ops@example.com"]);
    handle_run(&cli).unwrap();
    assert!(db.exists());
    // Second run hits the match path; still no credentials, still not fatal.
    handle_run(&cli).unwrap();
}

#[test]
fn test_run_with_missing_directory_creates_no_baseline() {
    let tmp = tempfile::tempdir().unwrap();
    let db = tmp.path().join("baseline.db");
    let cli = parse(&[s(&db), s(&tmp.path().join("missing"))]);

    assert!(handle_run(&cli).is_err());
    assert!(!db.exists());
    assert!(!tmp.path().join("baseline.db-wal").exists());
}

// --- publish_report ---

struct BrokenPipe;

impl Write for BrokenPipe {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
    }
}

#[derive(Default)]
struct RecordingNotifier {
    sent: RefCell<Vec<(String, String)>>,
}

impl Notifier for RecordingNotifier {
    fn send(&self, recipient: &str, subject: &str, _body: &str) -> Result<()> {
        self.sent
            .borrow_mut()
            .push((recipient.into(), subject.into()));
        Ok(())
    }
}

struct RefusingNotifier;

impl Notifier for RefusingNotifier {
    fn send(&self, _recipient: &str, _subject: &str, _body: &str) -> Result<()> {
        Err(anyhow!("connection refused"))
    }
}

fn new_files_report() -> AuditReport {
    let state = RunState {
        saw_new_file: true,
        inserted: 1,
        log: vec![
            "Inserted hash for d/a.txt: h1".to_string(),
            "0 files have passed the integrity tests".to_string(),
        ],
        ..Default::default()
    };
    AuditReport {
        verdict: state.verdict(),
        state,
        pool: PoolSummary::default(),
    }
}

#[test]
fn test_publish_prints_body() {
    let report = new_files_report();
    let mut out = Vec::new();
    publish_report::<_, RecordingNotifier>(&mut out, None, &report);
    assert_eq!(String::from_utf8(out).unwrap(), report.body());
}

#[test]
fn test_publish_notifies_after_failed_write() {
    let report = new_files_report();
    let notifier = RecordingNotifier::default();

    publish_report(&mut BrokenPipe, Some((&notifier, "ops@example.com")), &report);

    let sent = notifier.sent.borrow();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].0, "ops@example.com");
    assert_eq!(sent[0].1, Verdict::NewFiles.subject());
}

#[test]
fn test_publish_survives_refused_notification() {
    let report = new_files_report();
    let mut out = Vec::new();
    publish_report(&mut out, Some((&RefusingNotifier, "ops@example.com")), &report);
    assert!(!out.is_empty());
}
