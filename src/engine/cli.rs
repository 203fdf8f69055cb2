//! CLI command handler: build options, run the audit, print the report, notify.

use anyhow::Result;
use log::{debug, error, warn};
use std::io::Write;
use std::path::Path;

use crate::Opts;
use crate::audit::{AuditReport, audit_entries, list_root};
use crate::engine::arg_parser::Cli;
use crate::engine::db_ops::SqliteBaseline;
use crate::engine::notify::{Notifier, SmtpNotifier, notify_verdict};
use crate::utils::settings_toml::{SettingsToml, settings_path};
use crate::utils::{apply_file_to_opts, load_settings_toml, setup_logging, smtp_from_env};

/// Merge defaults, config file, environment and flags (in that order) into [`Opts`].
pub fn build_opts(cli: &Cli, config_path: &Path, file: Option<&SettingsToml>) -> Opts {
    let mut opts = Opts::default();
    if let Some(file) = file {
        apply_file_to_opts(file, &mut opts);
    }
    smtp_from_env(&cli.dir, &mut opts.smtp);
    if let Some(workers) = cli.workers {
        opts.workers = workers;
    }
    if let Some(verbose) = cli.verbose {
        opts.verbose = verbose;
    }
    opts.recipient = cli.recipient.clone();
    opts.exclude_paths = vec![cli.baseline.clone(), config_path.to_path_buf()];
    opts
}

/// Run one audit. Setup failures (listing, opening or closing the baseline) are returned;
/// the verdict never affects the result. `DIR` is listed before the baseline is opened, so a
/// bad `DIR` never creates a baseline file.
pub fn handle_run(cli: &Cli) -> Result<()> {
    let config_path = settings_path(&cli.dir, cli.config.as_deref());
    let file = load_settings_toml(&config_path);
    let opts = build_opts(cli, &config_path, file.as_ref().ok().and_then(Option::as_ref));
    setup_logging(opts.verbose);
    if let Err(e) = &file {
        warn!("Ignoring config file: {:#}", e);
    }
    debug!("Options: {:?}", redacted(&opts));

    let entries = list_root(&cli.dir)?;
    let mut baseline = SqliteBaseline::open(&cli.baseline)?;
    let mut out = std::io::stdout().lock();
    let report = audit_entries(entries, &mut baseline, &opts, &mut out)?;

    let notifier = match opts.recipient.as_deref() {
        Some(recipient) => match SmtpNotifier::new(opts.smtp.clone()) {
            Ok(notifier) => Some((notifier, recipient)),
            Err(e) => {
                error!("Notification to {} not sent: {:#}", recipient, e);
                None
            }
        },
        None => None,
    };
    publish_report(
        &mut out,
        notifier.as_ref().map(|(n, r)| (n, *r)),
        &report,
    );
    drop(out);

    baseline.close()?;
    Ok(())
}

/// Print the report body to `out`, then send it to the recipient when a notifier is given.
/// A failed write (e.g. a closed pipe) is logged and the notification still goes out.
pub fn publish_report<W, N>(out: &mut W, notify: Option<(&N, &str)>, report: &AuditReport)
where
    W: Write + ?Sized,
    N: Notifier + ?Sized,
{
    let body = report.body();
    if let Err(e) = out.write_all(body.as_bytes()).and_then(|()| out.flush()) {
        warn!("Cannot write report: {}", e);
    }
    if let Some((notifier, recipient)) = notify {
        notify_verdict(notifier, recipient, report.verdict, &body);
    }
}

/// Options with the SMTP password masked, for debug output.
fn redacted(opts: &Opts) -> Opts {
    let mut shown = opts.clone();
    if shown.smtp.password.is_some() {
        shown.smtp.password = Some("***".to_string());
    }
    shown
}
