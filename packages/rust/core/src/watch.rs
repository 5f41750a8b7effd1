//! Rebuild trigger loop: watch sources, debounce changes, rebuild.
//!
//! The loop runs on one thread and calls [`build`] synchronously, so two
//! rebuilds never overlap.

use std::path::{Path, PathBuf};
use std::sync::mpsc::{Receiver, RecvTimeoutError, channel};
use std::time::{Duration, Instant};

use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tracing::{debug, info, warn};

use guidegen_shared::{BuildConfig, GuideGenError, Result, source_dir};

use crate::assembler::{BuildReport, build};

/// Receives the outcome of every rebuild.
pub trait RebuildReporter {
    /// Called before a rebuild starts.
    fn started(&self);
    /// Called after a successful rebuild.
    fn succeeded(&self, report: &BuildReport);
    /// Called when a rebuild fails.
    fn failed(&self, error: &GuideGenError);
}

/// Trailing-edge debounce: fires once changes have been quiet for `interval`.
#[derive(Debug, Clone)]
pub struct Debouncer {
    interval: Duration,
    deadline: Option<Instant>,
}

impl Debouncer {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            deadline: None,
        }
    }

    /// Record a change at `now`, pushing the deadline back.
    pub fn touch(&mut self, now: Instant) {
        self.deadline = Some(now + self.interval);
    }

    /// Whether a change is waiting to be built.
    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Time left before the pending change is due, or `None` when idle.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.deadline.map(|d| d.saturating_duration_since(now))
    }

    /// Consume the pending change if its quiet period has elapsed.
    pub fn take_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

/// What to watch and which changes count.
#[derive(Debug, Clone)]
pub struct WatchPlan {
    /// Paths to register with the watcher.
    pub targets: Vec<(PathBuf, RecursiveMode)>,
    /// Specific files whose changes always count.
    pub files: Vec<PathBuf>,
    /// Changes under this directory are our own output and never count.
    pub output_dir: PathBuf,
}

impl WatchPlan {
    /// Watch the guides directory, the source document's directory, the
    /// config file and any extra paths.
    pub fn new(build: &BuildConfig, config_file: Option<&Path>, extra: &[PathBuf]) -> Self {
        let mut targets = vec![
            (absolute(&build.guides_dir), RecursiveMode::Recursive),
            (absolute(&source_dir(&build.source_path)), RecursiveMode::NonRecursive),
        ];
        let mut files = vec![absolute(&build.source_path), absolute(&build.version_file)];

        if let Some(path) = config_file {
            targets.push((absolute(&source_dir(path)), RecursiveMode::NonRecursive));
            files.push(absolute(path));
        }
        for path in extra {
            let mode = if path.is_dir() {
                RecursiveMode::Recursive
            } else {
                RecursiveMode::NonRecursive
            };
            targets.push((absolute(path), mode));
            files.push(absolute(path));
        }

        Self {
            targets,
            files,
            output_dir: absolute(&build.output_dir),
        }
    }

    /// Whether a change to `path` should trigger a rebuild.
    pub fn is_relevant(&self, path: &Path) -> bool {
        if path.starts_with(&self.output_dir) {
            return false;
        }
        if self.files.iter().any(|f| path.starts_with(f)) {
            return true;
        }
        path.extension().is_some_and(|ext| ext == "md" || ext == "toml")
    }
}

/// Start watching every target in `plan`; events arrive on the returned receiver.
///
/// Targets that do not exist are skipped with a warning. Dropping the
/// watcher closes the channel.
pub fn spawn_watcher(
    plan: &WatchPlan,
) -> Result<(RecommendedWatcher, Receiver<notify::Result<Event>>)> {
    let (tx, rx) = channel();
    let mut watcher =
        notify::recommended_watcher(tx).map_err(|e| GuideGenError::Watch(e.to_string()))?;

    for (path, mode) in &plan.targets {
        if !path.exists() {
            warn!(path = %path.display(), "watch target does not exist, skipping");
            continue;
        }
        watcher
            .watch(path, *mode)
            .map_err(|e| GuideGenError::Watch(format!("{}: {e}", path.display())))?;
        info!(path = %path.display(), recursive = matches!(mode, RecursiveMode::Recursive), "watching");
    }

    Ok((watcher, rx))
}

/// Rebuild once, reporting the outcome.
pub fn rebuild(config: &BuildConfig, reporter: &dyn RebuildReporter) -> Option<BuildReport> {
    reporter.started();
    match build(config) {
        Ok(report) => {
            reporter.succeeded(&report);
            Some(report)
        }
        Err(e) => {
            reporter.failed(&e);
            None
        }
    }
}

/// Consume watcher events until the channel closes, rebuilding once a burst
/// of relevant changes has been quiet for `debounce`.
///
/// A change still pending when the channel closes is built before returning.
pub fn run_rebuild_loop(
    events: Receiver<notify::Result<Event>>,
    config: &BuildConfig,
    plan: &WatchPlan,
    debounce: Duration,
    reporter: &dyn RebuildReporter,
) {
    let mut debouncer = Debouncer::new(debounce);

    loop {
        let next = match debouncer.remaining(Instant::now()) {
            Some(wait) => events.recv_timeout(wait),
            None => events.recv().map_err(|_| RecvTimeoutError::Disconnected),
        };

        match next {
            Ok(Ok(event)) if is_change(&event.kind) => {
                if let Some(path) = event.paths.iter().find(|p| plan.is_relevant(p)) {
                    debug!(path = %path.display(), "source changed");
                    debouncer.touch(Instant::now());
                }
            }
            Ok(Ok(_)) => {}
            Ok(Err(e)) => warn!(error = %e, "watch error"),
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => {
                if debouncer.is_pending() {
                    rebuild(config, reporter);
                }
                break;
            }
        }

        if debouncer.take_due(Instant::now()) {
            info!("sources settled, rebuilding");
            rebuild(config, reporter);
        }
    }

    debug!("watch channel closed, rebuild loop exiting");
}

/// Watcher events carry absolute paths, so compare against absolute ones.
fn absolute(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

fn is_change(kind: &EventKind) -> bool {
    matches!(
        kind,
        EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
