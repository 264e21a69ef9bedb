//! The `forge dev` supervisor.
//!
//! A watcher thread feeds filesystem events into a channel; the supervisor
//! loop filters them, arms a debounce timer on every relevant event and
//! runs the pipeline once the tree has been quiet for the whole delay.
//! Runs never overlap: the loop is single-threaded and blocks on each run.
//!
//! Watches are per directory. Directories created while the loop runs are
//! added to the watch set as their creation events arrive.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crossbeam::channel::{after, never, select, Receiver};
use notify::event::ModifyKind;
use notify::{Event, EventKind};

/// Default quiet period before a rebuild.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// File extensions whose changes trigger a rebuild.
pub const WATCHED_EXTENSIONS: &[&str] = &["go", "templ", "sql", "css"];

/// Directory names never watched.
pub const SKIPPED_DIRS: &[&str] = &["vendor", "node_modules"];

/// Work done after a burst of changes.
pub trait Pipeline {
    fn run(&mut self);
}

impl<F: FnMut()> Pipeline for F {
    fn run(&mut self) {
        self();
    }
}

/// Adds a directory to the watch set.
pub trait DirWatch {
    fn watch(&mut self, dir: &Path);
}

impl<F: FnMut(&Path)> DirWatch for F {
    fn watch(&mut self, dir: &Path) {
        self(dir);
    }
}

/// Decides which events can change the build.
#[derive(Clone, Debug)]
pub struct Relevance {
    generated: PathBuf,
}

impl Relevance {
    /// `generated` is the generated tree; its own writes are ignored.
    pub fn new(generated: impl Into<PathBuf>) -> Self {
        Relevance {
            generated: generated.into(),
        }
    }

    pub fn path(&self, path: &Path) -> bool {
        let watched = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| WATCHED_EXTENSIONS.contains(&ext));
        watched && !path.starts_with(&self.generated)
    }

    pub fn event(&self, event: &Event) -> bool {
        match event.kind {
            // Permission and timestamp changes from editors and the OS.
            EventKind::Modify(ModifyKind::Metadata(_)) | EventKind::Access(_) => false,
            _ => event.paths.iter().any(|p| self.path(p)),
        }
    }

    /// Directories an event brings into the tree that should be watched.
    pub fn created_dirs<'e>(&self, event: &'e Event) -> Vec<&'e Path> {
        match event.kind {
            EventKind::Create(_) | EventKind::Modify(ModifyKind::Name(_)) => event
                .paths
                .iter()
                .map(PathBuf::as_path)
                .filter(|p| p.is_dir() && !p.starts_with(&self.generated))
                .filter(|p| !skipped(p, &self.generated))
                .collect(),
            _ => Vec::new(),
        }
    }
}

/// Whether a directory is left out of the watch set.
fn skipped(dir: &Path, generated: &Path) -> bool {
    let name = dir
        .file_name()
        .map(|n| n.to_string_lossy())
        .unwrap_or_default();
    name.starts_with('.') || SKIPPED_DIRS.contains(&name.as_ref()) || dir == generated
}

/// `root` and every directory below it that should be watched, in
/// traversal order. Missing roots yield nothing.
pub fn watch_dirs(root: &Path, generated: &Path) -> io::Result<Vec<PathBuf>> {
    if !root.is_dir() || skipped(root, generated) {
        return Ok(Vec::new());
    }
    let mut dirs = vec![root.to_path_buf()];
    let mut next = 0;
    while let Some(dir) = dirs.get(next).cloned() {
        next += 1;
        let mut children = Vec::new();
        for entry in fs::read_dir(&dir)? {
            let entry = entry?;
            let path = entry.path();
            if entry.file_type()?.is_dir() && !skipped(&path, generated) {
                children.push(path);
            }
        }
        children.sort();
        dirs.extend(children);
    }
    Ok(dirs)
}

/// Hand `dir` and its subdirectories to `watch`.
fn follow(dir: &Path, generated: &Path, watch: &mut dyn DirWatch) {
    match watch_dirs(dir, generated) {
        Ok(dirs) => {
            for dir in dirs {
                tracing::debug!(dir = %dir.display(), "watching new directory");
                watch.watch(&dir);
            }
        }
        Err(err) => tracing::warn!(dir = %dir.display(), %err, "cannot list new directory"),
    }
}

/// Drive `pipeline` from `events` until `cancel` fires or the event
/// source closes. Returns the number of runs.
///
/// A new directory counts as a change and is handed to `watch`, so files
/// written into it are seen. A change still waiting for its quiet period
/// when the event source closes is built once more; cancellation drops it.
pub fn supervise(
    events: &Receiver<notify::Result<Event>>,
    cancel: &Receiver<()>,
    relevance: &Relevance,
    delay: Duration,
    watch: &mut dyn DirWatch,
    pipeline: &mut dyn Pipeline,
) -> usize {
    let mut timer = never();
    let mut armed = false;
    let mut runs = 0;
    loop {
        select! {
            recv(cancel) -> _ => {
                tracing::debug!("supervisor cancelled");
                break;
            }
            recv(events) -> message => match message {
                Ok(Ok(event)) => {
                    let created = relevance.created_dirs(&event);
                    for dir in &created {
                        follow(dir, &relevance.generated, watch);
                    }
                    if relevance.event(&event) || !created.is_empty() {
                        tracing::trace!(paths = ?event.paths, kind = ?event.kind, "watch event accepted");
                        timer = after(delay);
                        armed = true;
                    } else {
                        tracing::trace!(paths = ?event.paths, kind = ?event.kind, "watch event ignored");
                    }
                }
                Ok(Err(err)) => tracing::warn!(%err, "watch error"),
                Err(_) => {
                    if armed {
                        pipeline.run();
                        runs += 1;
                    }
                    tracing::debug!("watcher closed");
                    break;
                }
            },
            recv(timer) -> _ => {
                tracing::debug!("debounce fired");
                timer = never();
                armed = false;
                pipeline.run();
                runs += 1;
            }
        }
    }
    runs
}
