//! The `dev` command: regenerate on every change until interrupted.

use std::path::Path;
use std::time::Duration;

use crossbeam::channel::{bounded, unbounded};
use forge_diagnostic::ColorMode;
use notify::{RecursiveMode, Watcher};

use super::{generate, print_diagnostics};
use crate::config::Project;
use crate::dev::{self, Pipeline, Relevance};
use crate::error::CliError;

/// The dev pipeline: generate and report. Failures are printed, never
/// returned, so the watcher survives broken schemas.
pub struct Rebuild<'a> {
    pub project: &'a Project,
    pub color: ColorMode,
}

impl Pipeline for Rebuild<'_> {
    fn run(&mut self) {
        match generate(self.project) {
            Ok(report) => eprint!("{report}"),
            Err(CliError::Diagnostics(set)) => print_diagnostics(&set, self.color),
            Err(err) => eprintln!("error: {err}"),
        }
    }
}

pub fn dev(project: &Project, color: ColorMode) -> Result<(), CliError> {
    let root = project
        .root
        .canonicalize()
        .map_err(CliError::io(&project.root))?;
    let project = Project::new(root, project.config.clone());
    let generated = project.generated_dir();

    let (events_tx, events_rx) = unbounded();
    let mut watcher = notify::recommended_watcher(move |event: notify::Result<notify::Event>| {
        let _ = events_tx.send(event);
    })?;
    let mut watched = 0;
    for root in [project.resources_dir(), project.internal_dir()] {
        for dir in dev::watch_dirs(&root, &generated).map_err(CliError::io(&root))? {
            watcher.watch(&dir, RecursiveMode::NonRecursive)?;
            watched += 1;
        }
    }

    let (cancel_tx, cancel_rx) = bounded(1);
    ctrlc::set_handler(move || {
        let _ = cancel_tx.try_send(());
    })?;

    let mut rebuild = Rebuild {
        project: &project,
        color,
    };
    rebuild.run();
    eprintln!("watching {watched} directories, press Ctrl-C to stop");

    let mut follow = |dir: &Path| {
        if let Err(err) = watcher.watch(dir, RecursiveMode::NonRecursive) {
            tracing::warn!(dir = %dir.display(), %err, "cannot watch new directory");
        }
    };
    let delay = Duration::from_millis(project.config.dev.debounce_ms);
    let runs = dev::supervise(
        &events_rx,
        &cancel_rx,
        &Relevance::new(generated),
        delay,
        &mut follow,
        &mut rebuild,
    );
    tracing::debug!(runs, "dev stopped");
    drop(watcher);
    Ok(())
}
