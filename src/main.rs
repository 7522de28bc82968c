//! `mmf-run`: run a project directory headlessly.
//!
//! ```bash
//! mmf-run path/to/project [steps]
//! RUST_LOG=rust_mmf=debug mmf-run path/to/project 600
//! ```
//!
//! Loads `project.json` from the directory, builds a game with the builtin
//! object types and the headless backend, and runs it until it terminates
//! or `steps` steps have run.

use std::process::ExitCode;

use rust_mmf::{EngineError, Game, HeadlessBackend, JsonDirSource, Project, TypeRegistry};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "usage: mmf-run <project-dir> [steps]";

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .with_writer(std::io::stderr)
        .init();

    let mut args = std::env::args().skip(1);
    let Some(dir) = args.next() else {
        eprintln!("{USAGE}");
        return ExitCode::FAILURE;
    };
    let steps = match args.next().map(|s| s.parse::<u64>()) {
        None => None,
        Some(Ok(steps)) => Some(steps),
        Some(Err(_)) => {
            eprintln!("{USAGE}");
            return ExitCode::FAILURE;
        }
    };

    match run(&dir, steps) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "run failed");
            ExitCode::FAILURE
        }
    }
}

fn run(dir: &str, steps: Option<u64>) -> Result<(), EngineError> {
    let source = JsonDirSource::new(dir);
    let mut project = Project::load(&source)?;
    if steps.is_some() {
        project.config.max_steps = steps;
    }

    let backend = HeadlessBackend::from_config(&project.config).with_source(source);
    let mut game = Game::new(project, TypeRegistry::with_builtins(), backend)?;
    let summary = game.run()?;

    tracing::info!(
        steps = summary.steps,
        terminated = summary.terminated,
        live_objects = summary.live_objects,
        draws = game.backend().presented().iter().map(Vec::len).sum::<usize>(),
        "done"
    );
    Ok(())
}
