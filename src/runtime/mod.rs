//! Running a game.
//!
//! - [`Game`]: owns frames, live objects, camera and backend; runs the loop
//! - [`Stage`]: the borrowed view the event grid and behaviors dispatch
//!   through
//! - [`RunSummary`]: how a run ended

mod game;
mod stage;

pub use game::{Game, RunSummary};
pub use stage::Stage;
