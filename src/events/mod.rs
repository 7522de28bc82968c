//! Event/action rules and their evaluation.
//!
//! A frame's behavior is declared as an `EventGrid`: an ordered table of
//! rules, each binding an `Event` (a named condition on objects with a given
//! name) to a list of `Action`s (named effects on objects with a given name).
//!
//! ## Key Components
//!
//! - [`Event`], [`Action`], [`Rule`]: plain value records
//! - [`EventGrid`]: the rule table and its per-step `tick`
//! - [`Participants`]: the objects a fired condition reports
//! - [`find_targets`]: name resolution, plain or biased by participants
//!
//! ## Evaluation Order
//!
//! Rules evaluate in declaration order, matched objects in live-collection
//! order, actions in binding order. Nothing is cached between rules: every
//! resolution sees the current live set.

mod grid;
mod rule;
mod targets;

pub use grid::EventGrid;
pub use rule::{Action, Event, Rule, DESTROY};
pub use targets::{find_targets, Participants, Related};
