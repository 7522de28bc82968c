//! Builtin object types.
//!
//! | Type | Attributes | Events | Actions |
//! |---|---|---|---|
//! | `Background` | `Sprite name` | `Collision` | `Move` |
//! | `Active` | `Background`'s + `Movement type`, `Damping value`, `Speed` | `Collision` | `Move` |
//! | `Input` | | `Key pressed`, `Key released` | |
//! | `Game` | | `Timer expired`, `Frame start` | timers, `Close game window`, `Create object`, camera |
//!
//! Every type also accepts `Destroy`, which the engine handles itself.

mod active;
mod background;
mod controller;
mod input;

pub use active::{Active, Movement};
pub use background::Background;
pub use controller::GameController;
pub use input::Input;
