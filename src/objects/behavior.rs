//! The runtime object capability.
//!
//! Every object type implements `Behavior`. The engine calls into it through
//! a fixed protocol:
//!
//! 1. `init` once, after the object's attributes are installed
//! 2. `check_event` for every rule whose event addresses the object's name
//! 3. `handle_action` for every non-`Destroy` action dispatched to the object
//! 4. `tick` once per step, after the grid has been evaluated
//! 5. `on_destroy` once, when the object leaves the live collection
//!
//! `Destroy` never reaches `handle_action`: the engine removes the object
//! itself and then calls `on_destroy`.

use crate::core::{HaltResult, Value};
use crate::events::Participants;

use super::context::ObjectContext;

/// Behavior of one object type.
///
/// ## Implementation Notes
///
/// - `check_event`: return `None` when the condition didn't fire. When it
///   fired, return the participants, usually `Participants::single(ctx.id())`,
///   or a pair for conditions such as overlap.
/// - `handle_action`: unknown action names are ignored. Known actions with a
///   badly shaped value fail with `EngineError::InvalidActionArgument`.
/// - Attribute reads go through `ctx`, which resolves duplicates.
pub trait Behavior {
    /// Final initialization, after attributes are available.
    fn init(&mut self, ctx: &mut ObjectContext<'_, '_>) -> HaltResult<()>;

    /// Advance one step.
    fn tick(&mut self, ctx: &mut ObjectContext<'_, '_>) -> HaltResult<()>;

    /// Evaluate a named condition against this object.
    fn check_event(
        &mut self,
        ctx: &mut ObjectContext<'_, '_>,
        name: &str,
        arg: &Value,
    ) -> HaltResult<Option<Participants>>;

    /// Apply a named effect to this object.
    fn handle_action(
        &mut self,
        ctx: &mut ObjectContext<'_, '_>,
        name: &str,
        arg: &Value,
    ) -> HaltResult<()>;

    /// Called once after the object has left the live collection.
    fn on_destroy(&mut self) -> HaltResult<()> {
        Ok(())
    }
}

/// A behavior that does nothing.
#[cfg(test)]
pub(crate) struct Inert;

#[cfg(test)]
impl Behavior for Inert {
    fn init(&mut self, _ctx: &mut ObjectContext<'_, '_>) -> HaltResult<()> {
        Ok(())
    }

    fn tick(&mut self, _ctx: &mut ObjectContext<'_, '_>) -> HaltResult<()> {
        Ok(())
    }

    fn check_event(
        &mut self,
        _ctx: &mut ObjectContext<'_, '_>,
        _name: &str,
        _arg: &Value,
    ) -> HaltResult<Option<Participants>> {
        Ok(None)
    }

    fn handle_action(
        &mut self,
        _ctx: &mut ObjectContext<'_, '_>,
        _name: &str,
        _arg: &Value,
    ) -> HaltResult<()> {
        Ok(())
    }
}
