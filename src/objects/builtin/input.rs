//! `Input`: keyboard edge events.

use rustc_hash::FxHashSet;

use crate::core::{EngineError, HaltResult, Value};
use crate::events::Participants;
use crate::objects::behavior::Behavior;
use crate::objects::context::ObjectContext;
use crate::objects::registry::ObjectType;

/// Reports key transitions between the two most recent ticks.
///
/// - `Key pressed(key)`: up before, down now
/// - `Key released(key)`: down before, up now
#[derive(Debug, Default)]
pub struct Input {
    previous: FxHashSet<String>,
    current: FxHashSet<String>,
}

impl Input {
    pub const TYPE_NAME: &'static str = "Input";

    /// Registry entry for this type.
    #[must_use]
    pub fn object_type() -> ObjectType {
        ObjectType::new(Self::TYPE_NAME, &[], || Box::new(Self::default()))
    }

    fn key<'v>(event: &str, arg: &'v Value) -> Result<&'v str, EngineError> {
        arg.as_text()
            .ok_or_else(|| EngineError::invalid_argument(event, "expected a key name"))
    }
}

impl Behavior for Input {
    fn init(&mut self, ctx: &mut ObjectContext<'_, '_>) -> HaltResult<()> {
        self.current = ctx.input().pressed_keys();
        self.previous = self.current.clone();
        Ok(())
    }

    fn tick(&mut self, ctx: &mut ObjectContext<'_, '_>) -> HaltResult<()> {
        let pressed = ctx.input().pressed_keys();
        self.previous = std::mem::replace(&mut self.current, pressed);
        Ok(())
    }

    fn check_event(
        &mut self,
        ctx: &mut ObjectContext<'_, '_>,
        name: &str,
        arg: &Value,
    ) -> HaltResult<Option<Participants>> {
        let fired = match name {
            "Key pressed" => {
                let key = Self::key(name, arg)?;
                !self.previous.contains(key) && self.current.contains(key)
            }
            "Key released" => {
                let key = Self::key(name, arg)?;
                self.previous.contains(key) && !self.current.contains(key)
            }
            _ => false,
        };
        Ok(fired.then(|| Participants::single(ctx.id())))
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
