//! `Game`: the per-frame controller object.
//!
//! Owns timers, the frame-start signal and the camera, and can create
//! objects or end the game. Destroying it ends the game, so a frame switch
//! away from a frame that has one terminates the run.

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::core::{EngineError, Halt, HaltResult, ObjectId, Value, Vec2};
use crate::events::Participants;
use crate::objects::behavior::Behavior;
use crate::objects::context::ObjectContext;
use crate::objects::registry::ObjectType;
use crate::project::ObjectDescription;

const SET_TIMER: &str = "Set timer #";

#[derive(Clone, Copy, Debug, PartialEq)]
struct Timer {
    start: f64,
    duration: f64,
}

/// Controller object, registered as `Game`.
///
/// Events:
/// - `Timer expired(n)`: timer `n` has run out; it is cleared when it fires
/// - `Frame start`: fires on the first evaluation only
///
/// Actions:
/// - `Set timer #0` .. `Set timer #9` (seconds)
/// - `Close game window`
/// - `Create object` (object description)
/// - `Camera: Move([x, y])`
/// - `Camera: Follow object(name | null)`
#[derive(Debug, Default)]
pub struct GameController {
    timers: FxHashMap<u8, Timer>,
    frame_start_sent: bool,
    following: Option<ObjectId>,
}

impl GameController {
    pub const TYPE_NAME: &'static str = "Game";

    /// Registry entry for this type.
    #[must_use]
    pub fn object_type() -> ObjectType {
        ObjectType::new(Self::TYPE_NAME, &[], || Box::new(Self::default()))
    }

    /// The object the camera follows, if any.
    #[must_use]
    pub fn following(&self) -> Option<ObjectId> {
        self.following
    }

    fn timer_index(arg: &Value) -> Option<u8> {
        match arg {
            Value::Text(text) => text.trim().parse().ok(),
            Value::Float(f) if f.fract() == 0.0 && (0.0..=f64::from(u8::MAX)).contains(f) => {
                Some(*f as u8)
            }
            other => other.as_int().and_then(|n| u8::try_from(n).ok()),
        }
    }

    fn set_timer(
        ctx: &ObjectContext<'_, '_>,
        action: &str,
        arg: &Value,
    ) -> Result<(u8, Timer), EngineError> {
        let index = action[SET_TIMER.len()..]
            .parse::<u8>()
            .ok()
            .filter(|n| *n <= 9)
            .ok_or_else(|| EngineError::invalid_argument(action, "timer number must be 0-9"))?;
        let duration = arg
            .as_number()
            .ok_or_else(|| EngineError::invalid_argument(action, "expected seconds"))?;
        Ok((
            index,
            Timer {
                start: ctx.clock(),
                duration,
            },
        ))
    }

    /// Center the camera on `id`. Returns `false` if it's gone.
    fn center_on(ctx: &mut ObjectContext<'_, '_>, id: ObjectId) -> bool {
        let Some(position) = ctx.world().core(id).map(|c| c.position) else {
            return false;
        };
        let config = ctx.config();
        let half_width = f64::from(config.screen_width / 2);
        let half_height = f64::from(config.screen_height / 2);
        ctx.set_camera(Vec2::new(position.x - half_width, -position.y - half_height));
        true
    }

    fn follow(&mut self, ctx: &mut ObjectContext<'_, '_>, arg: &Value) -> HaltResult<()> {
        const ACTION: &str = "Camera: Follow object";
        if arg.is_null() {
            self.following = None;
            return Ok(());
        }
        let name = arg.as_text().ok_or_else(|| {
            EngineError::invalid_argument(ACTION, "expected an object name or null")
        })?;
        let Some(&target) = ctx.find_targets(name).first() else {
            let reason = format!("no object named \"{name}\"");
            return Err(EngineError::invalid_argument(ACTION, reason).into());
        };
        self.following = Some(target);
        Self::center_on(ctx, target);
        Ok(())
    }
}

impl Behavior for GameController {
    fn init(&mut self, _ctx: &mut ObjectContext<'_, '_>) -> HaltResult<()> {
        self.timers.clear();
        self.frame_start_sent = false;
        self.following = None;
        Ok(())
    }

    fn tick(&mut self, ctx: &mut ObjectContext<'_, '_>) -> HaltResult<()> {
        if let Some(target) = self.following {
            if !Self::center_on(ctx, target) {
                self.following = None;
            }
        }
        Ok(())
    }

    fn check_event(
        &mut self,
        ctx: &mut ObjectContext<'_, '_>,
        name: &str,
        arg: &Value,
    ) -> HaltResult<Option<Participants>> {
        let fired = match name {
            "Timer expired" => {
                let Some(index) = Self::timer_index(arg) else {
                    return Ok(None);
                };
                let expired = self
                    .timers
                    .get(&index)
                    .is_some_and(|timer| ctx.clock() - timer.start > timer.duration);
                if expired {
                    self.timers.remove(&index);
                    debug!(timer = index, "timer expired");
                }
                expired
            }
            "Frame start" => !std::mem::replace(&mut self.frame_start_sent, true),
            _ => false,
        };
        Ok(fired.then(|| Participants::single(ctx.id())))
    }

    fn handle_action(
        &mut self,
        ctx: &mut ObjectContext<'_, '_>,
        name: &str,
        arg: &Value,
    ) -> HaltResult<()> {
        match name {
            _ if name.starts_with(SET_TIMER) => {
                let (index, timer) = Self::set_timer(ctx, name, arg)?;
                debug!(timer = index, seconds = timer.duration, "timer set");
                self.timers.insert(index, timer);
            }
            "Close game window" => return Err(Halt::Terminate),
            "Create object" => {
                let description = ObjectDescription::from_value(arg)?;
                let id = ctx.spawn(&description)?;
                debug!(%id, name = %description.name, "created object");
            }
            "Camera: Move" => {
                let offset = arg
                    .as_vec2()
                    .map_err(|reason| EngineError::invalid_argument(name, reason))?;
                ctx.set_camera(Vec2::new(offset.x, -offset.y));
            }
            "Camera: Follow object" => self.follow(ctx, arg)?,
            _ => {}
        }
        Ok(())
    }

    fn on_destroy(&mut self) -> HaltResult<()> {
        Err(Halt::Terminate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timer_index_accepts_numbers_and_text() {
        assert_eq!(GameController::timer_index(&Value::Int(3)), Some(3));
        assert_eq!(GameController::timer_index(&Value::from("7")), Some(7));
        assert_eq!(GameController::timer_index(&Value::Int(-1)), None);
        assert_eq!(GameController::timer_index(&Value::Null), None);
    }

    #[test]
    fn test_timer_index_accepts_integral_floats() {
        assert_eq!(GameController::timer_index(&Value::Float(1.0)), Some(1));
        assert_eq!(GameController::timer_index(&Value::Float(1.5)), None);
        assert_eq!(GameController::timer_index(&Value::Float(-2.0)), None);
    }

    #[test]
    fn test_destroy_requests_termination() {
        let mut controller = GameController::default();
        assert!(matches!(controller.on_destroy(), Err(Halt::Terminate)));
    }
}
