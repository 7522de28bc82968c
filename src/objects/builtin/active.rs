//! `Active`: a `Background` that moves on its own.

use crate::core::{Axis, EngineError, HaltResult, Value, Vec2};
use crate::events::Participants;
use crate::objects::behavior::Behavior;
use crate::objects::context::ObjectContext;
use crate::objects::registry::ObjectType;

use super::background::Background;

/// How an `Active` object picks its velocity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Movement {
    /// Only damping applies.
    None,
    /// Player 1's horizontal and vertical axes, scaled by `Speed`.
    TopDown,
}

impl Movement {
    fn parse(text: &str) -> Result<Self, EngineError> {
        match text {
            "None" => Ok(Self::None),
            "Top-down" => Ok(Self::TopDown),
            other => Err(EngineError::InvalidAttribute {
                key: "Movement type".to_string(),
                reason: format!("unknown movement type \"{other}\""),
            }),
        }
    }
}

/// Moving sprite.
///
/// Each tick the velocity is set from input (if any axis is non-zero),
/// damped by `Damping value ^ dt` and integrated over `dt`, then the sprite
/// is drawn.
#[derive(Debug, Default)]
pub struct Active {
    sprite: Background,
    velocity: Vec2,
}

impl Active {
    pub const TYPE_NAME: &'static str = "Active";
    pub const ATTRIBUTES: &'static [&'static str] =
        &["Sprite name", "Movement type", "Damping value", "Speed"];

    /// Registry entry for this type.
    #[must_use]
    pub fn object_type() -> ObjectType {
        ObjectType::new(Self::TYPE_NAME, Self::ATTRIBUTES, || {
            Box::new(Self::default())
        })
    }

    /// Current velocity.
    #[must_use]
    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    fn movement(ctx: &ObjectContext<'_, '_>) -> Result<Movement, EngineError> {
        Movement::parse(ctx.text_attribute("Movement type")?)
    }
}

impl Behavior for Active {
    fn init(&mut self, ctx: &mut ObjectContext<'_, '_>) -> HaltResult<()> {
        self.sprite.load_sprite(ctx)?;
        Self::movement(ctx)?;
        self.velocity = Vec2::ZERO;
        Ok(())
    }

    fn tick(&mut self, ctx: &mut ObjectContext<'_, '_>) -> HaltResult<()> {
        if Self::movement(ctx)? == Movement::TopDown {
            let speed = ctx.number_attribute("Speed")?;
            let horizontal = ctx.input().poll_axis(Axis::P1Horizontal);
            let vertical = ctx.input().poll_axis(Axis::P1Vertical);
            if horizontal != 0.0 {
                self.velocity.x = horizontal * speed;
            }
            if vertical != 0.0 {
                self.velocity.y = vertical * speed;
            }
        }

        let dt = ctx.step_time();
        let damping = ctx.number_attribute("Damping value")?.powf(dt);
        self.velocity = self.velocity * damping;

        let position = ctx.position() + self.velocity * dt;
        ctx.set_position(position);

        self.sprite.draw(ctx);
        Ok(())
    }

    fn check_event(
        &mut self,
        ctx: &mut ObjectContext<'_, '_>,
        name: &str,
        arg: &Value,
    ) -> HaltResult<Option<Participants>> {
        self.sprite.check_event(ctx, name, arg)
    }

    fn handle_action(
        &mut self,
        ctx: &mut ObjectContext<'_, '_>,
        name: &str,
        arg: &Value,
    ) -> HaltResult<()> {
        self.sprite.handle_action(ctx, name, arg)
    }
}
