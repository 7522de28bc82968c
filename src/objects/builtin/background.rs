//! `Background`: a static sprite that can be moved and collided with.

use crate::backend::Image;
use crate::core::{Bounds, EngineError, HaltResult, Value, Vec2};
use crate::events::Participants;
use crate::objects::behavior::Behavior;
use crate::objects::context::ObjectContext;
use crate::objects::registry::ObjectType;
use crate::objects::world::ObjectCore;

/// Sprite-backed object.
///
/// - init: loads `Sprite name` and records its size
/// - tick: draws the sprite at `[x, -y]`
/// - event `Collision(name)`: fires `[self, other]` for the first live object
///   named `name` whose box overlaps this one
/// - action `Move([x, y])`: teleports the object
#[derive(Debug, Default)]
pub struct Background {
    image: Option<Image>,
}

impl Background {
    pub const TYPE_NAME: &'static str = "Background";
    pub const ATTRIBUTES: &'static [&'static str] = &["Sprite name"];

    /// Registry entry for this type.
    #[must_use]
    pub fn object_type() -> ObjectType {
        ObjectType::new(Self::TYPE_NAME, Self::ATTRIBUTES, || {
            Box::new(Self::default())
        })
    }

    /// Load the sprite and give the object its size.
    pub(crate) fn load_sprite(&mut self, ctx: &mut ObjectContext<'_, '_>) -> HaltResult<()> {
        let path = ctx.text_attribute("Sprite name")?.to_string();
        let image = ctx.backend().load_image(&path)?;
        ctx.core_mut().size = Some(image.size());
        self.image = Some(image);
        Ok(())
    }

    /// Queue the sprite at the object's position, y pointing up.
    pub(crate) fn draw(&self, ctx: &mut ObjectContext<'_, '_>) {
        if let Some(image) = &self.image {
            let position = ctx.position();
            ctx.backend().draw(image, Vec2::new(position.x, -position.y));
        }
    }

    /// Evaluate `Collision`.
    pub(crate) fn collision(
        ctx: &ObjectContext<'_, '_>,
        arg: &Value,
    ) -> HaltResult<Option<Participants>> {
        let name = arg
            .as_text()
            .ok_or_else(|| EngineError::invalid_argument("Collision", "expected an object name"))?;
        let Some(own) = bounds(ctx.core()) else {
            return Ok(None);
        };

        let world = ctx.world();
        let hit = ctx
            .find_targets(name)
            .into_iter()
            .filter(|&id| id != ctx.id())
            .find(|&id| {
                world
                    .core(id)
                    .and_then(bounds)
                    .is_some_and(|other| own.overlaps(&other))
            });
        Ok(hit.map(|other| Participants::pair(ctx.id(), other)))
    }

    /// Apply `Move`.
    pub(crate) fn move_to(ctx: &mut ObjectContext<'_, '_>, arg: &Value) -> HaltResult<()> {
        let position = arg
            .as_vec2()
            .map_err(|reason| EngineError::invalid_argument("Move", reason))?;
        ctx.set_position(position);
        Ok(())
    }
}

/// Collision box of a visible object.
fn bounds(core: &ObjectCore) -> Option<Bounds> {
    core.size.map(|size| Bounds::new(core.position, size))
}

impl Behavior for Background {
    fn init(&mut self, ctx: &mut ObjectContext<'_, '_>) -> HaltResult<()> {
        self.load_sprite(ctx)
    }

    fn tick(&mut self, ctx: &mut ObjectContext<'_, '_>) -> HaltResult<()> {
        self.draw(ctx);
        Ok(())
    }

    fn check_event(
        &mut self,
        ctx: &mut ObjectContext<'_, '_>,
        name: &str,
        arg: &Value,
    ) -> HaltResult<Option<Participants>> {
        match name {
            "Collision" => Self::collision(ctx, arg),
            _ => Ok(None),
        }
    }

    fn handle_action(
        &mut self,
        ctx: &mut ObjectContext<'_, '_>,
        name: &str,
        arg: &Value,
    ) -> HaltResult<()> {
        match name {
            "Move" => Self::move_to(ctx, arg),
            _ => Ok(()),
        }
    }
}
