//! Frame activation integration tests.
//!
//! These tests verify the activation protocol: teardown of the previous
//! frame, construction order, duplicate linking and attribute installation.

use std::cell::RefCell;

use rust_mmf::backend::HeadlessBackend;
use rust_mmf::core::{EngineError, Halt, HaltResult, Value, Vec2};
use rust_mmf::events::{Action, Event, EventGrid, Participants, Rule};
use rust_mmf::objects::{Behavior, ObjectContext, ObjectType, TypeRegistry};
use rust_mmf::project::{FrameDescription, ObjectDescription, Project, ProjectDescription};
use rust_mmf::runtime::Game;

thread_local! {
    static LOG: RefCell<Vec<String>> = const { RefCell::new(Vec::new()) };
}

fn log(entry: impl Into<String>) {
    LOG.with(|log| log.borrow_mut().push(entry.into()));
}

fn take_log() -> Vec<String> {
    LOG.with(|log| std::mem::take(&mut *log.borrow_mut()))
}

/// Records its lifecycle and bumps a shared counter on demand.
struct Probe;

impl Behavior for Probe {
    fn init(&mut self, ctx: &mut ObjectContext<'_, '_>) -> HaltResult<()> {
        log(format!("init {}", ctx.core().name));
        Ok(())
    }

    fn tick(&mut self, _ctx: &mut ObjectContext<'_, '_>) -> HaltResult<()> {
        Ok(())
    }

    fn check_event(
        &mut self,
        ctx: &mut ObjectContext<'_, '_>,
        name: &str,
        _arg: &Value,
    ) -> HaltResult<Option<Participants>> {
        Ok((name == "Always").then(|| Participants::single(ctx.id())))
    }

    fn handle_action(
        &mut self,
        ctx: &mut ObjectContext<'_, '_>,
        name: &str,
        _arg: &Value,
    ) -> HaltResult<()> {
        if name == "Bump" {
            let hp = ctx.attribute("hp")?.as_int().unwrap_or(0);
            ctx.set_attribute("hp", hp + 1);
        }
        Ok(())
    }

    fn on_destroy(&mut self) -> HaltResult<()> {
        log("destroy");
        Ok(())
    }
}

fn new_probe() -> Box<dyn Behavior> {
    log("construct");
    Box::new(Probe)
}

fn registry() -> TypeRegistry {
    let mut registry = TypeRegistry::with_builtins();
    registry.register(ObjectType::new("Probe", &["hp"], new_probe));
    registry
}

fn probe(name: &str) -> ObjectDescription {
    ObjectDescription::new("Probe", name, Vec2::ZERO).with_attr("hp", 1)
}

fn game(frames: Vec<FrameDescription>) -> Game<HeadlessBackend> {
    let desc = ProjectDescription {
        frames,
        ..ProjectDescription::default()
    };
    let project = Project::from_description(&desc).unwrap();
    Game::new(project, registry(), HeadlessBackend::new()).unwrap()
}

/// Activating a frame destroys every previous object exactly once before
/// any of the new frame's objects is constructed.
#[test]
fn test_activation_tears_down_before_construction() {
    let first = FrameDescription::new()
        .with_object(probe("a"))
        .with_object(probe("b"));
    let second = FrameDescription::new().with_object(probe("c"));
    let mut game = game(vec![first, second]);

    game.switch_frame(0).unwrap();
    assert_eq!(take_log(), vec!["construct", "construct", "init a", "init b"]);

    game.switch_frame(1).unwrap();
    assert_eq!(take_log(), vec!["destroy", "destroy", "construct", "init c"]);
    assert_eq!(game.world().len(), 1);
    assert_eq!(game.current_frame(), Some(1));
}

/// Re-activating the current frame rebuilds it from scratch.
#[test]
fn test_reactivation_rebuilds() {
    let mut game = game(vec![FrameDescription::new().with_object(probe("a"))]);
    game.switch_frame(0).unwrap();
    let before = game.world().named("a");
    take_log();

    game.switch_frame(0).unwrap();
    assert_eq!(take_log(), vec!["destroy", "construct", "init a"]);
    assert_ne!(game.world().named("a"), before);
}

#[test]
fn test_missing_attribute_aborts_activation() {
    let wall = ObjectDescription::new("Background", "wall", Vec2::ZERO);
    let mut game = game(vec![FrameDescription::new().with_object(wall)]);

    let err = game.switch_frame(0).unwrap_err();
    assert!(matches!(
        err,
        Halt::Fault(EngineError::MissingAttribute { ref key, .. }) if key == "Sprite name"
    ));
    assert!(game.backend().loaded_images().is_empty());
}

/// Duplicates skip attribute installation but read the source's values, even
/// when declared before their source.
#[test]
fn test_duplicate_reads_source_attributes() {
    let frame = FrameDescription::new()
        .with_object(ObjectDescription::new("Background", "wall", Vec2::ZERO).duplicate_of(1))
        .with_object(
            ObjectDescription::new("Background", "wall", Vec2::new(64.0, 0.0))
                .with_attr("Sprite name", "wall.png"),
        );
    let mut game = game(vec![frame]);
    game.switch_frame(0).unwrap();

    let ids = game.world().named("wall");
    assert_eq!(ids.len(), 2);
    assert_eq!(
        game.world().attribute(ids[0], "Sprite name"),
        game.world().attribute(ids[1], "Sprite name")
    );
    assert!(game.world().core(ids[0]).unwrap().is_duplicate_of(ids[1]));
    assert_eq!(game.backend().loaded_images(), ["wall.png", "wall.png"]);
}

/// Writes through either member of a duplicate pair are seen by both.
#[test]
fn test_duplicate_writes_are_shared() {
    let frame = FrameDescription::new()
        .with_object(probe("enemy"))
        .with_object(ObjectDescription::new("Probe", "enemy", Vec2::ZERO).duplicate_of(0))
        .with_grid(EventGrid::new().with_rule(
            Rule::new(Event::new("Always", "enemy")).then(Action::new("Bump", "enemy")),
        ));
    let mut game = game(vec![frame]);
    game.switch_frame(0).unwrap();
    game.step().unwrap();

    // Fired on the original: bumps [original]. Fired on the duplicate:
    // bumps [duplicate, original]. Three bumps on one shared store.
    let ids = game.world().named("enemy");
    assert_eq!(game.world().attribute(ids[0], "hp"), Some(&Value::Int(4)));
    assert_eq!(game.world().attribute(ids[1], "hp"), Some(&Value::Int(4)));
}

/// A termination requested while tearing down stops the switch: the old
/// objects are all gone and nothing new is built.
#[test]
fn test_terminate_during_teardown() {
    let first = FrameDescription::new()
        .with_object(ObjectDescription::new("Game", "game", Vec2::ZERO))
        .with_object(probe("a"));
    let second = FrameDescription::new().with_object(probe("b"));
    let mut game = game(vec![first, second]);
    game.switch_frame(0).unwrap();
    take_log();

    assert!(matches!(game.switch_frame(1), Err(Halt::Terminate)));
    assert!(game.world().is_empty());
    assert_eq!(take_log(), vec!["destroy"]);
    assert_eq!(game.current_frame(), Some(0));
}
