//! The orchestrator: frames, live objects, camera and the main loop.

use tracing::{info, warn};

use crate::backend::Backend;
use crate::core::{EngineError, Halt, HaltResult, RuntimeConfig, Vec2};
use crate::objects::{TypeRegistry, World};
use crate::project::{Frame, Project, ProjectSource};

use super::stage::Stage;

/// How a run ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunSummary {
    /// Steps completed.
    pub steps: u64,
    /// True if the game asked to stop, false if the step bound was reached.
    pub terminated: bool,
    /// Objects still live when the loop ended.
    pub live_objects: usize,
}

/// A running game.
///
/// Owns the loaded frames, the live objects of the current frame, the
/// camera and the backend. Each step runs:
///
/// ```text
/// pre_update -> grid tick -> object ticks (collection order) -> post_update
/// ```
///
/// ## Example
///
/// ```
/// use rust_mmf::backend::HeadlessBackend;
/// use rust_mmf::core::{RuntimeConfig, Vec2};
/// use rust_mmf::objects::TypeRegistry;
/// use rust_mmf::project::{FrameDescription, ObjectDescription, Project, ProjectDescription};
/// use rust_mmf::runtime::Game;
///
/// let wall = ObjectDescription::new("Background", "wall", Vec2::ZERO)
///     .with_attr("Sprite name", "wall.png");
/// let desc = ProjectDescription::default()
///     .with_config(RuntimeConfig::new().with_max_steps(3))
///     .with_frame(FrameDescription::new().with_object(wall));
///
/// let project = Project::from_description(&desc).unwrap();
/// let mut game = Game::new(project, TypeRegistry::with_builtins(), HeadlessBackend::new()).unwrap();
/// let summary = game.run().unwrap();
///
/// assert_eq!(summary.steps, 3);
/// assert!(!summary.terminated);
/// assert_eq!(game.backend().presented().len(), 3);
/// ```
pub struct Game<B: Backend> {
    frames: Vec<Frame>,
    current: Option<usize>,
    world: World,
    backend: B,
    camera: Vec2,
    registry: TypeRegistry,
    config: RuntimeConfig,
    clock: f64,
    steps: u64,
}

impl<B: Backend> Game<B> {
    /// Build a game from a loaded project.
    ///
    /// Every blueprint's type must be registered; the registry is closed
    /// from here on.
    pub fn new(project: Project, registry: TypeRegistry, backend: B) -> Result<Self, EngineError> {
        for frame in &project.frames {
            for blueprint in frame.blueprints() {
                registry.lookup(&blueprint.type_name)?;
            }
        }

        Ok(Self {
            frames: project.frames,
            current: None,
            world: World::new(),
            backend,
            camera: Vec2::ZERO,
            registry,
            config: project.config,
            clock: 0.0,
            steps: 0,
        })
    }

    /// Load a project from a source and build a game from it.
    pub fn load(
        source: &dyn ProjectSource,
        registry: TypeRegistry,
        backend: B,
    ) -> Result<Self, EngineError> {
        Self::new(Project::load(source)?, registry, backend)
    }

    fn parts(&mut self) -> (&[Frame], Stage<'_>) {
        let stage = Stage::new(
            &mut self.world,
            &mut self.backend,
            &mut self.camera,
            &self.registry,
            &self.config,
            self.clock,
        );
        (&self.frames, stage)
    }

    // === Lifecycle ===

    /// Make frame `index` current: destroy every live object, then
    /// instantiate the frame's blueprints.
    pub fn switch_frame(&mut self, index: usize) -> HaltResult<()> {
        if index >= self.frames.len() {
            return Err(EngineError::UnknownFrame(index).into());
        }
        info!(frame = index, "switching frame");

        let (frames, mut stage) = self.parts();
        stage.activate(&frames[index])?;
        self.current = Some(index);
        Ok(())
    }

    /// Run one step.
    pub fn step(&mut self) -> HaltResult<()> {
        self.backend.pre_update()?;
        self.clock += self.backend.elapsed_step_time();
        self.steps += 1;

        let current = self.current;
        let (frames, mut stage) = self.parts();
        if let Some(index) = current {
            frames[index].grid().tick(&mut stage)?;
        }
        for id in stage.world().ids() {
            stage.tick_object(id)?;
        }

        self.backend.post_update(self.camera)?;
        Ok(())
    }

    /// Activate the first frame and step until the game terminates or the
    /// configured step bound is reached.
    ///
    /// The termination signal ends the run normally. Backend shutdown runs
    /// exactly once, whether the run ended normally or with an error.
    pub fn run(&mut self) -> Result<RunSummary, EngineError> {
        info!(frames = self.frames.len(), max_steps = ?self.config.max_steps, "starting game");
        let outcome = self.run_loop();
        self.backend.shutdown();

        let terminated = match outcome {
            Ok(()) => false,
            Err(Halt::Terminate) => true,
            Err(Halt::Fault(err)) => {
                warn!(error = %err, steps = self.steps, "game stopped by an error");
                return Err(err);
            }
        };

        let summary = RunSummary {
            steps: self.steps,
            terminated,
            live_objects: self.world.len(),
        };
        info!(steps = summary.steps, terminated, "game finished");
        Ok(summary)
    }

    fn run_loop(&mut self) -> HaltResult<()> {
        self.switch_frame(0)?;
        while self.config.max_steps.map_or(true, |max| self.steps < max) {
            self.step()?;
        }
        Ok(())
    }

    // === Accessors ===

    /// The backend.
    #[must_use]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// The backend, mutably (for scripting input between steps).
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Live objects.
    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Camera offset.
    #[must_use]
    pub fn camera(&self) -> Vec2 {
        self.camera
    }

    /// Index of the active frame.
    #[must_use]
    pub fn current_frame(&self) -> Option<usize> {
        self.current
    }

    /// Loaded frames.
    #[must_use]
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Runtime configuration.
    #[must_use]
    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// Accumulated step time in seconds.
    #[must_use]
    pub fn clock(&self) -> f64 {
        self.clock
    }

    /// Steps run so far.
    #[must_use]
    pub fn steps(&self) -> u64 {
        self.steps
    }
}

impl<B: Backend> std::fmt::Debug for Game<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Game")
            .field("current", &self.current)
            .field("world", &self.world)
            .field("camera", &self.camera)
            .field("steps", &self.steps)
            .finish_non_exhaustive()
    }
}
