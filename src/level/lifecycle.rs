//! Level lifecycle: `Idle → Loading → Running → Exiting`.
//!
//! Every level (menu, credits, gameplay) goes through the same phases. What a
//! level actually does is supplied as optional hooks, each one a registered
//! one-shot system. A missing hook is simply skipped.
//!
//! The lifecycle functions take `&mut World` because hooks are arbitrary
//! systems that may touch anything.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use bevy::ecs::system::SystemId;
use bevy::prelude::*;

use super::assets::AssetRegistry;
use crate::core::{AssetsLoaded, ExitStarted, LevelError};
use crate::game::MovementIntent;

/// Every level the game knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LevelId {
    HomeMenu,
    Credits,
    First,
}

impl LevelId {
    pub const ALL: [LevelId; 3] = [LevelId::HomeMenu, LevelId::Credits, LevelId::First];

    /// Name used for navigation requests.
    pub fn name(self) -> &'static str {
        match self {
            LevelId::HomeMenu => "HomeMenuLevel",
            LevelId::Credits => "CreditsLevel",
            LevelId::First => "FirstLevel",
        }
    }
}

impl fmt::Display for LevelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LevelId {
    type Err = LevelError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        LevelId::ALL
            .into_iter()
            .find(|level| level.name() == name)
            .ok_or_else(|| LevelError::UnknownLevel(name.to_string()))
    }
}

/// Lifecycle phase of a level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LevelPhase {
    /// Constructed, never started
    #[default]
    Idle,
    /// Assets requested, scene not built yet
    Loading,
    /// Scene built, tick hook registered
    Running,
    /// Torn down. Starting again goes back to Loading.
    Exiting,
}

/// Optional behaviour of a level. Each hook is a registered one-shot system.
#[derive(Debug, Clone, Copy, Default)]
pub struct LevelHooks {
    /// Reset the level's own state. Runs first on every start.
    pub set_properties: Option<SystemId>,
    /// Queue the assets the level needs.
    pub setup_assets: Option<SystemId>,
    /// Spawn the scene once assets settled.
    pub build_scene: Option<SystemId>,
    /// Per-frame tick while running.
    pub before_render: Option<SystemId>,
    /// Extra teardown before the scene is disposed.
    pub on_exit: Option<SystemId>,
}

/// One registered level.
#[derive(Debug, Clone, Default)]
pub struct Level {
    pub phase: LevelPhase,
    pub hooks: LevelHooks,
    /// Mirror of the latest pause broadcast.
    pub paused: bool,
    /// True while the cursor is locked to the window.
    pub control_enabled: bool,
    tick_registered: bool,
}

impl Level {
    pub fn new(hooks: LevelHooks) -> Self {
        Self {
            hooks,
            ..default()
        }
    }

    pub fn is_running(&self) -> bool {
        self.phase == LevelPhase::Running
    }

    /// The tick hook, if the level is running and registered one.
    pub fn tick_hook(&self) -> Option<SystemId> {
        if self.is_running() && self.tick_registered {
            self.hooks.before_render
        } else {
            None
        }
    }
}

/// Owns one instance of every level for the whole process.
#[derive(Resource, Default)]
pub struct LevelRegistry {
    levels: HashMap<LevelId, Level>,
    current: Option<LevelId>,
}

impl LevelRegistry {
    /// Register (or replace) the hooks of a level.
    pub fn register(&mut self, id: LevelId, hooks: LevelHooks) {
        self.levels.insert(id, Level::new(hooks));
    }

    pub fn get(&self, id: LevelId) -> Option<&Level> {
        self.levels.get(&id)
    }

    pub fn get_mut(&mut self, id: LevelId) -> Option<&mut Level> {
        self.levels.get_mut(&id)
    }

    /// The level that is currently active, if any.
    pub fn current(&self) -> Option<LevelId> {
        self.current
    }

    pub fn current_level(&self) -> Option<&Level> {
        self.current.and_then(|id| self.levels.get(&id))
    }

    pub fn phase(&self, id: LevelId) -> Option<LevelPhase> {
        self.get(id).map(|level| level.phase)
    }

    /// True if `id` is the current level and its scene is built.
    pub fn is_running(&self, id: LevelId) -> bool {
        self.current == Some(id) && self.get(id).is_some_and(Level::is_running)
    }

    pub fn is_paused(&self, id: LevelId) -> bool {
        self.get(id).is_some_and(|level| level.paused)
    }

    /// Apply a pause broadcast to every level.
    pub fn set_paused(&mut self, paused: bool) {
        for level in self.levels.values_mut() {
            level.paused = paused;
        }
    }

    pub fn control_enabled(&self, id: LevelId) -> bool {
        self.get(id).is_some_and(|level| level.control_enabled)
    }

    pub fn set_control_enabled(&mut self, id: LevelId, enabled: bool) {
        if let Some(level) = self.get_mut(id) {
            level.control_enabled = enabled;
        }
    }

    fn current_tick_hook(&self) -> Option<SystemId> {
        self.current_level().and_then(Level::tick_hook)
    }
}

/// Marker for every entity that belongs to the active level's scene.
///
/// Only roots need it; children go with their parent.
#[derive(Component)]
pub struct LevelEntity;

/// Whether frames currently drive the level tick.
#[derive(Resource, Debug, Default)]
pub struct RenderLoop {
    pub running: bool,
}

/// Run condition: the given level is current and running.
pub fn level_running(id: LevelId) -> impl Fn(Option<Res<LevelRegistry>>) -> bool + Clone {
    move |registry: Option<Res<LevelRegistry>>| registry.is_some_and(|r| r.is_running(id))
}

fn run_hook(world: &mut World, level: LevelId, hook: &'static str, system: Option<SystemId>) {
    let Some(system) = system else {
        return;
    };

    if let Err(e) = world.run_system(system) {
        let error = LevelError::Hook {
            level,
            hook,
            details: e.to_string(),
        };
        error!("{}", error);
    }
}

/// Start a level: Idle|Exiting → Loading.
///
/// Runs `set_properties`, creates a fresh asset registry for the level,
/// runs `setup_assets`. Loading completes through [`complete_loading`].
pub fn start_level(world: &mut World, id: LevelId) -> Result<(), LevelError> {
    let hooks = {
        let mut registry = world.resource_mut::<LevelRegistry>();
        let Some(level) = registry.get_mut(id) else {
            return Err(LevelError::NotRegistered(id));
        };
        if !matches!(level.phase, LevelPhase::Idle | LevelPhase::Exiting) {
            let phase = level.phase;
            return Err(LevelError::InvalidTransition {
                level: id,
                phase,
                action: "start",
            });
        }
        level.phase = LevelPhase::Loading;
        level.tick_registered = false;
        level.control_enabled = false;
        let hooks = level.hooks;
        registry.current = Some(id);
        hooks
    };

    info!("Starting level {}", id);

    run_hook(world, id, "set_properties", hooks.set_properties);

    world.insert_resource(AssetRegistry::new(id));
    run_hook(world, id, "setup_assets", hooks.setup_assets);
    world.resource_mut::<AssetRegistry>().begin_loading();

    Ok(())
}

/// Asset loading settled: Loading → Running.
///
/// Returns false (and changes nothing) for late completions, i.e. when the
/// level already exited or another level became current meanwhile.
pub fn complete_loading(world: &mut World, id: LevelId) -> bool {
    let hooks = {
        let mut registry = world.resource_mut::<LevelRegistry>();
        let is_current = registry.current == Some(id);
        let Some(level) = registry.get_mut(id) else {
            return false;
        };
        if !is_current || level.phase != LevelPhase::Loading {
            debug!("Ignoring late asset completion for level {}", id);
            return false;
        }
        level.phase = LevelPhase::Running;
        level.hooks
    };

    run_hook(world, id, "build_scene", hooks.build_scene);

    // build_scene may have exited the level again
    let mut registry = world.resource_mut::<LevelRegistry>();
    if registry.is_running(id) {
        if let Some(level) = registry.get_mut(id) {
            level.tick_registered = hooks.before_render.is_some();
        }
    }

    world.send_event(AssetsLoaded(id));
    info!("Level {} running", id);
    true
}

/// Exit a level: Loading|Running → Exiting.
///
/// Clears input focus, announces the exit, runs `on_exit`, then disposes
/// every [`LevelEntity`].
pub fn exit_level(world: &mut World, id: LevelId) -> Result<(), LevelError> {
    let hooks = {
        let mut registry = world.resource_mut::<LevelRegistry>();
        let Some(level) = registry.get_mut(id) else {
            return Err(LevelError::NotRegistered(id));
        };
        if !matches!(level.phase, LevelPhase::Loading | LevelPhase::Running) {
            let phase = level.phase;
            return Err(LevelError::InvalidTransition {
                level: id,
                phase,
                action: "exit",
            });
        }
        level.phase = LevelPhase::Exiting;
        level.tick_registered = false;
        level.control_enabled = false;
        level.hooks
    };

    if let Some(mut intent) = world.get_resource_mut::<MovementIntent>() {
        intent.clear();
    }

    world.send_event(ExitStarted(id));
    run_hook(world, id, "on_exit", hooks.on_exit);

    dispose_scene(world);
    info!("Level {} exited", id);
    Ok(())
}

fn dispose_scene(world: &mut World) {
    let entities: Vec<Entity> = world
        .query_filtered::<Entity, With<LevelEntity>>()
        .iter(world)
        .collect();

    for entity in entities {
        // A previous despawn may already have taken it as a child
        if world.entities().contains(entity) {
            world.entity_mut(entity).despawn_recursive();
        }
    }
}

/// Exclusive system: run the current level's tick hook once per frame.
pub fn tick_current_level(world: &mut World) {
    if !world.get_resource::<RenderLoop>().is_some_and(|r| r.running) {
        return;
    }

    let Some((id, hook)) = world
        .get_resource::<LevelRegistry>()
        .and_then(|r| Some((r.current()?, r.current_tick_hook()?)))
    else {
        return;
    };

    run_hook(world, id, "before_render", Some(hook));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_names_round_trip() {
        for level in LevelId::ALL {
            assert_eq!(level.name().parse::<LevelId>(), Ok(level));
        }
    }

    #[test]
    fn unknown_name_is_an_error() {
        assert_eq!(
            "SecondLevel".parse::<LevelId>(),
            Err(LevelError::UnknownLevel("SecondLevel".to_string()))
        );
    }

    #[test]
    fn tick_hook_needs_running_phase() {
        let mut level = Level::new(LevelHooks::default());
        level.tick_registered = true;
        assert!(level.tick_hook().is_none());

        level.phase = LevelPhase::Running;
        // No before_render hook registered
        assert!(level.tick_hook().is_none());
    }

    #[test]
    fn pause_broadcast_reaches_every_level() {
        let mut registry = LevelRegistry::default();
        for id in LevelId::ALL {
            registry.register(id, LevelHooks::default());
        }

        registry.set_paused(true);
        assert!(LevelId::ALL.iter().all(|id| registry.is_paused(*id)));

        registry.set_paused(false);
        assert!(LevelId::ALL.iter().all(|id| !registry.is_paused(*id)));
    }
}
