//! Game driver - level navigation, pause broadcast and the render loop.

use bevy::prelude::*;
use bevy::window::{CursorGrabMode, PrimaryWindow, WindowFocused};

use super::input::*;
use crate::core::{AssetsLoaded, ExitStarted, GameOver, GotoLevel, PausedChanged, Replay};
use crate::level::{exit_level, start_level, LevelId, LevelRegistry, LevelSet, RenderLoop};

/// Ordering of the game driver's systems.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum GameSet {
    /// Keyboard and swipe capture
    Input,
    /// Level switches requested last frame
    Navigation,
    /// Cursor lock, after gameplay consumed this frame's clicks
    Cursor,
}

/// Keeps window focus from lifting a game-over pause.
#[derive(Resource, Debug, Default)]
pub struct PauseHold {
    pub game_over: bool,
}

/// Game plugin - add after every level plugin registered its hooks.
pub struct GamePlugin;

impl Plugin for GamePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MovementIntent>()
            .init_resource::<SwipeTimers>()
            .init_resource::<PauseHold>()
            .configure_sets(
                Update,
                (
                    GameSet::Input,
                    GameSet::Navigation.before(LevelSet::Lifecycle),
                    GameSet::Cursor.after(LevelSet::Tick),
                ),
            )
            .add_systems(Startup, start_home_menu)
            .add_systems(
                Update,
                (capture_keyboard, capture_swipes, expire_swipes).in_set(GameSet::Input),
            )
            .add_systems(
                Update,
                (handle_level_navigation, drive_render_loop)
                    .chain()
                    .in_set(GameSet::Navigation),
            )
            .add_systems(
                Update,
                (release_cursor_on_escape, lock_cursor_on_click).in_set(GameSet::Cursor),
            );
    }
}

fn start_home_menu(world: &mut World) {
    if let Err(e) = start_level(world, LevelId::HomeMenu) {
        error!("{}", e);
    }
}

/// Exclusive system: switch levels by name.
///
/// Unknown names are logged and leave the current level untouched.
pub fn handle_level_navigation(world: &mut World) {
    let requests: Vec<GotoLevel> = match world.get_resource_mut::<Events<GotoLevel>>() {
        Some(mut events) => events.drain().collect(),
        None => return,
    };

    for GotoLevel(name) in requests {
        let target = match name.parse::<LevelId>() {
            Ok(target) => target,
            Err(e) => {
                error!("{}", e);
                continue;
            }
        };

        if let Some(current) = world.resource::<LevelRegistry>().current() {
            if let Err(e) = exit_level(world, current) {
                warn!("{}", e);
            }
        }

        if let Err(e) = start_level(world, target) {
            error!("{}", e);
        }
    }
}

/// Start and stop the render loop, and broadcast pause changes.
#[allow(clippy::too_many_arguments)]
fn drive_render_loop(
    mut exits: EventReader<ExitStarted>,
    mut loaded: EventReader<AssetsLoaded>,
    mut game_over: EventReader<GameOver>,
    mut replay: EventReader<Replay>,
    mut focus: EventReader<WindowFocused>,
    registry: Res<LevelRegistry>,
    mut render_loop: ResMut<RenderLoop>,
    mut hold: ResMut<PauseHold>,
    mut paused: EventWriter<PausedChanged>,
) {
    if exits.read().count() > 0 {
        render_loop.running = false;
        hold.game_over = false;
    }

    // A level exited this frame may still have its completion queued
    let current_loaded = loaded
        .read()
        .filter(|AssetsLoaded(id)| registry.is_running(*id))
        .count();
    if current_loaded > 0 {
        paused.send(PausedChanged(false));
        render_loop.running = true;
    }

    if game_over.read().count() > 0 {
        hold.game_over = true;
        paused.send(PausedChanged(true));
    }

    if replay.read().count() > 0 {
        hold.game_over = false;
        paused.send(PausedChanged(false));
    }

    if let Some(event) = focus.read().last() {
        if !event.focused {
            paused.send(PausedChanged(true));
        } else if !hold.game_over {
            paused.send(PausedChanged(false));
        }
    }
}

fn set_cursor_lock(window: &mut Window, locked: bool) {
    if locked {
        window.cursor_options.grab_mode = CursorGrabMode::Locked;
        window.cursor_options.visible = false;
    } else {
        window.cursor_options.grab_mode = CursorGrabMode::None;
        window.cursor_options.visible = true;
    }
}

/// Give the cursor back and drop player control.
pub fn release_cursor(
    window_query: &mut Query<&mut Window, With<PrimaryWindow>>,
    registry: &mut LevelRegistry,
) {
    if let Ok(mut window) = window_query.get_single_mut() {
        set_cursor_lock(&mut window, false);
    }
    registry.set_control_enabled(LevelId::First, false);
}

fn release_cursor_on_escape(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut window_query: Query<&mut Window, With<PrimaryWindow>>,
    mut registry: ResMut<LevelRegistry>,
) {
    if keyboard.just_pressed(KeyCode::Escape) {
        release_cursor(&mut window_query, &mut registry);
    }
}

/// Clicking the running gameplay level takes the cursor.
fn lock_cursor_on_click(
    mouse: Res<ButtonInput<MouseButton>>,
    mut window_query: Query<&mut Window, With<PrimaryWindow>>,
    mut registry: ResMut<LevelRegistry>,
) {
    if !mouse.just_pressed(MouseButton::Left) {
        return;
    }
    let level = LevelId::First;
    if !registry.is_running(level) || registry.is_paused(level) || registry.control_enabled(level) {
        return;
    }

    if let Ok(mut window) = window_query.get_single_mut() {
        set_cursor_lock(&mut window, true);
    }
    registry.set_control_enabled(level, true);
}
