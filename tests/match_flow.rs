//! Headless checks of the arena match: ammo box, game over, replay and pause.
//!
//! The gameplay level runs with its real state hooks but no assets or scene,
//! so every entity a test needs is spawned by the test itself.

use std::time::Duration;

use bevy::asset::AssetPlugin;
use bevy::ecs::system::RunSystemOnce;
use bevy::prelude::*;
use bevy_rapier3d::prelude::KinematicCharacterController;

use skull_shooter::combat::{CombatPlugin, ViewmodelAnimation, Weapon};
use skull_shooter::core::config::WeaponConfig;
use skull_shooter::core::{
    AmmoOver, CorePlugin, EnemyKilled, GameConfig, GameOver, PlayerAttacked, Replay,
    ReplayRequested,
};
use skull_shooter::enemies::{DeathTimer, Enemy, EnemyBrain, EnemyRng};
use skull_shooter::first_level::{
    gameplay_tick, AmmoBox, EndMatch, FirstLevelPlugin, FirstLevelSet, MatchState, WaveTimer,
};
use skull_shooter::level::{
    complete_loading, exit_level, start_level, LevelHooks, LevelId, LevelPlugin, LevelRegistry,
};
use skull_shooter::persistence::{HighScores, MemoryHighScoreStore};
use skull_shooter::player::{PlayerCamera, PlayerConfig, Score};
use skull_shooter::ui::{spawn_end_menu, EndMenu, UiPlugin};

#[derive(Resource, Default)]
struct Announced {
    game_overs: u32,
    replays: u32,
}

fn count_announcements(
    mut game_over: EventReader<GameOver>,
    mut replay: EventReader<Replay>,
    mut announced: ResMut<Announced>,
) {
    announced.game_overs += game_over.read().count() as u32;
    announced.replays += replay.read().count() as u32;
}

fn match_app() -> App {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, AssetPlugin::default()))
        .init_asset::<Mesh>()
        .init_asset::<StandardMaterial>()
        .insert_resource(GameConfig::default())
        .insert_resource(HighScores::new(MemoryHighScoreStore::default()))
        .insert_resource(EnemyRng::seeded(11))
        .insert_resource(PlayerConfig::default())
        .init_resource::<Score>()
        .init_resource::<ButtonInput<MouseButton>>()
        .init_resource::<Announced>()
        .add_plugins((CorePlugin, LevelPlugin, CombatPlugin, FirstLevelPlugin, UiPlugin))
        .add_systems(Update, count_announcements.after(FirstLevelSet::Flow));

    // Keep the level's state hooks, skip loading and building the arena
    let world = app.world_mut();
    let mut registry = world.resource_mut::<LevelRegistry>();
    let hooks = registry
        .get(LevelId::First)
        .map(|level| level.hooks)
        .unwrap_or_default();
    registry.register(
        LevelId::First,
        LevelHooks {
            setup_assets: None,
            build_scene: None,
            ..hooks
        },
    );

    start_level(world, LevelId::First).expect("gameplay level starts");
    assert!(complete_loading(world, LevelId::First));
    app
}

fn spawn_rifle(app: &mut App) -> Entity {
    app.world_mut()
        .spawn((
            Weapon::new(&WeaponConfig::default()),
            ViewmodelAnimation::default(),
        ))
        .id()
}

fn attack(app: &mut App, times: usize) {
    let attacker = app.world_mut().spawn_empty().id();
    for _ in 0..times {
        app.world_mut().send_event(PlayerAttacked { attacker });
    }
}

fn ammo_boxes(app: &mut App) -> usize {
    app.world_mut()
        .query_filtered::<(), With<AmmoBox>>()
        .iter(app.world())
        .count()
}

fn live_skulls(app: &mut App) -> usize {
    app.world_mut()
        .query_filtered::<(), (With<Enemy>, Without<DeathTimer>)>()
        .iter(app.world())
        .count()
}

fn end_menu_visibility(app: &mut App) -> Visibility {
    *app.world_mut()
        .query_filtered::<&Visibility, With<EndMenu>>()
        .single(app.world())
}

fn set_paused(app: &mut App, paused: bool) {
    app.world_mut()
        .resource_mut::<LevelRegistry>()
        .set_paused(paused);
}

#[test]
fn ammo_over_drops_a_single_box() {
    let mut app = match_app();

    app.world_mut().send_event(AmmoOver);
    app.world_mut().send_event(AmmoOver);
    app.update();
    assert_eq!(ammo_boxes(&mut app), 1);

    // A box is already waiting
    app.world_mut().send_event(AmmoOver);
    app.update();
    assert_eq!(ammo_boxes(&mut app), 1);
}

#[test]
fn game_over_fires_once_when_life_runs_out() {
    let mut app = match_app();

    attack(&mut app, 19);
    app.update();
    assert_eq!(app.world().resource::<MatchState>().player_life, 5);
    assert_eq!(app.world().resource::<Announced>().game_overs, 0);

    // The killing blow and two more in the same frame
    attack(&mut app, 3);
    app.update();
    let state = app.world().resource::<MatchState>();
    assert_eq!(state.player_life, 0);
    assert!(state.over);
    assert_eq!(app.world().resource::<Announced>().game_overs, 1);

    attack(&mut app, 2);
    app.update();
    assert_eq!(app.world().resource::<MatchState>().player_life, 0);
    assert_eq!(app.world().resource::<Announced>().game_overs, 1);
}

#[test]
fn replay_restarts_the_match() {
    let mut app = match_app();
    let rifle = spawn_rifle(&mut app);
    app.world_mut()
        .run_system_once(|mut commands: Commands| spawn_end_menu(&mut commands))
        .expect("end menu spawns");

    attack(&mut app, 20);
    app.update();
    assert_eq!(app.world().resource::<Announced>().game_overs, 1);
    assert_eq!(end_menu_visibility(&mut app), Visibility::Visible);

    app.world_mut().resource_mut::<Score>().hits = 4;
    app.world_mut()
        .resource_mut::<WaveTimer>()
        .0
        .set_elapsed(Duration::from_secs(10));
    assert_eq!(live_skulls(&mut app), 0);

    app.world_mut().send_event(ReplayRequested);
    app.update();

    assert_eq!(app.world().resource::<Score>().hits, 0);
    let state = app.world().resource::<MatchState>();
    assert!(!state.over);
    assert_eq!(state.player_life, 100);
    // Reset to 10 within 100, then the fresh wave grows both
    assert_eq!(state.current_enemies, 10);
    assert_eq!(state.max_enemies, 11);
    assert_eq!(state.enemy_distance_from_center, 110.0);
    assert_eq!(live_skulls(&mut app), 10);

    assert_eq!(
        app.world().resource::<WaveTimer>().0.elapsed(),
        Duration::ZERO
    );
    assert_eq!(app.world().get::<Weapon>(rifle).map(|w| w.ammo), Some(20));
    assert_eq!(app.world().resource::<Announced>().replays, 1);
    assert_eq!(end_menu_visibility(&mut app), Visibility::Hidden);
}

#[test]
fn paused_tick_freezes_cooldown_enemies_and_fall() {
    let mut app = match_app();
    let rifle = spawn_rifle(&mut app);
    let world = app.world_mut();
    if let Some(mut weapon) = world.get_mut::<Weapon>(rifle) {
        weapon.pull_trigger(true);
    }

    // Below the fall threshold, with a skull right next to the eye
    world.spawn((
        PlayerCamera::default(),
        GlobalTransform::from_translation(Vec3::new(0.0, -30.0, 0.0)),
    ));
    let skull = world
        .spawn((
            Enemy,
            Transform::from_xyz(0.0, -30.0, 2.0),
            EnemyBrain::new(100.0, Vec3::ZERO),
            KinematicCharacterController::default(),
        ))
        .id();

    set_paused(&mut app, true);
    for _ in 0..3 {
        gameplay_tick(app.world_mut());
    }

    let world = app.world();
    let brain = world.get::<EnemyBrain>(skull).expect("skull alive");
    assert!(!brain.attacking && !brain.close_to_player);
    assert!(!world.get::<Weapon>(rifle).expect("rifle").can_fire());
    assert_eq!(
        world
            .resource::<Events<EndMatch>>()
            .iter_current_update_events()
            .count(),
        0
    );
    assert_eq!(
        world
            .resource::<Events<PlayerAttacked>>()
            .iter_current_update_events()
            .count(),
        0
    );

    set_paused(&mut app, false);
    gameplay_tick(app.world_mut());

    let world = app.world();
    let brain = world.get::<EnemyBrain>(skull).expect("skull alive");
    assert!(brain.attacking && brain.close_to_player);
    assert_eq!(
        world
            .resource::<Events<EndMatch>>()
            .iter_current_update_events()
            .count(),
        1
    );
    assert_eq!(
        world
            .resource::<Events<PlayerAttacked>>()
            .iter_current_update_events()
            .count(),
        1
    );
}

#[test]
fn paused_level_ignores_the_trigger() {
    let mut app = match_app();
    let rifle = spawn_rifle(&mut app);
    app.world_mut()
        .resource_mut::<LevelRegistry>()
        .set_control_enabled(LevelId::First, true);
    app.world_mut()
        .resource_mut::<ButtonInput<MouseButton>>()
        .press(MouseButton::Left);

    set_paused(&mut app, true);
    app.update();
    assert_eq!(app.world().get::<Weapon>(rifle).map(|w| w.ammo), Some(10));

    set_paused(&mut app, false);
    app.update();
    assert_eq!(app.world().get::<Weapon>(rifle).map(|w| w.ammo), Some(9));
}

#[test]
fn leaving_the_arena_restores_ambient_light() {
    let mut app = match_app();
    app.world_mut().insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: 400.0,
    });

    exit_level(app.world_mut(), LevelId::First).expect("running level exits");

    assert_eq!(
        app.world().resource::<AmbientLight>().brightness,
        AmbientLight::default().brightness
    );
}

#[test]
fn kills_count_as_hits() {
    let mut app = match_app();
    app.world_mut().resource_mut::<MatchState>().current_enemies = 1;
    let skull = app.world_mut().spawn(Enemy).id();

    app.world_mut().send_event(EnemyKilled { enemy: skull });
    app.world_mut().send_event(EnemyKilled { enemy: skull });
    app.update();

    assert_eq!(app.world().resource::<Score>().hits, 2);
    assert_eq!(app.world().resource::<MatchState>().current_enemies, 0);
}
