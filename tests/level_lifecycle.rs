//! Headless checks of the level lifecycle with hooks that only count calls.

use bevy::asset::AssetPlugin;
use bevy::prelude::*;

use skull_shooter::core::{AssetsLoaded, CorePlugin, ExitStarted, GameConfig, LevelError};
use skull_shooter::level::{
    complete_loading, exit_level, start_level, tick_current_level, AssetRegistry, LevelEntity,
    LevelHooks, LevelId, LevelPhase, LevelPlugin, LevelRegistry, RenderLoop,
};

#[derive(Resource, Default, Debug)]
struct HookCalls {
    set_properties: u32,
    setup_assets: u32,
    build_scene: u32,
    before_render: u32,
    on_exit: u32,
}

#[derive(Resource)]
struct BuiltRoot(Entity);

fn count_set_properties(mut calls: ResMut<HookCalls>) {
    calls.set_properties += 1;
}

fn count_setup_assets(mut calls: ResMut<HookCalls>) {
    calls.setup_assets += 1;
}

fn build_counted_scene(mut commands: Commands, mut calls: ResMut<HookCalls>) {
    calls.build_scene += 1;
    let root = commands
        .spawn((LevelEntity, Transform::default()))
        .with_children(|parent| {
            parent.spawn(Transform::default());
        })
        .id();
    commands.insert_resource(BuiltRoot(root));
}

fn count_before_render(mut calls: ResMut<HookCalls>) {
    calls.before_render += 1;
}

fn count_on_exit(mut calls: ResMut<HookCalls>) {
    calls.on_exit += 1;
}

fn app_headless() -> App {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, AssetPlugin::default()))
        .insert_resource(GameConfig::default())
        .add_plugins((CorePlugin, LevelPlugin))
        .init_resource::<HookCalls>();

    let world = app.world_mut();
    let hooks = LevelHooks {
        set_properties: Some(world.register_system(count_set_properties)),
        setup_assets: Some(world.register_system(count_setup_assets)),
        build_scene: Some(world.register_system(build_counted_scene)),
        before_render: Some(world.register_system(count_before_render)),
        on_exit: Some(world.register_system(count_on_exit)),
    };
    let mut registry = world.resource_mut::<LevelRegistry>();
    registry.register(LevelId::First, hooks);
    registry.register(LevelId::HomeMenu, LevelHooks::default());
    app
}

fn phase(app: &App, id: LevelId) -> Option<LevelPhase> {
    app.world().resource::<LevelRegistry>().phase(id)
}

fn calls(app: &App) -> &HookCalls {
    app.world().resource::<HookCalls>()
}

#[test]
fn start_runs_properties_and_assets_then_waits() {
    let mut app = app_headless();

    start_level(app.world_mut(), LevelId::First).expect("idle level starts");

    assert_eq!(phase(&app, LevelId::First), Some(LevelPhase::Loading));
    assert_eq!(calls(&app).set_properties, 1);
    assert_eq!(calls(&app).setup_assets, 1);
    assert_eq!(calls(&app).build_scene, 0);

    let assets = app.world().resource::<AssetRegistry>();
    assert_eq!(assets.owner(), LevelId::First);
    assert!(assets.is_loading());
}

#[test]
fn completing_loading_builds_scene_and_announces_it() {
    let mut app = app_headless();
    start_level(app.world_mut(), LevelId::First).expect("idle level starts");

    assert!(complete_loading(app.world_mut(), LevelId::First));

    assert_eq!(phase(&app, LevelId::First), Some(LevelPhase::Running));
    assert_eq!(calls(&app).build_scene, 1);
    let loaded: Vec<_> = app
        .world()
        .resource::<Events<AssetsLoaded>>()
        .iter_current_update_events()
        .copied()
        .collect();
    assert_eq!(loaded, vec![AssetsLoaded(LevelId::First)]);
}

#[test]
fn empty_asset_queue_finishes_on_next_update() {
    let mut app = app_headless();
    start_level(app.world_mut(), LevelId::HomeMenu).expect("idle level starts");

    app.update();

    assert_eq!(phase(&app, LevelId::HomeMenu), Some(LevelPhase::Running));
}

#[test]
fn tick_only_runs_while_render_loop_runs() {
    let mut app = app_headless();
    start_level(app.world_mut(), LevelId::First).expect("idle level starts");

    // Loading: no tick even with the loop on
    app.world_mut().resource_mut::<RenderLoop>().running = true;
    tick_current_level(app.world_mut());
    assert_eq!(calls(&app).before_render, 0);

    complete_loading(app.world_mut(), LevelId::First);
    app.world_mut().resource_mut::<RenderLoop>().running = false;
    tick_current_level(app.world_mut());
    assert_eq!(calls(&app).before_render, 0);

    app.world_mut().resource_mut::<RenderLoop>().running = true;
    tick_current_level(app.world_mut());
    tick_current_level(app.world_mut());
    assert_eq!(calls(&app).before_render, 2);
}

#[test]
fn exit_disposes_the_scene() {
    let mut app = app_headless();
    start_level(app.world_mut(), LevelId::First).expect("idle level starts");
    complete_loading(app.world_mut(), LevelId::First);
    let root = app.world().resource::<BuiltRoot>().0;
    assert!(app.world().get_entity(root).is_ok());

    exit_level(app.world_mut(), LevelId::First).expect("running level exits");

    assert_eq!(phase(&app, LevelId::First), Some(LevelPhase::Exiting));
    assert_eq!(calls(&app).on_exit, 1);
    assert!(app.world().get_entity(root).is_err());

    let exits: Vec<_> = app
        .world()
        .resource::<Events<ExitStarted>>()
        .iter_current_update_events()
        .copied()
        .collect();
    assert_eq!(exits, vec![ExitStarted(LevelId::First)]);

    // Exited levels stop ticking
    app.world_mut().resource_mut::<RenderLoop>().running = true;
    tick_current_level(app.world_mut());
    assert_eq!(calls(&app).before_render, 0);
}

#[test]
fn late_completion_after_exit_is_ignored() {
    let mut app = app_headless();
    start_level(app.world_mut(), LevelId::First).expect("idle level starts");
    exit_level(app.world_mut(), LevelId::First).expect("loading level exits");

    assert!(!complete_loading(app.world_mut(), LevelId::First));
    assert_eq!(phase(&app, LevelId::First), Some(LevelPhase::Exiting));
    assert_eq!(calls(&app).build_scene, 0);
}

#[test]
fn invalid_transitions_are_rejected() {
    let mut app = app_headless();

    let exit_idle = exit_level(app.world_mut(), LevelId::First);
    assert!(matches!(
        exit_idle,
        Err(LevelError::InvalidTransition {
            phase: LevelPhase::Idle,
            ..
        })
    ));

    start_level(app.world_mut(), LevelId::First).expect("idle level starts");
    let start_twice = start_level(app.world_mut(), LevelId::First);
    assert!(matches!(
        start_twice,
        Err(LevelError::InvalidTransition {
            phase: LevelPhase::Loading,
            ..
        })
    ));

    assert_eq!(
        start_level(app.world_mut(), LevelId::Credits),
        Err(LevelError::NotRegistered(LevelId::Credits))
    );
}

#[test]
fn exited_level_can_start_again() {
    let mut app = app_headless();
    start_level(app.world_mut(), LevelId::First).expect("idle level starts");
    complete_loading(app.world_mut(), LevelId::First);
    exit_level(app.world_mut(), LevelId::First).expect("running level exits");

    start_level(app.world_mut(), LevelId::First).expect("exited level restarts");

    assert_eq!(phase(&app, LevelId::First), Some(LevelPhase::Loading));
    assert_eq!(calls(&app).set_properties, 2);
    assert_eq!(calls(&app).setup_assets, 2);
}
