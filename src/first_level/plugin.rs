//! The gameplay level: hooks and the per-frame tick.

use bevy::ecs::system::SystemId;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use super::flow::*;
use super::match_state::{MatchState, WaveTimer};
use super::scene::{clear_color, clear_environment, spawn_environment};
use crate::combat::{decay_weapon_cooldown, spawn_viewmodel};
use crate::core::GameConfig;
use crate::enemies::{step_enemies, EnemyRng};
use crate::game::release_cursor;
use crate::level::{
    level_running, AssetRegistry, LevelHooks, LevelId, LevelRegistry, LevelSet, SoundOptions,
};
use crate::persistence::HighScores;
use crate::player::{spawn_player, PlayerConfig, Score};
use crate::ui::{spawn_end_menu, spawn_hud};

/// Ordering of the match flow systems.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum FirstLevelSet {
    /// Damage, kills, ammo box, waves, game over, replay
    Flow,
}

/// Systems run, in order, on every unpaused gameplay tick.
#[derive(Resource, Clone)]
struct TickSteps(Vec<SystemId>);

/// Gameplay level plugin - add after `LevelPlugin`.
pub struct FirstLevelPlugin;

impl Plugin for FirstLevelPlugin {
    fn build(&self, app: &mut App) {
        let steps = TickSteps(vec![
            app.register_system(decay_weapon_cooldown),
            app.register_system(step_enemies),
            app.register_system(check_fall),
        ]);

        let hooks = LevelHooks {
            set_properties: Some(app.register_system(set_properties)),
            setup_assets: Some(app.register_system(setup_assets)),
            build_scene: Some(app.register_system(build_scene)),
            before_render: Some(app.register_system(gameplay_tick)),
            on_exit: Some(app.register_system(on_exit)),
        };
        app.world_mut()
            .get_resource_or_insert_with(LevelRegistry::default)
            .register(LevelId::First, hooks);

        if !app.world().contains_resource::<HighScores>() {
            app.insert_resource(HighScores::from_platform());
        }

        app.insert_resource(steps)
            .init_resource::<MatchState>()
            .init_resource::<WaveTimer>()
            .add_event::<EndMatch>()
            .configure_sets(Update, FirstLevelSet::Flow.after(LevelSet::Tick))
            .add_systems(
                Update,
                (
                    apply_player_attacks,
                    apply_enemy_kills,
                    drop_ammo_box,
                    pick_up_ammo_box,
                    tick_wave_timer,
                    end_match,
                    replay_match,
                )
                    .chain()
                    .in_set(FirstLevelSet::Flow)
                    .run_if(level_running(LevelId::First)),
            );
    }
}

/// Fresh match state on every start.
fn set_properties(mut commands: Commands, config: Res<GameConfig>) {
    commands.insert_resource(Score::default());
    commands.insert_resource(MatchState::new(&config.level));
    commands.insert_resource(WaveTimer::new(&config.level));
}

fn setup_assets(asset_server: Res<AssetServer>, mut assets: ResMut<AssetRegistry>) {
    assets.add_mesh(&asset_server, "rifle", "models/rifle.glb#Scene0");
    assets.add_mesh(&asset_server, "enemy", "models/skull.glb#Scene0");

    assets.add_music(&asset_server, "music", "musics/music.ogg", 0.1);
    for (name, path, volume) in [
        ("shotgun", "sounds/shotgun.wav", 0.4),
        ("reload", "sounds/reload.ogg", 0.4),
        ("empty", "sounds/empty.wav", 0.4),
        ("monsterAttack", "sounds/monster_attack.wav", 0.3),
        ("playerDamaged", "sounds/damage.wav", 0.3),
    ] {
        assets.add_sound(&asset_server, name, path, SoundOptions::volume(volume));
    }
}

#[allow(clippy::too_many_arguments)]
fn build_scene(
    mut commands: Commands,
    config: Res<GameConfig>,
    player_config: Res<PlayerConfig>,
    asset_server: Res<AssetServer>,
    assets: Res<AssetRegistry>,
    time: Res<Time<Real>>,
    mut rng: ResMut<EnemyRng>,
    mut state: ResMut<MatchState>,
    mut score: ResMut<Score>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let level = &config.level;
    spawn_environment(&mut commands, &mut meshes, &mut materials, &asset_server, level);

    let (_, camera) = spawn_player(
        &mut commands,
        &player_config,
        level.camera_spawn(),
        clear_color(level),
    );
    // Creating the camera sends the opening wave
    spawn_wave(&mut commands, &mut rng, Some(&*assets), &config, &mut state);

    spawn_viewmodel(&mut commands, camera, assets.get_mesh("rifle"), &config.weapon);
    spawn_wave(&mut commands, &mut rng, Some(&*assets), &config, &mut state);

    spawn_hud(
        &mut commands,
        state.player_life,
        config.weapon.initial_ammo,
        score.hits,
    );
    spawn_end_menu(&mut commands);

    score.start_time_counter(time.elapsed());
    info!("Arena ready with {} skulls", state.current_enemies);
}

/// Exclusive system: the gameplay tick, skipped entirely while paused.
pub fn gameplay_tick(world: &mut World) {
    if world.resource::<LevelRegistry>().is_paused(LevelId::First) {
        return;
    }

    let steps = world.resource::<TickSteps>().clone();
    for step in steps.0 {
        if let Err(e) = world.run_system(step) {
            error!("Gameplay tick step failed: {}", e);
        }
    }
}

fn on_exit(
    mut commands: Commands,
    mut window_query: Query<&mut Window, With<PrimaryWindow>>,
    mut registry: ResMut<LevelRegistry>,
) {
    release_cursor(&mut window_query, &mut registry);
    clear_environment(&mut commands);
}
