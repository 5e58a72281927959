//! Match flow: damage, kills, ammo box, waves, game over and replay.

use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use bevy_rapier3d::prelude::*;

use super::match_state::{AttackOutcome, MatchState, WaveTimer};
use super::scene::{spawn_ammo_box, AmmoBox};
use crate::combat::{reload_weapon, ViewmodelAnimation, Weapon};
use crate::core::{
    AmmoOver, EnemyKilled, GameConfig, GameOver, PlayerAttacked, Replay, ReplayRequested, SoundCue,
};
use crate::enemies::{remove_all_enemies, spawn_enemy, DeathTimer, EnemyBrain, EnemyRng};
use crate::game::release_cursor;
use crate::level::{AssetRegistry, LevelId, LevelRegistry};
use crate::persistence::HighScores;
use crate::player::{reset_player, MovementState, Player, PlayerCamera, PlayerConfig, Score};

/// Request to end the match. Handled once; later requests are ignored.
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct EndMatch;

/// Spawn the next wave of skulls. Returns how many were spawned.
pub fn spawn_wave(
    commands: &mut Commands,
    rng: &mut EnemyRng,
    assets: Option<&AssetRegistry>,
    config: &GameConfig,
    state: &mut MatchState,
) -> u32 {
    let wave = state.begin_wave(&config.level);
    let scene = assets.and_then(|assets| assets.get_mesh("enemy"));

    for _ in 0..wave.count {
        spawn_enemy(commands, rng, scene.clone(), &config.enemy, wave.radius);
    }

    debug!(
        "Wave of {} skulls within {}, next max {}",
        wave.count, wave.radius, state.max_enemies
    );
    wave.count
}

pub fn apply_player_attacks(
    mut attacks: EventReader<PlayerAttacked>,
    config: Res<GameConfig>,
    mut state: ResMut<MatchState>,
    mut cues: EventWriter<SoundCue>,
    mut end_match: EventWriter<EndMatch>,
) {
    for PlayerAttacked { attacker } in attacks.read() {
        let outcome = state.player_was_attacked(&config.level);
        debug!(
            "Skull {:?} attacked: {:?}, life {}",
            attacker, outcome, state.player_life
        );
        match outcome {
            AttackOutcome::Damaged => {
                cues.send(SoundCue::PlayerDamaged);
            }
            AttackOutcome::Killed => {
                end_match.send(EndMatch);
            }
            AttackOutcome::Ignored => {}
        }
    }
}

pub fn apply_enemy_kills(
    mut kills: EventReader<EnemyKilled>,
    mut state: ResMut<MatchState>,
    mut score: ResMut<Score>,
) {
    for EnemyKilled { enemy } in kills.read() {
        state.player_hit_enemy();
        score.hits += 1;
        debug!("Skull {:?} down, {} left", enemy, state.current_enemies);
    }
}

/// Drop an ammo box when the rifle is about to run dry. Never two at once.
pub fn drop_ammo_box(
    mut commands: Commands,
    mut ammo_over: EventReader<AmmoOver>,
    ammo_boxes: Query<(), With<AmmoBox>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    if ammo_over.read().count() == 0 || !ammo_boxes.is_empty() {
        return;
    }
    spawn_ammo_box(&mut commands, &mut meshes, &mut materials);
    info!("Ammo box dropped");
}

/// Walking into the ammo box reloads the rifle and uses the box up.
pub fn pick_up_ammo_box(
    mut commands: Commands,
    player_query: Query<&KinematicCharacterControllerOutput, With<Player>>,
    ammo_boxes: Query<(), With<AmmoBox>>,
    mut weapon_query: Query<(&mut Weapon, &mut ViewmodelAnimation)>,
    mut cues: EventWriter<SoundCue>,
) {
    let Ok(output) = player_query.get_single() else {
        return;
    };
    let Some(ammo_box) = output
        .collisions
        .iter()
        .map(|collision| collision.entity)
        .find(|entity| ammo_boxes.contains(*entity))
    else {
        return;
    };

    if let Ok((mut weapon, mut animation)) = weapon_query.get_single_mut() {
        reload_weapon(&mut weapon, &mut animation, &mut cues);
    }
    commands.entity(ammo_box).despawn_recursive();
}

/// Send a wave every interval while the match is on.
pub fn tick_wave_timer(
    mut commands: Commands,
    time: Res<Time<Real>>,
    registry: Res<LevelRegistry>,
    config: Res<GameConfig>,
    assets: Option<Res<AssetRegistry>>,
    mut rng: ResMut<EnemyRng>,
    mut timer: ResMut<WaveTimer>,
    mut state: ResMut<MatchState>,
) {
    if state.over || registry.is_paused(LevelId::First) {
        return;
    }

    timer.0.tick(time.delta());
    for _ in 0..timer.0.times_finished_this_tick() {
        spawn_wave(
            &mut commands,
            &mut rng,
            assets.as_deref(),
            &config,
            &mut state,
        );
    }
}

/// Gameplay tick step: falling off the world ends the match.
pub fn check_fall(
    config: Res<GameConfig>,
    camera_query: Query<&GlobalTransform, With<PlayerCamera>>,
    mut end_match: EventWriter<EndMatch>,
) {
    let Ok(camera) = camera_query.get_single() else {
        return;
    };
    if camera.translation().y < config.level.fall_threshold {
        end_match.send(EndMatch);
    }
}

/// Stop the clock, score the match, and clear the arena.
#[allow(clippy::too_many_arguments)]
pub fn end_match(
    mut commands: Commands,
    mut requests: EventReader<EndMatch>,
    time: Res<Time<Real>>,
    config: Res<GameConfig>,
    mut state: ResMut<MatchState>,
    mut score: ResMut<Score>,
    mut high_scores: ResMut<HighScores>,
    weapon_query: Query<&Weapon>,
    mut enemies: Query<(Entity, &mut EnemyBrain), Without<DeathTimer>>,
    ammo_boxes: Query<Entity, With<AmmoBox>>,
    mut window_query: Query<&mut Window, With<PrimaryWindow>>,
    mut registry: ResMut<LevelRegistry>,
    mut game_over: EventWriter<GameOver>,
) {
    if requests.read().count() == 0 || state.over {
        return;
    }
    state.over = true;
    game_over.send(GameOver);

    score.stop_time_counter(time.elapsed());
    let shots = weapon_query.get_single().map_or(0, |weapon| weapon.shots);
    let points = score.calculate_points(shots, high_scores.store());
    info!(
        "Game over: {} hits, {} shots, {:.1}s, {} points",
        score.hits,
        shots,
        score.elapsed_secs(),
        points
    );

    release_cursor(&mut window_query, &mut registry);
    remove_all_enemies(&mut commands, &mut enemies, &config.enemy);
    for ammo_box in ammo_boxes.iter() {
        commands.entity(ammo_box).despawn_recursive();
    }
}

/// Start another match in the same scene.
#[allow(clippy::too_many_arguments)]
pub fn replay_match(
    mut commands: Commands,
    mut requests: EventReader<ReplayRequested>,
    time: Res<Time<Real>>,
    config: Res<GameConfig>,
    player_config: Res<PlayerConfig>,
    assets: Option<Res<AssetRegistry>>,
    mut rng: ResMut<EnemyRng>,
    mut state: ResMut<MatchState>,
    mut score: ResMut<Score>,
    mut timer: ResMut<WaveTimer>,
    mut player_query: Query<(&mut Transform, &mut MovementState), With<Player>>,
    mut weapon_query: Query<(&mut Weapon, &mut ViewmodelAnimation)>,
    mut cues: EventWriter<SoundCue>,
    mut replay: EventWriter<Replay>,
) {
    if requests.read().count() == 0 || !state.over {
        return;
    }

    state.reset(&config.level);
    score.hits = 0;
    replay.send(Replay);

    if let Ok((mut transform, mut movement)) = player_query.get_single_mut() {
        reset_player(
            &player_config,
            config.level.camera_spawn(),
            &mut transform,
            &mut movement,
        );
    }
    if let Ok((mut weapon, mut animation)) = weapon_query.get_single_mut() {
        reload_weapon(&mut weapon, &mut animation, &mut cues);
    }

    spawn_wave(
        &mut commands,
        &mut rng,
        assets.as_deref(),
        &config,
        &mut state,
    );
    timer.0.reset();
    score.start_time_counter(time.elapsed());
    info!("Replay");
}
