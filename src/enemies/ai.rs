//! Enemy behaviour systems.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use super::components::*;
use super::spawning::EnemyRng;
use crate::core::config::EnemyConfig;
use crate::core::{EnemyKilled, GameConfig, HeightTween, PlayerAttacked, SoundCue};
use crate::player::PlayerCamera;

/// Advance every live skull one step toward, around or into the player.
///
/// Run once per gameplay tick.
#[allow(clippy::too_many_arguments)]
pub fn step_enemies(
    time: Res<Time>,
    config: Res<GameConfig>,
    mut rng: ResMut<EnemyRng>,
    camera_query: Query<&GlobalTransform, With<PlayerCamera>>,
    mut enemy_query: Query<
        (
            Entity,
            &mut Transform,
            &mut EnemyBrain,
            &mut KinematicCharacterController,
        ),
        With<Enemy>,
    >,
    mut attacked: EventWriter<PlayerAttacked>,
    mut cues: EventWriter<SoundCue>,
) {
    let Ok(camera) = camera_query.get_single() else {
        return;
    };
    let eye = camera.translation();
    let config = &config.enemy;
    let dt = time.delta_secs();

    for (entity, mut transform, mut brain, mut controller) in enemy_query.iter_mut() {
        let position = transform.translation;
        let outcome = brain.step(eye.distance(position), config);

        if outcome.attack_cue {
            cues.send(SoundCue::MonsterAttack);
        }
        if outcome.attacked_player {
            attacked.send(PlayerAttacked { attacker: entity });
        }

        let (target, speed_factor) = match outcome.steering {
            Steering::Player { speed_factor } => (eye, speed_factor),
            Steering::Wander => (brain.wander_target, 1.0),
            Steering::Hold => continue,
        };

        let direction = (target - position).normalize_or_zero();
        let step = direction * config.speed * speed_factor * dt;
        if direction != Vec3::ZERO {
            transform.rotation = Quat::from_rotation_y(facing_yaw(direction));
            controller.translation = Some(step);
        }

        // Judged where the skull ends up after this tick's move
        if outcome.steering == Steering::Wander
            && brain.wander_target_reached(position + step, config)
        {
            let radius = brain.radius;
            brain.wander_target = random_point_in_square(&mut rng.0, radius, config.altitude);
        }
    }
}

/// Kill a skull: report it, sink it and schedule its removal.
///
/// Returns false for a skull that is already dying.
pub fn destroy_enemy(
    commands: &mut Commands,
    entity: Entity,
    brain: &mut EnemyBrain,
    height: f32,
    config: &EnemyConfig,
    kills: &mut EventWriter<EnemyKilled>,
) -> bool {
    if !brain.destroy() {
        return false;
    }

    kills.send(EnemyKilled { enemy: entity });
    commands.entity(entity).insert((
        HeightTween::new(height, config.sink_floor, height * config.sink_secs_per_unit),
        DeathTimer::from_secs(config.removal_delay_secs),
    ));
    true
}

/// Schedule every skull for removal without scoring it.
pub fn remove_all_enemies(
    commands: &mut Commands,
    enemies: &mut Query<(Entity, &mut EnemyBrain), Without<DeathTimer>>,
    config: &EnemyConfig,
) {
    for (entity, mut brain) in enemies.iter_mut() {
        brain.destroyed = true;
        commands
            .entity(entity)
            .insert(DeathTimer::from_secs(config.removal_delay_secs));
    }
}

/// Despawn skulls whose removal delay ran out.
pub fn despawn_dead_enemies(
    mut commands: Commands,
    time: Res<Time>,
    mut query: Query<(Entity, &mut DeathTimer)>,
) {
    for (entity, mut death_timer) in query.iter_mut() {
        death_timer.0.tick(time.delta());

        if death_timer.0.finished() {
            commands.entity(entity).despawn_recursive();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::ecs::system::RunSystemOnce;
    use std::time::Duration;

    fn wander_world(wander_target: Vec3) -> (World, Entity) {
        let mut world = World::new();
        let mut time = Time::<()>::default();
        time.advance_by(Duration::from_millis(100));
        world.insert_resource(time);
        world.insert_resource(GameConfig::default());
        world.insert_resource(EnemyRng::seeded(7));
        world.init_resource::<Events<PlayerAttacked>>();
        world.init_resource::<Events<SoundCue>>();

        // Far beyond follow range, so the skull wanders
        world.spawn((
            PlayerCamera::default(),
            GlobalTransform::from_translation(Vec3::new(0.0, 2.5, 500.0)),
        ));
        let skull = world
            .spawn((
                Enemy,
                Transform::from_xyz(0.0, 2.5, 0.0),
                EnemyBrain::new(100.0, wander_target),
                KinematicCharacterController::default(),
            ))
            .id();
        (world, skull)
    }

    #[test]
    fn target_reached_by_this_tick_move_is_replaced() {
        // 1.5 away before the move, 0.9 past it after 24 u/s for 0.1 s
        let target = Vec3::new(1.5, 2.5, 0.0);
        let (mut world, skull) = wander_world(target);

        world.run_system_once(step_enemies).unwrap();

        let brain = world.get::<EnemyBrain>(skull).unwrap();
        assert_ne!(brain.wander_target, target);
        let step = world
            .get::<KinematicCharacterController>(skull)
            .unwrap()
            .translation
            .unwrap();
        assert!((step.x - 2.4).abs() < 1e-4);
    }

    #[test]
    fn distant_target_is_kept() {
        let target = Vec3::new(30.0, 2.5, 0.0);
        let (mut world, skull) = wander_world(target);

        world.run_system_once(step_enemies).unwrap();

        assert_eq!(world.get::<EnemyBrain>(skull).unwrap().wander_target, target);
    }
}
