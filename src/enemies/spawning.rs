//! Skull spawning.

use bevy::prelude::*;
use bevy::scene::SceneRoot;
use bevy_rapier3d::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use super::components::*;
use crate::core::config::EnemyConfig;
use crate::level::LevelEntity;

/// Randomness for spawn points and wander targets.
#[derive(Resource)]
pub struct EnemyRng(pub StdRng);

impl Default for EnemyRng {
    fn default() -> Self {
        Self(StdRng::from_entropy())
    }
}

impl EnemyRng {
    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

/// Spawn one skull at a random point of the square of side `radius`.
///
/// `scene` is the skull model. Without it the skull is an invisible
/// collider, which still plays.
pub fn spawn_enemy(
    commands: &mut Commands,
    rng: &mut EnemyRng,
    scene: Option<Handle<Scene>>,
    config: &EnemyConfig,
    radius: f32,
) -> Entity {
    let position = random_point_in_square(&mut rng.0, radius, config.altitude);
    let wander_target = random_point_in_square(&mut rng.0, radius, config.altitude);

    let mut enemy = commands.spawn((
        Enemy,
        LevelEntity,
        EnemyBrain::new(radius, wander_target),
        Transform::from_translation(position),
        Visibility::default(),
        RigidBody::KinematicPositionBased,
        Collider::ball(config.collider_radius),
        KinematicCharacterController {
            offset: CharacterLength::Absolute(0.01),
            snap_to_ground: None,
            ..default()
        },
    ));

    if let Some(scene) = scene {
        enemy.with_children(|parent| {
            parent.spawn((
                SceneRoot(scene),
                Transform::from_scale(Vec3::splat(config.scale)),
            ));
        });
    }

    enemy.id()
}
