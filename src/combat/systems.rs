//! Combat systems - trigger handling, ray picking and cooldown.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use super::viewmodel::{ViewmodelAnimation, ViewmodelClip};
use super::weapon::{TriggerAction, Weapon};
use crate::core::{AmmoOver, EnemyKilled, GameConfig, SoundCue};
use crate::enemies::{destroy_enemy, Enemy, EnemyBrain};
use crate::level::{LevelEntity, LevelId, LevelRegistry};
use crate::player::{Player, PlayerCamera};

/// Marks where a shot hit the scenery.
#[derive(Component)]
pub struct ImpactMarker;

/// Side of the impact marker cube.
const IMPACT_MARKER_SIZE: f32 = 0.1;

/// The enemy a ray hit belongs to: the hit entity itself or its parent.
pub fn resolve_enemy_target(
    hit: Entity,
    is_enemy: impl Fn(Entity) -> bool,
    parent_of: impl Fn(Entity) -> Option<Entity>,
) -> Option<Entity> {
    if is_enemy(hit) {
        return Some(hit);
    }
    parent_of(hit).filter(|parent| is_enemy(*parent))
}

/// Put a fresh magazine in, with the dip and the sound.
pub fn reload_weapon(
    weapon: &mut Weapon,
    animation: &mut ViewmodelAnimation,
    cues: &mut EventWriter<SoundCue>,
) {
    weapon.reload();
    animation.play(ViewmodelClip::Reload);
    cues.send(SoundCue::Reload);
}

/// Fire on left click: spend a round, then ray-pick from the screen centre.
#[allow(clippy::too_many_arguments)]
pub fn fire_weapon(
    mut commands: Commands,
    mouse: Res<ButtonInput<MouseButton>>,
    registry: Res<LevelRegistry>,
    config: Res<GameConfig>,
    rapier_context: Query<&RapierContext>,
    camera_query: Query<&GlobalTransform, With<PlayerCamera>>,
    player_query: Query<Entity, With<Player>>,
    mut weapon_query: Query<(&mut Weapon, &mut ViewmodelAnimation)>,
    mut enemy_query: Query<(&mut EnemyBrain, &Transform), With<Enemy>>,
    parents: Query<&Parent>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut cues: EventWriter<SoundCue>,
    mut ammo_over: EventWriter<AmmoOver>,
    mut kills: EventWriter<EnemyKilled>,
) {
    if !mouse.just_pressed(MouseButton::Left) {
        return;
    }
    let Ok((mut weapon, mut animation)) = weapon_query.get_single_mut() else {
        return;
    };

    let outcome = weapon.pull_trigger(registry.control_enabled(LevelId::First));
    if outcome.ammo_over {
        ammo_over.send(AmmoOver);
    }

    match outcome.action {
        TriggerAction::EmptyClick => {
            cues.send(SoundCue::Empty);
            return;
        }
        TriggerAction::NoControl | TriggerAction::Cooldown => return,
        TriggerAction::Fired => {}
    }

    cues.send(SoundCue::Fire);
    animation.play(ViewmodelClip::Fire);

    let Ok(camera) = camera_query.get_single() else {
        return;
    };
    let Ok(context) = rapier_context.get_single() else {
        return;
    };

    let mut filter = QueryFilter::default();
    if let Ok(player) = player_query.get_single() {
        filter = filter.exclude_collider(player);
    }

    let origin = camera.translation();
    let direction = camera.forward().as_vec3();
    let Some((hit, distance)) =
        context.cast_ray(origin, direction, config.weapon.range, true, filter)
    else {
        return;
    };

    let target = resolve_enemy_target(
        hit,
        |entity| enemy_query.contains(entity),
        |entity| parents.get(entity).ok().map(Parent::get),
    );

    match target {
        Some(enemy) => {
            if let Ok((mut brain, transform)) = enemy_query.get_mut(enemy) {
                let height = transform.translation.y;
                destroy_enemy(
                    &mut commands,
                    enemy,
                    &mut brain,
                    height,
                    &config.enemy,
                    &mut kills,
                );
            }
        }
        None => {
            commands.spawn((
                ImpactMarker,
                LevelEntity,
                Mesh3d(meshes.add(Cuboid::from_length(IMPACT_MARKER_SIZE))),
                MeshMaterial3d(materials.add(StandardMaterial {
                    base_color: Color::WHITE,
                    unlit: true,
                    ..default()
                })),
                Transform::from_translation(origin + direction * distance),
            ));
        }
    }
}

/// Gameplay tick step: count the fire-rate cooldown down by real frame time.
pub fn decay_weapon_cooldown(time: Res<Time<Real>>, mut weapon_query: Query<&mut Weapon>) {
    let delta_ms = time.delta_secs() * 1000.0;
    for mut weapon in weapon_query.iter_mut() {
        weapon.control_fire_rate(delta_ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hit_resolves_directly_or_through_parent() {
        let mut world = World::new();
        let enemy = world.spawn_empty().id();
        let part = world.spawn_empty().id();
        let rock = world.spawn_empty().id();

        let is_enemy = |entity: Entity| entity == enemy;
        let parent_of = |entity: Entity| (entity == part).then_some(enemy);

        assert_eq!(resolve_enemy_target(enemy, is_enemy, parent_of), Some(enemy));
        assert_eq!(resolve_enemy_target(part, is_enemy, parent_of), Some(enemy));
        assert_eq!(resolve_enemy_target(rock, is_enemy, parent_of), None);
    }
}
