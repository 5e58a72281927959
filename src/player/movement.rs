//! First-person player movement and camera control.

use bevy::input::mouse::MouseMotion;
use bevy::render::camera::ClearColorConfig;
use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use super::components::*;
use crate::game::MovementIntent;
use crate::level::{LevelEntity, LevelId, LevelRegistry};

/// Capsule half height and radius; together they match the camera ellipsoid height.
const BODY_HALF_HEIGHT: f32 = 0.7;
const BODY_RADIUS: f32 = 1.0;

/// Gameplay level is running and not paused.
pub fn gameplay_active(registry: Option<Res<LevelRegistry>>) -> bool {
    registry.is_some_and(|r| r.is_running(LevelId::First) && !r.is_paused(LevelId::First))
}

fn control_enabled(registry: Option<Res<LevelRegistry>>) -> bool {
    registry.is_some_and(|r| r.control_enabled(LevelId::First))
}

/// Set up player movement systems.
pub fn setup_movement_systems(app: &mut App) {
    app.init_resource::<PlayerConfig>().add_systems(
        Update,
        (
            mouse_look.run_if(control_enabled),
            player_movement,
        )
            .run_if(gameplay_active),
    );
}

/// Handle mouse movement for looking around.
///
/// Rotates the player entity horizontally (yaw) and the camera vertically (pitch).
pub fn mouse_look(
    mut mouse_motion: EventReader<MouseMotion>,
    config: Res<PlayerConfig>,
    mut player_query: Query<&mut Transform, With<Player>>,
    mut camera_query: Query<(&mut Transform, &mut PlayerCamera), Without<Player>>,
) {
    let delta: Vec2 = mouse_motion.read().map(|event| event.delta).sum();
    if delta == Vec2::ZERO {
        return;
    }

    let Ok(mut player_transform) = player_query.get_single_mut() else {
        return;
    };
    let Ok((mut camera_transform, mut camera)) = camera_query.get_single_mut() else {
        return;
    };

    let sensitivity = config.mouse_sensitivity * 0.001;
    let y_invert = if config.invert_y { -1.0 } else { 1.0 };

    player_transform.rotate_y(-delta.x * sensitivity);

    camera.pitch -= delta.y * sensitivity * y_invert;
    camera.pitch = camera.pitch.clamp(-1.4, 1.4);
    camera_transform.rotation = Quat::from_rotation_x(camera.pitch);
}

/// Planar direction (local space, -Z forward) for the current intent.
pub fn intent_direction(intent: &MovementIntent) -> Vec3 {
    let mut direction = Vec3::ZERO;
    if intent.up {
        direction.z -= 1.0;
    }
    if intent.down {
        direction.z += 1.0;
    }
    if intent.left {
        direction.x -= 1.0;
    }
    if intent.right {
        direction.x += 1.0;
    }
    direction.normalize_or_zero()
}

/// Move the player from the movement intent, with gravity.
///
/// Uses Rapier's KinematicCharacterController for collision detection.
pub fn player_movement(
    intent: Res<MovementIntent>,
    time: Res<Time>,
    config: Res<PlayerConfig>,
    rapier_context: Query<&RapierContext>,
    mut player_query: Query<
        (
            Entity,
            &Transform,
            &mut MovementState,
            &mut KinematicCharacterController,
        ),
        With<Player>,
    >,
) {
    let Ok((player_entity, transform, mut movement_state, mut controller)) =
        player_query.get_single_mut()
    else {
        return;
    };

    // Short ray just below the capsule bottom
    let is_grounded = if let Ok(context) = rapier_context.get_single() {
        let ray_origin = transform.translation - Vec3::Y * (BODY_HALF_HEIGHT + BODY_RADIUS - 0.05);
        context
            .cast_ray(
                ray_origin,
                Vec3::NEG_Y,
                0.15,
                true,
                QueryFilter::default().exclude_collider(player_entity),
            )
            .is_some()
    } else {
        true
    };
    movement_state.is_grounded = is_grounded;

    if is_grounded {
        if movement_state.vertical_velocity < 0.0 {
            movement_state.vertical_velocity = 0.0;
        }
    } else {
        movement_state.vertical_velocity -= config.gravity * time.delta_secs();
    }

    let yaw = transform.rotation.to_euler(EulerRot::YXZ).0;
    let movement = Quat::from_rotation_y(yaw) * intent_direction(&intent);

    let horizontal = movement * config.move_speed * time.delta_secs();
    let vertical = Vec3::Y * movement_state.vertical_velocity * time.delta_secs();

    controller.translation = Some(horizontal + vertical);
}

/// Spawn the player body with its camera so the eye sits at `eye`.
///
/// Returns `(player, camera)`.
pub fn spawn_player(
    commands: &mut Commands,
    config: &PlayerConfig,
    eye: Vec3,
    clear_color: Color,
) -> (Entity, Entity) {
    let player = commands
        .spawn((
            Player,
            LevelEntity,
            MovementState::default(),
            Transform::from_translation(eye - Vec3::Y * config.eye_offset),
            Visibility::default(),
            RigidBody::KinematicPositionBased,
            Collider::capsule_y(BODY_HALF_HEIGHT, BODY_RADIUS),
            KinematicCharacterController {
                offset: CharacterLength::Absolute(0.01),
                max_slope_climb_angle: 45_f32.to_radians(),
                min_slope_slide_angle: 30_f32.to_radians(),
                snap_to_ground: Some(CharacterLength::Absolute(0.5)),
                ..default()
            },
        ))
        .id();

    let camera = commands
        .spawn((
            Camera3d::default(),
            Camera {
                clear_color: ClearColorConfig::Custom(clear_color),
                ..default()
            },
            Projection::Perspective(PerspectiveProjection {
                // The viewmodel sits very close to the eye
                near: 0.01,
                ..default()
            }),
            PlayerCamera::default(),
            Transform::from_xyz(0.0, config.eye_offset, 0.0),
        ))
        .id();
    commands.entity(player).add_child(camera);

    (player, camera)
}

/// Put the player back at the spawn point.
pub fn reset_player(
    config: &PlayerConfig,
    eye: Vec3,
    transform: &mut Transform,
    movement_state: &mut MovementState,
) {
    transform.translation = eye - Vec3::Y * config.eye_offset;
    movement_state.vertical_velocity = 0.0;
}
