//! Static parts of the arena: lights, sky, ground and the ammo box.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use crate::core::config::LevelConfig;
use crate::level::LevelEntity;

const SAND_TEXTURE: &str = "images/sand.png";

/// The ammo box that reloads the rifle on contact.
#[derive(Component)]
pub struct AmmoBox;

/// Where the ammo box always appears.
const AMMO_BOX_POSITION: Vec3 = Vec3::new(0.0, 1.0, 0.0);
const AMMO_BOX_SIZE: Vec3 = Vec3::new(4.0, 2.0, 2.0);
/// Height of the marker arrow above the box centre.
const ARROW_HEIGHT: f32 = 4.0;

pub fn clear_color(config: &LevelConfig) -> Color {
    let (r, g, b) = config.clear_color;
    Color::srgb(r, g, b)
}

/// Lights, skybox and the ground plane.
pub fn spawn_environment(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    asset_server: &AssetServer,
    config: &LevelConfig,
) {
    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: 400.0,
    });

    commands.spawn((
        LevelEntity,
        DirectionalLight {
            illuminance: 3000.0,
            shadows_enabled: false,
            ..default()
        },
        Transform::default().looking_to(Vec3::NEG_Y, Vec3::Z),
    ));

    // Seen from inside, so no back-face culling
    commands.spawn((
        LevelEntity,
        Mesh3d(meshes.add(Cuboid::from_length(config.skybox_size))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb(0.55, 0.7, 0.85),
            unlit: true,
            cull_mode: None,
            ..default()
        })),
        Transform::default(),
    ));

    let half = config.ground_size / 2.0;
    commands.spawn((
        LevelEntity,
        Mesh3d(meshes.add(Plane3d::default().mesh().size(config.ground_size, config.ground_size))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color_texture: Some(asset_server.load(SAND_TEXTURE)),
            perceptual_roughness: 1.0,
            reflectance: 0.0,
            ..default()
        })),
        Transform::default(),
        RigidBody::Fixed,
        Collider::cuboid(half, 0.05, half),
    ));
}

/// Undo the global parts of [`spawn_environment`]. Entities go with the level.
pub fn clear_environment(commands: &mut Commands) {
    commands.insert_resource(AmbientLight::default());
}

/// Spawn the ammo box with its marker arrow.
pub fn spawn_ammo_box(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
) -> Entity {
    let arrow_mesh = meshes.add(Cone {
        radius: 1.0,
        height: 2.0,
    });
    let arrow_material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.1, 0.9, 0.2),
        unlit: true,
        ..default()
    });

    commands
        .spawn((
            AmmoBox,
            LevelEntity,
            Mesh3d(meshes.add(Cuboid::from_size(AMMO_BOX_SIZE))),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color: Color::srgb(0.45, 0.35, 0.2),
                ..default()
            })),
            Transform::from_translation(AMMO_BOX_POSITION),
            RigidBody::Fixed,
            Collider::cuboid(AMMO_BOX_SIZE.x / 2.0, AMMO_BOX_SIZE.y / 2.0, AMMO_BOX_SIZE.z / 2.0),
        ))
        .with_children(|parent| {
            // Tip points down at the box
            parent.spawn((
                Mesh3d(arrow_mesh),
                MeshMaterial3d(arrow_material),
                Transform::from_xyz(0.0, ARROW_HEIGHT, 0.0)
                    .with_rotation(Quat::from_rotation_x(std::f32::consts::PI)),
            ));
        })
        .id()
}
