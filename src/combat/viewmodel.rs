//! Rifle viewmodel - the first-person rifle and its kick and reload motions.
//!
//! The viewmodel is spawned as a child of the player's camera, so it never
//! trails behind the view.

use bevy::prelude::*;
use bevy::scene::SceneRoot;

use super::weapon::Weapon;
use crate::core::config::WeaponConfig;
use crate::core::SmoothTransform;

/// Rest offset of the rifle, local to the camera.
const REST_OFFSET: Vec3 = Vec3::new(0.35, -0.3, -0.7);

/// Marker for the weapon viewmodel entity.
#[derive(Component)]
pub struct WeaponViewmodel;

/// A one-off rifle motion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewmodelClip {
    /// Recoil after a shot
    Fire,
    /// Dip out of view and back while a magazine goes in
    Reload,
}

impl ViewmodelClip {
    fn duration_secs(self) -> f32 {
        match self {
            ViewmodelClip::Fire => 0.15,
            ViewmodelClip::Reload => 0.8,
        }
    }
}

/// Currently playing motion, if any.
#[derive(Component, Default)]
pub struct ViewmodelAnimation {
    playing: Option<(ViewmodelClip, Timer)>,
}

impl ViewmodelAnimation {
    /// Start `clip`, cutting whatever played before.
    pub fn play(&mut self, clip: ViewmodelClip) {
        self.playing = Some((clip, Timer::from_seconds(clip.duration_secs(), TimerMode::Once)));
    }

    pub fn current(&self) -> Option<ViewmodelClip> {
        self.playing.as_ref().map(|(clip, _)| *clip)
    }

    /// Returns the clip and its progress in `[0, 1]`.
    fn advance(&mut self, delta: std::time::Duration) -> Option<(ViewmodelClip, f32)> {
        let (clip, timer) = self.playing.as_mut()?;
        timer.tick(delta);
        if timer.finished() {
            self.playing = None;
            return None;
        }
        Some((*clip, timer.fraction()))
    }
}

/// Spawn the rifle under the camera. Returns the viewmodel entity.
pub fn spawn_viewmodel(
    commands: &mut Commands,
    camera: Entity,
    rifle: Option<Handle<Scene>>,
    config: &WeaponConfig,
) -> Entity {
    let mut viewmodel = commands.spawn((
        WeaponViewmodel,
        Weapon::new(config),
        ViewmodelAnimation::default(),
        Transform::from_translation(REST_OFFSET),
        SmoothTransform::new(15.0, 12.0),
        Visibility::default(),
    ));

    if let Some(rifle) = rifle {
        viewmodel.with_children(|parent| {
            parent.spawn((SceneRoot(rifle), Transform::default()));
        });
    }

    let viewmodel = viewmodel.id();
    commands.entity(camera).add_child(viewmodel);
    viewmodel
}

/// Offset and rotation targets for a clip at progress `t`.
fn clip_pose(clip: ViewmodelClip, t: f32) -> (Vec3, Quat) {
    // 0 → 1 → 0 over the clip
    let swing = (t * std::f32::consts::PI).sin();
    match clip {
        ViewmodelClip::Fire => (
            REST_OFFSET + Vec3::new(0.0, 0.02, 0.12) * swing,
            Quat::from_rotation_x(0.25 * swing),
        ),
        ViewmodelClip::Reload => (
            REST_OFFSET + Vec3::new(-0.05, -0.35, 0.0) * swing,
            Quat::from_euler(EulerRot::XYZ, -0.6 * swing, 0.0, 0.4 * swing),
        ),
    }
}

/// Drive the rifle motion, with a slight idle sway between clips.
pub fn update_viewmodel_animation(
    time: Res<Time>,
    mut viewmodel_query: Query<
        (&mut Transform, &mut SmoothTransform, &mut ViewmodelAnimation),
        With<WeaponViewmodel>,
    >,
) {
    for (mut transform, mut smooth, mut animation) in viewmodel_query.iter_mut() {
        match animation.advance(time.delta()) {
            Some((clip, t)) => {
                let (offset, rotation) = clip_pose(clip, t);
                smooth.target_translation = Some(offset);
                smooth.target_rotation = Some(rotation);
            }
            None => {
                smooth.target_translation = Some(REST_OFFSET);
                smooth.target_rotation = Some(Quat::IDENTITY);

                let idle_bob = (time.elapsed_secs() * 2.0).sin() * 0.005;
                let idle_sway = (time.elapsed_secs() * 1.5).cos() * 0.003;
                transform.rotation *= Quat::from_euler(EulerRot::XYZ, idle_bob, idle_sway, 0.0);
            }
        }
    }
}
