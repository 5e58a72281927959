//! Transform tweening: smooth chasing of a target and fixed-duration moves.

use bevy::prelude::*;

/// Component for smooth transform interpolation.
#[derive(Component)]
pub struct SmoothTransform {
    /// Target translation (None = don't animate)
    pub target_translation: Option<Vec3>,
    /// Target rotation (None = don't animate)
    pub target_rotation: Option<Quat>,
    /// Interpolation speed multiplier (higher = faster)
    pub translation_speed: f32,
    pub rotation_speed: f32,
}

impl Default for SmoothTransform {
    fn default() -> Self {
        Self {
            target_translation: None,
            target_rotation: None,
            translation_speed: 12.0,
            rotation_speed: 12.0,
        }
    }
}

impl SmoothTransform {
    pub fn new(translation_speed: f32, rotation_speed: f32) -> Self {
        Self {
            translation_speed,
            rotation_speed,
            ..default()
        }
    }
}

/// Linear move of a single axis value over a fixed duration.
///
/// Used for the sinking skull: the duration is proportional to the height
/// it starts from, so every skull sinks at the same speed.
#[derive(Component, Debug, Clone)]
pub struct HeightTween {
    pub from: f32,
    pub to: f32,
    pub duration: f32,
    pub elapsed: f32,
}

impl HeightTween {
    pub fn new(from: f32, to: f32, duration: f32) -> Self {
        Self {
            from,
            to,
            duration,
            elapsed: 0.0,
        }
    }

    /// Advance by `dt` seconds and return the current value.
    pub fn advance(&mut self, dt: f32) -> f32 {
        self.elapsed = (self.elapsed + dt).min(self.duration);
        self.value()
    }

    pub fn value(&self) -> f32 {
        if self.duration <= 0.0 {
            return self.to;
        }
        let t = (self.elapsed / self.duration).clamp(0.0, 1.0);
        self.from + (self.to - self.from) * t
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }
}

/// System that interpolates transforms toward their targets.
pub fn update_smooth_transforms(
    time: Res<Time>,
    mut query: Query<(&mut Transform, &SmoothTransform)>,
) {
    let dt = time.delta_secs();

    for (mut transform, smooth) in query.iter_mut() {
        if let Some(target) = smooth.target_translation {
            let t = (smooth.translation_speed * dt).min(1.0);
            transform.translation = transform.translation.lerp(target, t);
        }

        if let Some(target) = smooth.target_rotation {
            let t = (smooth.rotation_speed * dt).min(1.0);
            transform.rotation = transform.rotation.slerp(target, t);
        }
    }
}

/// System that drives height tweens and drops them once done.
pub fn update_height_tweens(
    mut commands: Commands,
    time: Res<Time>,
    mut query: Query<(Entity, &mut Transform, &mut HeightTween)>,
) {
    for (entity, mut transform, mut tween) in query.iter_mut() {
        transform.translation.y = tween.advance(time.delta_secs());
        if tween.is_finished() {
            commands.entity(entity).remove::<HeightTween>();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn height_tween_is_linear_and_clamped() {
        let mut tween = HeightTween::new(2.5, 0.5, 0.25);

        assert!((tween.advance(0.125) - 1.5).abs() < 1e-5);
        assert!(!tween.is_finished());

        assert_eq!(tween.advance(10.0), 0.5);
        assert!(tween.is_finished());
    }

    #[test]
    fn zero_duration_jumps_to_target() {
        let tween = HeightTween::new(3.0, 0.5, 0.0);
        assert_eq!(tween.value(), 0.5);
    }
}
