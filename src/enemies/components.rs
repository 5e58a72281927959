//! Enemy-related components.

use bevy::prelude::*;
use rand::Rng;

use crate::core::config::EnemyConfig;

/// Marker component for all enemies.
#[derive(Component)]
pub struct Enemy;

/// Where an enemy should head this tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Steering {
    /// Toward the player at `speed_factor` times the base speed.
    Player { speed_factor: f32 },
    /// Toward the current wander target at base speed.
    Wander,
    /// Stay put.
    Hold,
}

/// What one behaviour step decided.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepOutcome {
    pub steering: Steering,
    /// Entered attack mode on this step.
    pub attack_cue: bool,
    /// Landed a hit on the player on this step.
    pub attacked_player: bool,
}

impl StepOutcome {
    const IDLE: Self = Self {
        steering: Steering::Hold,
        attack_cue: false,
        attacked_player: false,
    };
}

/// Skull behaviour: wander far away, follow when near, attack when close.
///
/// The mode is picked fresh every step from the distance to the player.
/// Attack and close-to-player are edge triggered: the cue plays once per
/// continuous attack run and damage lands once per approach.
#[derive(Component, Debug, Clone)]
pub struct EnemyBrain {
    pub following: bool,
    pub attacking: bool,
    pub close_to_player: bool,
    pub destroyed: bool,
    pub wander_target: Vec3,
    /// Side of the square wander targets are drawn from.
    pub radius: f32,
}

impl EnemyBrain {
    pub fn new(radius: f32, wander_target: Vec3) -> Self {
        Self {
            following: false,
            attacking: false,
            close_to_player: false,
            destroyed: false,
            wander_target,
            radius,
        }
    }

    /// Advance one tick given the distance to the player.
    pub fn step(&mut self, distance: f32, config: &EnemyConfig) -> StepOutcome {
        if self.destroyed {
            return StepOutcome::IDLE;
        }

        if distance <= config.attack_distance {
            self.attack(distance, config)
        } else if distance <= config.follow_distance {
            self.attacking = false;
            self.following = true;
            StepOutcome {
                steering: Steering::Player { speed_factor: 1.0 },
                ..StepOutcome::IDLE
            }
        } else {
            StepOutcome {
                steering: Steering::Wander,
                ..StepOutcome::IDLE
            }
        }
    }

    fn attack(&mut self, distance: f32, config: &EnemyConfig) -> StepOutcome {
        self.following = false;

        let attack_cue = !self.attacking;
        self.attacking = true;

        let steering = if distance > config.stop_distance {
            Steering::Player { speed_factor: 2.0 }
        } else {
            Steering::Hold
        };

        let mut attacked_player = false;
        if distance <= config.close_distance {
            attacked_player = !self.close_to_player;
            self.close_to_player = true;
        } else {
            self.close_to_player = false;
        }

        StepOutcome {
            steering,
            attack_cue,
            attacked_player,
        }
    }

    /// Mark destroyed. Returns false if it already was.
    pub fn destroy(&mut self) -> bool {
        if self.destroyed {
            return false;
        }
        self.destroyed = true;
        true
    }

    /// Wander target reached: draw the next one.
    pub fn wander_target_reached(&self, position: Vec3, config: &EnemyConfig) -> bool {
        self.wander_target.distance(position) <= config.target_reached_distance
    }
}

/// Uniform point in the square of side `side` around the origin.
pub fn random_point_in_square(rng: &mut impl Rng, side: f32, altitude: f32) -> Vec3 {
    let half = side / 2.0;
    if half <= 0.0 {
        return Vec3::new(0.0, altitude, 0.0);
    }
    Vec3::new(
        rng.gen_range(-half..half),
        altitude,
        rng.gen_range(-half..half),
    )
}

/// Yaw that faces `direction`, the skull model looks down -Z.
pub fn facing_yaw(direction: Vec3) -> f32 {
    (-direction.x).atan2(-direction.z)
}

/// Despawns the enemy when it runs out.
#[derive(Component)]
pub struct DeathTimer(pub Timer);

impl DeathTimer {
    pub fn from_secs(secs: f32) -> Self {
        Self(Timer::from_seconds(secs, TimerMode::Once))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn brain() -> EnemyBrain {
        EnemyBrain::new(100.0, Vec3::new(10.0, 2.5, 10.0))
    }

    #[test]
    fn mode_boundaries_are_inclusive() {
        let config = EnemyConfig::default();

        let mut at_five = brain();
        at_five.step(5.0, &config);
        assert!(at_five.attacking);

        let mut at_follow = brain();
        let outcome = at_follow.step(27.0, &config);
        assert!(at_follow.following && !at_follow.attacking);
        assert_eq!(outcome.steering, Steering::Player { speed_factor: 1.0 });

        let mut beyond = brain();
        assert_eq!(beyond.step(27.0001, &config).steering, Steering::Wander);
        assert!(!beyond.following && !beyond.attacking);
    }

    #[test]
    fn sustained_contact_hits_once() {
        let config = EnemyConfig::default();
        let mut brain = brain();

        let outcomes: Vec<_> = (0..10).map(|_| brain.step(2.0, &config)).collect();

        assert_eq!(outcomes.iter().filter(|o| o.attacked_player).count(), 1);
        assert_eq!(outcomes.iter().filter(|o| o.attack_cue).count(), 1);
        // Inside the stop distance the skull holds position
        assert!(outcomes.iter().all(|o| o.steering == Steering::Hold));
    }

    #[test]
    fn closing_in_runs_at_double_speed() {
        let config = EnemyConfig::default();
        let mut brain = brain();
        let outcome = brain.step(4.0, &config);
        assert_eq!(outcome.steering, Steering::Player { speed_factor: 2.0 });
        assert!(!outcome.attacked_player);
    }

    #[test]
    fn backing_off_rearms_the_hit() {
        let config = EnemyConfig::default();
        let mut brain = brain();

        assert!(brain.step(3.0, &config).attacked_player);
        assert!(!brain.step(3.0, &config).attacked_player);
        // Still attacking, but outside the close range
        assert!(!brain.step(4.5, &config).attacked_player);
        assert!(brain.step(3.0, &config).attacked_player);
    }

    #[test]
    fn reentering_attack_plays_the_cue_again() {
        let config = EnemyConfig::default();
        let mut brain = brain();

        assert!(brain.step(4.0, &config).attack_cue);
        brain.step(10.0, &config);
        assert!(brain.step(4.0, &config).attack_cue);
    }

    #[test]
    fn wandering_keeps_previous_flags() {
        let config = EnemyConfig::default();
        let mut brain = brain();
        brain.step(10.0, &config);
        brain.step(50.0, &config);
        assert!(brain.following);
    }

    #[test]
    fn destroyed_brain_is_frozen() {
        let config = EnemyConfig::default();
        let mut brain = brain();

        assert!(brain.destroy());
        assert!(!brain.destroy());
        assert_eq!(brain.step(2.0, &config), StepOutcome::IDLE);
        assert!(!brain.attacking);
    }

    #[test]
    fn random_points_stay_in_the_square() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let point = random_point_in_square(&mut rng, 110.0, 2.5);
            assert!(point.x >= -55.0 && point.x < 55.0);
            assert!(point.z >= -55.0 && point.z < 55.0);
            assert_eq!(point.y, 2.5);
        }
    }

    #[test]
    fn yaw_faces_the_direction() {
        assert!(facing_yaw(Vec3::NEG_Z).abs() < 1e-6);
        let yaw = facing_yaw(Vec3::X);
        assert!((yaw + std::f32::consts::FRAC_PI_2).abs() < 1e-6);
    }
}
