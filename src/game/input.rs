//! Movement intent captured from the keyboard and swipe gestures.
//!
//! Both sources set the same four flags. Key flags follow key down/up;
//! swipe flags clear themselves after a short delay.

use std::time::Duration;

use bevy::input::touch::Touches;
use bevy::prelude::*;

/// Swipes shorter than this (in logical pixels) are taps.
const SWIPE_MIN_DISTANCE: f32 = 30.0;

/// Which way the player wants to move.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MovementIntent {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl MovementIntent {
    pub fn set(&mut self, direction: Direction, value: bool) {
        match direction {
            Direction::Up => self.up = value,
            Direction::Down => self.down = value,
            Direction::Left => self.left = value,
            Direction::Right => self.right = value,
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn any(&self) -> bool {
        self.up || self.down || self.left || self.right
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// How long a swipe keeps the flag set.
    pub fn swipe_hold(self) -> Duration {
        match self {
            Direction::Down => Duration::from_millis(100),
            _ => Duration::from_millis(150),
        }
    }

    fn keys(self) -> [KeyCode; 2] {
        match self {
            Direction::Up => [KeyCode::KeyW, KeyCode::ArrowUp],
            Direction::Down => [KeyCode::KeyS, KeyCode::ArrowDown],
            Direction::Left => [KeyCode::KeyA, KeyCode::ArrowLeft],
            Direction::Right => [KeyCode::KeyD, KeyCode::ArrowRight],
        }
    }
}

/// Classify a finished touch drag (screen space, y down).
pub fn swipe_direction(delta: Vec2) -> Option<Direction> {
    if delta.length() < SWIPE_MIN_DISTANCE {
        return None;
    }

    let direction = if delta.x.abs() > delta.y.abs() {
        if delta.x < 0.0 {
            Direction::Left
        } else {
            Direction::Right
        }
    } else if delta.y < 0.0 {
        Direction::Up
    } else {
        Direction::Down
    };
    Some(direction)
}

/// One-shot timers that clear swipe flags.
#[derive(Resource, Default)]
pub struct SwipeTimers {
    timers: Vec<(Direction, Timer)>,
}

impl SwipeTimers {
    pub fn schedule(&mut self, direction: Direction) {
        // A new swipe in the same direction restarts the hold
        self.timers.retain(|(d, _)| *d != direction);
        self.timers
            .push((direction, Timer::new(direction.swipe_hold(), TimerMode::Once)));
    }

    /// Advance all timers and return the directions whose hold ran out.
    pub fn tick(&mut self, delta: Duration) -> Vec<Direction> {
        let mut expired = Vec::new();
        self.timers.retain_mut(|(direction, timer)| {
            timer.tick(delta);
            if timer.finished() {
                expired.push(*direction);
                false
            } else {
                true
            }
        });
        expired
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }
}

/// Follow key down/up for WASD and arrows.
pub fn capture_keyboard(keyboard: Res<ButtonInput<KeyCode>>, mut intent: ResMut<MovementIntent>) {
    for direction in Direction::ALL {
        let keys = direction.keys();
        if keyboard.any_just_pressed(keys) {
            intent.set(direction, true);
        } else if keyboard.any_just_released(keys) {
            intent.set(direction, false);
        }
    }
}

/// Turn finished touch drags into short-lived movement flags.
pub fn capture_swipes(
    touches: Option<Res<Touches>>,
    mut intent: ResMut<MovementIntent>,
    mut timers: ResMut<SwipeTimers>,
) {
    let Some(touches) = touches else {
        return;
    };

    for touch in touches.iter_just_released() {
        let Some(direction) = swipe_direction(touch.position() - touch.start_position()) else {
            continue;
        };
        intent.set(direction, true);
        timers.schedule(direction);
    }
}

/// Clear swipe flags whose hold ran out.
pub fn expire_swipes(
    time: Res<Time<Real>>,
    mut intent: ResMut<MovementIntent>,
    mut timers: ResMut<SwipeTimers>,
) {
    if timers.is_empty() {
        return;
    }
    for direction in timers.tick(time.delta()) {
        intent.set(direction, false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn swipes_are_classified_by_dominant_axis() {
        assert_eq!(swipe_direction(Vec2::new(0.0, -80.0)), Some(Direction::Up));
        assert_eq!(swipe_direction(Vec2::new(5.0, 60.0)), Some(Direction::Down));
        assert_eq!(swipe_direction(Vec2::new(-90.0, 20.0)), Some(Direction::Left));
        assert_eq!(swipe_direction(Vec2::new(70.0, -10.0)), Some(Direction::Right));
        assert_eq!(swipe_direction(Vec2::new(3.0, 4.0)), None);
    }

    #[test]
    fn swipe_flags_clear_after_their_hold() {
        let mut intent = MovementIntent::default();
        let mut timers = SwipeTimers::default();

        intent.set(Direction::Up, true);
        timers.schedule(Direction::Up);
        intent.set(Direction::Down, true);
        timers.schedule(Direction::Down);

        for direction in timers.tick(Duration::from_millis(120)) {
            intent.set(direction, false);
        }
        assert!(intent.up);
        assert!(!intent.down);

        for direction in timers.tick(Duration::from_millis(40)) {
            intent.set(direction, false);
        }
        assert!(!intent.any());
        assert!(timers.is_empty());
    }

    #[test]
    fn repeated_swipe_restarts_the_hold() {
        let mut timers = SwipeTimers::default();
        timers.schedule(Direction::Left);
        assert!(timers.tick(Duration::from_millis(100)).is_empty());

        timers.schedule(Direction::Left);
        assert!(timers.tick(Duration::from_millis(100)).is_empty());
        assert_eq!(timers.tick(Duration::from_millis(60)), vec![Direction::Left]);
    }
}
