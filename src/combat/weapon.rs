//! The rifle: ammo, fire-rate cooldown and reload.

use bevy::prelude::*;

use crate::core::config::WeaponConfig;

/// What pulling the trigger did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerAction {
    /// No ammo. Only the empty click plays.
    EmptyClick,
    /// Cursor not locked, nothing fires.
    NoControl,
    /// Still cooling down from the last shot.
    Cooldown,
    /// A round left the barrel.
    Fired,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriggerOutcome {
    /// This pull spends the last round: time to drop an ammo box.
    pub ammo_over: bool,
    pub action: TriggerAction,
}

/// Rifle state, on the viewmodel entity.
#[derive(Component, Debug, Clone)]
pub struct Weapon {
    pub ammo: u32,
    /// Lifetime shot counter, never reset.
    pub shots: u32,
    /// Set when the last round is about to go, cleared by reload.
    pub empty: bool,
    can_fire: bool,
    cooldown_ms: f32,
    fire_rate_ms: f32,
    reload_amount: u32,
}

impl Weapon {
    pub fn new(config: &WeaponConfig) -> Self {
        Self {
            ammo: config.initial_ammo,
            shots: 0,
            empty: false,
            can_fire: true,
            cooldown_ms: 0.0,
            fire_rate_ms: config.fire_rate_ms,
            reload_amount: config.reload_amount,
        }
    }

    pub fn can_fire(&self) -> bool {
        self.can_fire
    }

    /// Handle a click on the trigger.
    pub fn pull_trigger(&mut self, control_enabled: bool) -> TriggerOutcome {
        let mut ammo_over = false;
        if self.ammo == 1 {
            if !self.empty {
                ammo_over = true;
                self.empty = true;
            }
        } else if self.ammo == 0 {
            return TriggerOutcome {
                ammo_over,
                action: TriggerAction::EmptyClick,
            };
        }

        let action = if !control_enabled {
            TriggerAction::NoControl
        } else if !self.can_fire {
            TriggerAction::Cooldown
        } else {
            self.ammo -= 1;
            self.shots += 1;
            self.can_fire = false;
            self.cooldown_ms = self.fire_rate_ms;
            TriggerAction::Fired
        };

        TriggerOutcome { ammo_over, action }
    }

    /// Count the cooldown down by `delta_ms`.
    pub fn control_fire_rate(&mut self, delta_ms: f32) {
        if self.can_fire {
            return;
        }
        self.cooldown_ms -= delta_ms;
        if self.cooldown_ms <= 0.0 {
            self.can_fire = true;
            self.cooldown_ms = 0.0;
        }
    }

    /// Add a magazine. There is no cap.
    pub fn reload(&mut self) {
        self.ammo += self.reload_amount;
        self.empty = false;
    }
}
