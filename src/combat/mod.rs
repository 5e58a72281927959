//! Combat module - the rifle, firing, and the viewmodel.

mod plugin;
mod systems;
mod viewmodel;
mod weapon;

pub use plugin::CombatPlugin;
pub use systems::{decay_weapon_cooldown, reload_weapon, resolve_enemy_target, ImpactMarker};
pub use viewmodel::{spawn_viewmodel, ViewmodelAnimation, ViewmodelClip, WeaponViewmodel};
pub use weapon::{TriggerAction, TriggerOutcome, Weapon};
