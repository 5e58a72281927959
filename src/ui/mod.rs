//! UI module - menu widgets, the match HUD and the end-of-match menu.

mod hud;
mod plugin;

pub use hud::{
    ammo_text, hits_text, life_text, spawn_end_menu, spawn_hud, AmmoText, EndMenu, HitsText,
    HudRoot, LifeText, NewRecordText, PointsText,
};
pub use plugin::{spawn_menu_button, spawn_menu_screen, MenuButton, UiPlugin};
