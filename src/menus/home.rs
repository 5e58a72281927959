//! Home menu level: music and the way into the game.

use bevy::prelude::*;

use crate::level::{LevelHooks, LevelId, LevelRegistry};
use crate::ui::{spawn_menu_button, spawn_menu_screen, MenuButton};

pub const TITLE: &str = "Skull Shooter";

pub struct HomeMenuPlugin;

impl Plugin for HomeMenuPlugin {
    fn build(&self, app: &mut App) {
        let hooks = LevelHooks {
            setup_assets: Some(app.register_system(super::setup_menu_music)),
            build_scene: Some(app.register_system(build_scene)),
            ..default()
        };
        app.world_mut()
            .get_resource_or_insert_with(LevelRegistry::default)
            .register(LevelId::HomeMenu, hooks);
    }
}

fn build_scene(mut commands: Commands) {
    let root = spawn_menu_screen(&mut commands, TITLE);
    commands.entity(root).with_children(|parent| {
        spawn_menu_button(parent, "Play Game", MenuButton::Goto(LevelId::First));
        spawn_menu_button(parent, "Credits", MenuButton::Goto(LevelId::Credits));
    });
}
