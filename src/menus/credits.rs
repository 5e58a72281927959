//! Credits level.

use bevy::prelude::*;

use crate::level::{LevelHooks, LevelId, LevelRegistry};
use crate::ui::{spawn_menu_button, spawn_menu_screen, MenuButton};

/// Asset attributions. The licenses require them.
const CREDITS: [&str; 4] = [
    "Design and Code by Tiago Silva Pereira Rodrigues\nkingofcode.com.br",
    "Music by Eric Matyas\nwww.soundimage.org",
    "Rifle model by 3DMaesen (bumstrum) under CC BY 4.0\nhttps://sketchfab.com/bumstrum",
    "Skybox Textures from BabylonJS\nhttps://doc.babylonjs.com/resources/playground_textures",
];

pub struct CreditsPlugin;

impl Plugin for CreditsPlugin {
    fn build(&self, app: &mut App) {
        let hooks = LevelHooks {
            setup_assets: Some(app.register_system(super::setup_menu_music)),
            build_scene: Some(app.register_system(build_scene)),
            ..default()
        };
        app.world_mut()
            .get_resource_or_insert_with(LevelRegistry::default)
            .register(LevelId::Credits, hooks);
    }
}

fn build_scene(mut commands: Commands) {
    let root = spawn_menu_screen(&mut commands, "Credits");
    commands.entity(root).with_children(|parent| {
        for line in CREDITS {
            parent.spawn((
                Text::new(line),
                TextFont {
                    font_size: 20.0,
                    ..default()
                },
                TextColor(Color::srgb(0.75, 0.75, 0.8)),
                Node {
                    margin: UiRect::bottom(Val::Px(18.0)),
                    ..default()
                },
            ));
        }

        spawn_menu_button(parent, "Return to Home", MenuButton::ReturnToHome);
    });
}
