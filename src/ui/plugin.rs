//! UI plugin - menu buttons, HUD and the end-of-match menu.

use bevy::prelude::*;

use super::hud;
use crate::core::{GotoLevel, ReplayRequested};
use crate::first_level::FirstLevelSet;
use crate::level::{level_running, LevelEntity, LevelId};

const BUTTON_COLOR: Color = Color::srgb(0.15, 0.15, 0.2);
const BUTTON_HOVER_COLOR: Color = Color::srgb(0.25, 0.25, 0.3);
const BUTTON_PRESSED_COLOR: Color = Color::srgb(0.3, 0.3, 0.35);

/// UI plugin - handles all user interface.
pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, menu_button_input).add_systems(
            Update,
            (
                hud::update_stats,
                hud::show_end_menu,
                hud::hide_end_menu,
            )
                .after(FirstLevelSet::Flow)
                .run_if(level_running(LevelId::First)),
        );
    }
}

/// What a menu button does when pressed.
#[derive(Component, Debug, Clone, PartialEq, Eq)]
pub enum MenuButton {
    /// Switch to another level
    Goto(LevelId),
    /// Start another match after a game over
    Replay,
    ReturnToHome,
}

impl MenuButton {
    fn pressed(&self, goto: &mut EventWriter<GotoLevel>, replay: &mut EventWriter<ReplayRequested>) {
        match self {
            MenuButton::Goto(level) => {
                goto.send(GotoLevel::to(*level));
            }
            MenuButton::ReturnToHome => {
                goto.send(GotoLevel::to(LevelId::HomeMenu));
            }
            MenuButton::Replay => {
                replay.send(ReplayRequested);
            }
        }
    }
}

/// Helper to spawn a menu button.
pub fn spawn_menu_button(parent: &mut ChildBuilder, text: &str, button: MenuButton) {
    parent
        .spawn((
            Button,
            Node {
                width: Val::Px(220.0),
                height: Val::Px(50.0),
                margin: UiRect::all(Val::Px(10.0)),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            BackgroundColor(BUTTON_COLOR),
            button,
        ))
        .with_children(|button| {
            button.spawn((
                Text::new(text),
                TextFont {
                    font_size: 24.0,
                    ..default()
                },
                TextColor(Color::srgb(0.8, 0.8, 0.85)),
            ));
        });
}

/// Full-screen column with a title, owned by the current level.
///
/// Returns the root so callers can add lines and buttons to it.
pub fn spawn_menu_screen(commands: &mut Commands, title: &str) -> Entity {
    // Menus have no 3D camera of their own
    commands.spawn((Camera2d, LevelEntity));

    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            BackgroundColor(Color::srgb(0.05, 0.05, 0.08)),
            LevelEntity,
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new(title),
                TextFont {
                    font_size: 64.0,
                    ..default()
                },
                TextColor(Color::srgb(0.85, 0.8, 0.7)),
                Node {
                    margin: UiRect::bottom(Val::Px(40.0)),
                    ..default()
                },
            ));
        })
        .id()
}

/// Handle menu button interactions.
fn menu_button_input(
    mut interaction_query: Query<
        (&Interaction, &MenuButton, &mut BackgroundColor),
        (Changed<Interaction>, With<Button>),
    >,
    mut goto: EventWriter<GotoLevel>,
    mut replay: EventWriter<ReplayRequested>,
) {
    for (interaction, button, mut bg_color) in interaction_query.iter_mut() {
        match interaction {
            Interaction::Pressed => {
                *bg_color = BUTTON_PRESSED_COLOR.into();
                button.pressed(&mut goto, &mut replay);
            }
            Interaction::Hovered => {
                *bg_color = BUTTON_HOVER_COLOR.into();
            }
            Interaction::None => {
                *bg_color = BUTTON_COLOR.into();
            }
        }
    }
}
