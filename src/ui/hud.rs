//! In-match HUD and the end-of-match menu.

use bevy::prelude::*;

use super::plugin::{spawn_menu_button, MenuButton};
use crate::combat::Weapon;
use crate::core::{GameOver, Replay};
use crate::first_level::MatchState;
use crate::level::LevelEntity;
use crate::persistence::HighScores;
use crate::player::Score;

const RECORD_TEXT_COLOR: Color = Color::srgb(1.0, 0.84, 0.0);

/// Marker for HUD root entities.
#[derive(Component)]
pub struct HudRoot;

#[derive(Component)]
pub struct LifeText;

#[derive(Component)]
pub struct AmmoText;

#[derive(Component)]
pub struct HitsText;

/// Root of the end-of-match menu. Hidden while playing.
#[derive(Component)]
pub struct EndMenu;

#[derive(Component)]
pub struct PointsText;

#[derive(Component)]
pub struct CurrentRecordText;

/// Only visible when the match set a new record.
#[derive(Component)]
pub struct NewRecordText;

pub fn life_text(life: i32) -> String {
    format!("Life: {}", life)
}

pub fn ammo_text(ammo: u32) -> String {
    format!("Ammo: {}", ammo)
}

pub fn hits_text(hits: u32) -> String {
    format!("Hits: {}", hits)
}

fn hud_text(value: String, font_size: f32) -> (Text, TextFont, TextColor) {
    (
        Text::new(value),
        TextFont {
            font_size,
            ..default()
        },
        TextColor(Color::WHITE),
    )
}

/// Spawn the stat line and the crosshair.
pub fn spawn_hud(commands: &mut Commands, life: i32, ammo: u32, hits: u32) {
    // Life left, ammo centre, hits right
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                flex_direction: FlexDirection::Row,
                justify_content: JustifyContent::SpaceBetween,
                padding: UiRect::all(Val::Px(10.0)),
                position_type: PositionType::Absolute,
                top: Val::Px(0.0),
                ..default()
            },
            HudRoot,
            LevelEntity,
        ))
        .with_children(|parent| {
            parent.spawn((hud_text(life_text(life), 24.0), LifeText));
            parent.spawn((hud_text(ammo_text(ammo), 24.0), AmmoText));
            parent.spawn((hud_text(hits_text(hits), 24.0), HitsText));
        });

    // Crosshair (center of screen)
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                position_type: PositionType::Absolute,
                ..default()
            },
            HudRoot,
            LevelEntity,
        ))
        .with_children(|parent| {
            parent.spawn((
                Node {
                    width: Val::Px(6.0),
                    height: Val::Px(6.0),
                    ..default()
                },
                BackgroundColor(Color::srgba(1.0, 1.0, 1.0, 0.7)),
            ));
        });
}

/// Spawn the end-of-match menu, hidden.
pub fn spawn_end_menu(commands: &mut Commands) {
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                position_type: PositionType::Absolute,
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.5)),
            Visibility::Hidden,
            EndMenu,
            LevelEntity,
        ))
        .with_children(|parent| {
            parent.spawn((hud_text("Points: 0".to_string(), 40.0), PointsText));
            parent.spawn((
                hud_text("Current Record: 0".to_string(), 24.0),
                CurrentRecordText,
            ));
            parent.spawn((
                Text::new("You got a new Points Record!"),
                TextFont {
                    font_size: 20.0,
                    ..default()
                },
                TextColor(RECORD_TEXT_COLOR),
                Visibility::Hidden,
                NewRecordText,
            ));
            parent.spawn((
                Text::new("GAME OVER"),
                TextFont {
                    font_size: 25.0,
                    ..default()
                },
                TextColor(RECORD_TEXT_COLOR),
                Node {
                    margin: UiRect::vertical(Val::Px(10.0)),
                    ..default()
                },
            ));

            spawn_menu_button(parent, "Replay Game", MenuButton::Replay);
            spawn_menu_button(parent, "Return to Home", MenuButton::ReturnToHome);
        });
}

fn set_text(text: &mut Text, value: String) {
    if text.0 != value {
        text.0 = value;
    }
}

/// Keep `Life`, `Ammo` and `Hits` in sync with the match.
pub fn update_stats(
    state: Res<MatchState>,
    score: Res<Score>,
    weapon_query: Query<&Weapon>,
    mut life_query: Query<&mut Text, (With<LifeText>, Without<AmmoText>, Without<HitsText>)>,
    mut ammo_query: Query<&mut Text, (With<AmmoText>, Without<LifeText>, Without<HitsText>)>,
    mut hits_query: Query<&mut Text, (With<HitsText>, Without<LifeText>, Without<AmmoText>)>,
) {
    if let Ok(mut text) = life_query.get_single_mut() {
        set_text(&mut text, life_text(state.player_life));
    }
    if let (Ok(mut text), Ok(weapon)) = (ammo_query.get_single_mut(), weapon_query.get_single()) {
        set_text(&mut text, ammo_text(weapon.ammo));
    }
    if let Ok(mut text) = hits_query.get_single_mut() {
        set_text(&mut text, hits_text(score.hits));
    }
}

/// Show the final score once the match ended.
#[allow(clippy::type_complexity)]
pub fn show_end_menu(
    mut game_over: EventReader<GameOver>,
    score: Res<Score>,
    high_scores: Res<HighScores>,
    mut menu_query: Query<&mut Visibility, (With<EndMenu>, Without<NewRecordText>)>,
    mut banner_query: Query<&mut Visibility, (With<NewRecordText>, Without<EndMenu>)>,
    mut points_query: Query<&mut Text, (With<PointsText>, Without<CurrentRecordText>)>,
    mut record_query: Query<&mut Text, (With<CurrentRecordText>, Without<PointsText>)>,
) {
    if game_over.read().count() == 0 {
        return;
    }

    if let Ok(mut text) = points_query.get_single_mut() {
        set_text(&mut text, format!("Points: {}", score.points));
    }
    if let Ok(mut text) = record_query.get_single_mut() {
        set_text(
            &mut text,
            format!("Current Record: {}", score.last_record(high_scores.0.as_ref())),
        );
    }
    if let Ok(mut banner) = banner_query.get_single_mut() {
        *banner = if score.points_record {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
    }
    if let Ok(mut menu) = menu_query.get_single_mut() {
        *menu = Visibility::Visible;
    }
}

pub fn hide_end_menu(
    mut replay: EventReader<Replay>,
    mut menu_query: Query<&mut Visibility, With<EndMenu>>,
) {
    if replay.read().count() == 0 {
        return;
    }
    if let Ok(mut menu) = menu_query.get_single_mut() {
        *menu = Visibility::Hidden;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stat_lines() {
        assert_eq!(life_text(100), "Life: 100");
        assert_eq!(ammo_text(0), "Ammo: 0");
        assert_eq!(hits_text(7), "Hits: 7");
    }
}
