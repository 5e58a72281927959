//! Audio plugin - level music and gameplay sound cues through kira.

use bevy::prelude::*;
use bevy_kira_audio::{Audio, AudioControl};

use crate::core::{AssetsLoaded, ExitStarted, SoundCue};
use crate::level::{AssetRegistry, SoundEntry};

/// Audio plugin - expects `bevy_kira_audio::AudioPlugin` to be added by the app.
pub struct GameAudioPlugin;

impl Plugin for GameAudioPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, (level_music, play_sound_cues).chain());
    }
}

fn play_entry(audio: &Audio, entry: &SoundEntry) {
    let mut command = audio.play(entry.handle.clone());
    command.with_volume(entry.options.volume);
    if entry.options.looped {
        command.looped();
    }
}

/// Silence everything when a level exits; start autoplay tracks once loaded.
fn level_music(
    mut exits: EventReader<ExitStarted>,
    mut loaded: EventReader<AssetsLoaded>,
    assets: Option<Res<AssetRegistry>>,
    audio: Res<Audio>,
) {
    if exits.read().count() > 0 {
        audio.stop();
    }

    for AssetsLoaded(level) in loaded.read() {
        let Some(assets) = assets.as_deref() else {
            continue;
        };
        // Completion of a level that is already gone
        if assets.owner() != *level {
            continue;
        }
        for entry in assets.autoplay_sounds() {
            play_entry(&audio, entry);
        }
    }
}

/// Play the clip behind every cue. Missing clips are skipped.
fn play_sound_cues(
    mut cues: EventReader<SoundCue>,
    assets: Option<Res<AssetRegistry>>,
    audio: Res<Audio>,
) {
    let Some(assets) = assets.as_deref() else {
        cues.clear();
        return;
    };

    for cue in cues.read() {
        if let Some(entry) = assets.get_sound(cue.asset_name()) {
            play_entry(&audio, entry);
        }
    }
}
