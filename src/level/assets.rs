//! Per-level asset registry: named meshes and sounds.
//!
//! A level queues what it needs in its `setup_assets` hook. Every queued file
//! is an independent task; a failed task is logged and never blocks its
//! siblings. Once every task settled the level is told loading is done.

use std::collections::HashMap;

use bevy::asset::{LoadState, UntypedAssetId};
use bevy::prelude::*;
use bevy_kira_audio::AudioSource;

use super::lifecycle::{complete_loading, LevelId};

/// Playback options for a named sound.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SoundOptions {
    pub volume: f64,
    pub looped: bool,
    /// Play as soon as the level finished loading.
    pub autoplay: bool,
}

impl Default for SoundOptions {
    fn default() -> Self {
        Self {
            volume: 1.0,
            looped: false,
            autoplay: false,
        }
    }
}

impl SoundOptions {
    pub fn volume(volume: f64) -> Self {
        Self {
            volume,
            ..default()
        }
    }

    /// Music defaults: looped, autoplayed, half volume.
    pub fn music() -> Self {
        Self {
            volume: 0.5,
            looped: true,
            autoplay: true,
        }
    }
}

/// A loaded sound plus how to play it.
#[derive(Debug, Clone)]
pub struct SoundEntry {
    pub handle: Handle<AudioSource>,
    pub options: SoundOptions,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    Mesh,
    Sound,
}

/// Result of checking one task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskStatus {
    Pending,
    Loaded,
    Failed(String),
}

/// One queued file.
#[derive(Debug, Clone)]
pub struct AssetTask {
    pub name: String,
    pub kind: AssetKind,
    pub id: UntypedAssetId,
    settled: bool,
}

/// Named meshes and sounds of the current level.
#[derive(Resource)]
pub struct AssetRegistry {
    owner: LevelId,
    meshes: HashMap<String, Handle<Scene>>,
    sounds: HashMap<String, SoundEntry>,
    pending_meshes: HashMap<String, Handle<Scene>>,
    pending_sounds: HashMap<String, SoundEntry>,
    tasks: Vec<AssetTask>,
    loading: bool,
}

impl AssetRegistry {
    pub fn new(owner: LevelId) -> Self {
        Self {
            owner,
            meshes: HashMap::new(),
            sounds: HashMap::new(),
            pending_meshes: HashMap::new(),
            pending_sounds: HashMap::new(),
            tasks: Vec::new(),
            loading: false,
        }
    }

    /// Level this registry was created for.
    pub fn owner(&self) -> LevelId {
        self.owner
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Queue a scene (glTF `#Scene0` path) under `name`.
    pub fn add_mesh(&mut self, asset_server: &AssetServer, name: &str, path: &str) {
        self.track_mesh(name, asset_server.load(path.to_string()));
    }

    /// Queue a sound effect under `name`.
    pub fn add_sound(
        &mut self,
        asset_server: &AssetServer,
        name: &str,
        path: &str,
        options: SoundOptions,
    ) {
        self.track_sound(name, asset_server.load(path.to_string()), options);
    }

    /// Queue a music track: looped and autoplayed, volume as given.
    pub fn add_music(&mut self, asset_server: &AssetServer, name: &str, path: &str, volume: f64) {
        let options = SoundOptions {
            volume,
            ..SoundOptions::music()
        };
        self.add_sound(asset_server, name, path, options);
    }

    pub fn track_mesh(&mut self, name: &str, handle: Handle<Scene>) {
        self.tasks.push(AssetTask {
            name: name.to_string(),
            kind: AssetKind::Mesh,
            id: handle.id().untyped(),
            settled: false,
        });
        self.pending_meshes.insert(name.to_string(), handle);
    }

    pub fn track_sound(&mut self, name: &str, handle: Handle<AudioSource>, options: SoundOptions) {
        self.tasks.push(AssetTask {
            name: name.to_string(),
            kind: AssetKind::Sound,
            id: handle.id().untyped(),
            settled: false,
        });
        self.pending_sounds
            .insert(name.to_string(), SoundEntry { handle, options });
    }

    /// Mark the queue complete; from now on settling every task finishes loading.
    pub fn begin_loading(&mut self) {
        self.loading = true;
    }

    /// Check every unsettled task with `status_of`.
    ///
    /// Returns the owner level exactly once, on the call where the last task
    /// settled (or immediately if nothing was queued).
    pub fn poll(&mut self, mut status_of: impl FnMut(&AssetTask) -> TaskStatus) -> Option<LevelId> {
        if !self.loading {
            return None;
        }

        let mut outcomes = Vec::new();
        for task in self.tasks.iter_mut().filter(|task| !task.settled) {
            match status_of(task) {
                TaskStatus::Pending => {}
                status => {
                    task.settled = true;
                    outcomes.push((task.name.clone(), task.kind, status));
                }
            }
        }

        for (name, kind, status) in outcomes {
            match status {
                TaskStatus::Loaded => self.publish(&name, kind),
                TaskStatus::Failed(details) => {
                    error!("Asset task '{}' failed: {}", name, details);
                }
                TaskStatus::Pending => {}
            }
        }

        if self.tasks.iter().all(|task| task.settled) {
            self.loading = false;
            return Some(self.owner);
        }
        None
    }

    fn publish(&mut self, name: &str, kind: AssetKind) {
        match kind {
            AssetKind::Mesh => {
                if let Some(handle) = self.pending_meshes.remove(name) {
                    self.meshes.insert(name.to_string(), handle);
                }
            }
            AssetKind::Sound => {
                if let Some(entry) = self.pending_sounds.remove(name) {
                    self.sounds.insert(name.to_string(), entry);
                }
            }
        }
    }

    /// A loaded mesh. Missing names are logged and yield `None`.
    pub fn get_mesh(&self, name: &str) -> Option<Handle<Scene>> {
        let mesh = self.meshes.get(name).cloned();
        if mesh.is_none() {
            debug!("There is no mesh called \"{}\"", name);
        }
        mesh
    }

    /// A loaded sound. Missing names are logged and yield `None`.
    pub fn get_sound(&self, name: &str) -> Option<&SoundEntry> {
        let sound = self.sounds.get(name);
        if sound.is_none() {
            debug!("There is no sound called \"{}\"", name);
        }
        sound
    }

    /// Loaded sounds flagged to start on their own.
    pub fn autoplay_sounds(&self) -> impl Iterator<Item = &SoundEntry> {
        self.sounds.values().filter(|entry| entry.options.autoplay)
    }
}

fn task_status(asset_server: &AssetServer, task: &AssetTask) -> TaskStatus {
    match asset_server.get_load_state(task.id) {
        Some(LoadState::Loaded) => TaskStatus::Loaded,
        Some(LoadState::Failed(e)) => TaskStatus::Failed(e.to_string()),
        // Never handed to the server, nothing will ever come
        None => TaskStatus::Failed("unknown asset".to_string()),
        Some(_) => TaskStatus::Pending,
    }
}

/// Exclusive system: settle asset tasks and finish loading the owner level.
pub fn drive_asset_loading(world: &mut World) {
    let Some(asset_server) = world.get_resource::<AssetServer>().cloned() else {
        return;
    };

    let finished = {
        let Some(mut registry) = world.get_resource_mut::<AssetRegistry>() else {
            return;
        };
        registry.poll(|task| task_status(&asset_server, task))
    };

    if let Some(level) = finished {
        complete_loading(world, level);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry_with_two_tasks() -> AssetRegistry {
        let mut registry = AssetRegistry::new(LevelId::First);
        registry.track_mesh("enemy", Handle::default());
        registry.track_sound("shotgun", Handle::default(), SoundOptions::volume(0.4));
        registry.begin_loading();
        registry
    }

    #[test]
    fn nothing_is_reported_before_loading_begins() {
        let mut registry = AssetRegistry::new(LevelId::HomeMenu);
        assert_eq!(registry.poll(|_| TaskStatus::Loaded), None);
    }

    #[test]
    fn empty_queue_finishes_immediately() {
        let mut registry = AssetRegistry::new(LevelId::Credits);
        registry.begin_loading();
        assert_eq!(registry.poll(|_| TaskStatus::Pending), Some(LevelId::Credits));
        assert!(!registry.is_loading());
    }

    #[test]
    fn waits_for_every_task_to_settle() {
        let mut registry = registry_with_two_tasks();

        let first = registry.poll(|task| match task.kind {
            AssetKind::Mesh => TaskStatus::Loaded,
            AssetKind::Sound => TaskStatus::Pending,
        });
        assert_eq!(first, None);
        assert!(registry.get_mesh("enemy").is_some());
        assert!(registry.get_sound("shotgun").is_none());

        let second = registry.poll(|_| TaskStatus::Loaded);
        assert_eq!(second, Some(LevelId::First));
        assert!(registry.get_sound("shotgun").is_some());

        // Completion is reported once only
        assert_eq!(registry.poll(|_| TaskStatus::Loaded), None);
    }

    #[test]
    fn failed_task_does_not_block_siblings() {
        let mut registry = registry_with_two_tasks();

        let done = registry.poll(|task| match task.kind {
            AssetKind::Mesh => TaskStatus::Failed("no such file".to_string()),
            AssetKind::Sound => TaskStatus::Loaded,
        });

        assert_eq!(done, Some(LevelId::First));
        assert!(registry.get_mesh("enemy").is_none());
        assert!(registry.get_sound("shotgun").is_some());
    }

    #[test]
    fn music_is_looped_and_autoplayed() {
        let mut registry = AssetRegistry::new(LevelId::HomeMenu);
        registry.track_sound(
            "music",
            Handle::default(),
            SoundOptions {
                volume: 0.1,
                ..SoundOptions::music()
            },
        );
        registry.track_sound("empty", Handle::default(), SoundOptions::volume(0.4));
        registry.begin_loading();
        registry.poll(|_| TaskStatus::Loaded);

        let autoplay: Vec<_> = registry.autoplay_sounds().collect();
        assert_eq!(autoplay.len(), 1);
        assert!(autoplay[0].options.looped);
        assert_eq!(autoplay[0].options.volume, 0.1);
    }
}
