//! Menu levels - home menu and credits.

mod credits;
mod home;

use bevy::prelude::*;

use crate::level::AssetRegistry;

pub use credits::CreditsPlugin;
pub use home::HomeMenuPlugin;

/// Both menus loop the same track at the default music volume.
fn setup_menu_music(asset_server: Res<AssetServer>, mut assets: ResMut<AssetRegistry>) {
    assets.add_music(&asset_server, "music", "musics/music.ogg", 0.5);
}
