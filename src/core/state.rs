use bevy::prelude::States;

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, States)]
pub(crate) enum SceneState {
    // Textures for the globe load here before anything renders
    #[default]
    AssetLoading,
    Globe,
    City,
}
