pub mod recording;
pub mod replay_geometry_provider;
