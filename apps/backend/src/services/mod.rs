pub mod eviction;
pub mod game_flow;
pub mod sessions;
