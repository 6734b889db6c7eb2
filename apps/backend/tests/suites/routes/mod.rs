pub mod error_shape;
pub mod leaderboard;
pub mod sessions;
