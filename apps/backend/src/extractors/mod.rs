pub mod connection_context;
pub mod current_user;
pub mod session_path;

pub use connection_context::HandshakeClaims;
pub use current_user::CurrentUser;
pub use session_path::SessionPath;
