pub mod hub;
pub mod protocol;
pub mod session;

pub use hub::{ConnectionRegistry, ConnectionSink, OutboundFrame};
pub use session::upgrade;
