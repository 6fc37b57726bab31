//! Control tools for moodgarden - TCP server for remote inspection and control
//!
//! Start the server inside a tokio runtime and serve commands from your loop:
//! ```ignore
//! let (_server, mut commands) = DebugServer::start(DEFAULT_PORT).await?;
//! while let Some(envelope) = commands.recv().await {
//!     let response = garden_handle(&envelope.command);
//!     envelope.respond(response);
//! }
//! ```

pub mod protocol;
pub mod server;

pub use protocol::*;
pub use server::{CommandEnvelope, DebugServer, ServerError};

/// Default control server port
pub const DEFAULT_PORT: u16 = 9843;
