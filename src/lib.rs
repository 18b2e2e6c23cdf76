pub mod config;
pub mod error;
pub mod message;
pub mod services;
pub mod state;
pub mod view;

pub use config::ClientConfig;
pub use error::{ClientError, Result};
pub use services::backend::{ChatBackend, HttpBackend};
pub use services::controller::{ChatController, PendingReply, SendOutcome};
