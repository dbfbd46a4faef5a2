pub mod error;
pub mod graph;
pub mod id;
pub mod user;

// Re-export commonly used types
pub use error::CoreError;
pub use graph::UserGraph;
pub use id::UserId;
pub use user::User;
