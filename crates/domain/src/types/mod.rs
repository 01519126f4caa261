//! Data types exchanged with the backend

pub mod actors;
pub mod companies;
pub mod notifications;
pub mod search;
pub mod tags;
pub mod tasks;

pub use actors::*;
pub use companies::*;
pub use notifications::*;
pub use search::*;
pub use tags::*;
pub use tasks::*;
