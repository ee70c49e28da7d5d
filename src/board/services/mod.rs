//! Application services for opening and editing boards.

mod session;

pub use session::{BoardSession, BoardSessionError, BoardSessionResult};
