pub mod event;
pub mod session;

pub use event::{Event, EventLog, EventType};
pub use session::{Session, SessionStatus};
