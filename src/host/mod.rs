//! Scheduling: the host loop that turns elapsed time into engine events.
//!
//! The engine never reads a clock. A host owns a `SessionHost`, feeds it
//! elapsed time from whatever loop it runs (a UI frame callback, a timer,
//! a test) and re-reads the `Snapshot` afterwards.

mod heartbeat;
mod session;

pub use heartbeat::Heartbeat;
pub use session::SessionHost;
