//! Clock port - source of "now".

use crate::domain::foundation::Timestamp;

/// Supplies the current time to handlers and the session runtime.
pub trait Clock: Send + Sync {
    fn now(&self) -> Timestamp;
}
