//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services depend on I/O boundary traits (GuaTransport, Notifier)
//! but are themselves concrete structs, not traits.

mod divination;
mod panel;

pub use divination::DivinationService;
pub use panel::{ResultPanel, Session, TriggerControl, TriggerGuard};
