mod engine;
mod mode;
mod scheduler;

pub use engine::{SubscriptionId, TimerEngine, TimerStatus, TICK_INTERVAL};
pub use mode::Mode;
pub use scheduler::{ManualScheduler, Scheduler, TickHandle};
