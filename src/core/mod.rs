pub mod clock;
pub mod config;
pub mod error;
pub mod signal;

pub use clock::TickClock;
pub use config::SimulationConfig;
pub use error::{Result, SimError};
pub use signal::{ListenerId, Signal};
