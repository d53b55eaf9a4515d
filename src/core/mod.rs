pub mod clock;
pub mod decision;
pub mod engine;
pub mod executor;
pub mod window;

pub use clock::{Clock, FixedClock, SystemClock};
pub use decision::{Decision, ScreenEvent, Skip, decide, decide_break};
pub use engine::Engine;
pub use executor::{ActionExecutor, Outcome};
pub use window::{Schedule, TimeWindow};
