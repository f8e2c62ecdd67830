mod countdown;
mod engine;
pub mod selection;
mod state;

pub use countdown::{Countdown, CountdownHandle};
pub use engine::ChallengeLifecycle;
pub use selection::{day_of_year, next_index, select_index, ViewOverride};
pub use state::{ChallengeState, ChallengeView, TimerRecord};
