mod breathing;
mod elapsed;
mod session;

pub use breathing::{cycle_ms, BreathPhase, PhaseTimer, MAX_SCALE, MIN_SCALE};
pub use elapsed::{compute, CleanTime, DEFAULT_RATE_PER_DAY, MS_PER_DAY};
pub use session::{format_mm_ss, MeditationSession, SessionState};
