mod clock;

pub use clock::{PlaybackClock, PlaybackSpeed, ReplayState};
