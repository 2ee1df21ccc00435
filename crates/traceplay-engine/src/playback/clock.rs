//! Variable-speed, seekable virtual clock over a session's event timeline.
//!
//! The clock is driven cooperatively by the host's per-frame callback: the
//! host calls [`PlaybackClock::frame`] with a monotonic wall-clock reading
//! each frame while playback is active. All mutable state lives on the clock
//! instance and is read fresh on every tick, so speed or seek changes made
//! between frames take effect on the very next frame. A tick received while
//! stopped is a no-op, which makes stale callbacks scheduled before a pause
//! or teardown harmless.

use serde::{Deserialize, Serialize};
use traceplay_types::RawEvent;

/// Speed multiplier applied to wall-clock deltas while playing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "u64", try_from = "u64")]
pub enum PlaybackSpeed {
    #[default]
    X1,
    X2,
    X4,
}

impl PlaybackSpeed {
    pub fn multiplier(self) -> u64 {
        match self {
            PlaybackSpeed::X1 => 1,
            PlaybackSpeed::X2 => 2,
            PlaybackSpeed::X4 => 4,
        }
    }
}

impl From<PlaybackSpeed> for u64 {
    fn from(speed: PlaybackSpeed) -> Self {
        speed.multiplier()
    }
}

impl TryFrom<u64> for PlaybackSpeed {
    type Error = String;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(PlaybackSpeed::X1),
            2 => Ok(PlaybackSpeed::X2),
            4 => Ok(PlaybackSpeed::X4),
            other => Err(format!("unsupported playback speed: {}", other)),
        }
    }
}

/// Point-in-time snapshot of the clock, for reactive presentation layers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplayState {
    pub is_playing: bool,
    pub current_ms: u64,
    pub total_ms: u64,
    pub speed: PlaybackSpeed,
    /// Index into the timestamp-sorted timeline; `None` before any event.
    pub current_event_index: Option<usize>,
    /// Percent complete, 0-100.
    pub progress: f64,
}

/// Replay clock over a closed event log.
///
/// Virtual time is elapsed milliseconds since the first event's timestamp,
/// decoupled from wall-clock time except for the rate at which it advances.
/// Invariant: `current_ms <= total_ms`, enforced by clamping on every
/// mutation.
#[derive(Debug)]
pub struct PlaybackClock {
    /// Event timestamps sorted ascending; the raw log order may differ.
    timeline: Vec<i64>,
    /// First event timestamp; virtual time zero.
    session_start: i64,
    total_ms: u64,
    current_ms: u64,
    speed: PlaybackSpeed,
    playing: bool,
    /// Wall-clock reading of the previous frame, cleared on every stop or
    /// seek so the next frame never applies a stale delta.
    last_frame_ms: Option<u64>,
}

impl PlaybackClock {
    pub fn new(events: &[RawEvent], total_ms: u64) -> Self {
        let mut timeline: Vec<i64> = events.iter().map(|e| e.timestamp).collect();
        timeline.sort_unstable();
        let session_start = timeline.first().copied().unwrap_or(0);

        Self {
            timeline,
            session_start,
            total_ms,
            current_ms: 0,
            speed: PlaybackSpeed::default(),
            playing: false,
            last_frame_ms: None,
        }
    }

    /// Start (or resume) playback. At the end of the timeline this replays
    /// from the start.
    pub fn play(&mut self) {
        if self.current_ms >= self.total_ms {
            self.current_ms = 0;
        }
        self.playing = true;
        self.last_frame_ms = None;
    }

    pub fn pause(&mut self) {
        self.playing = false;
        self.last_frame_ms = None;
    }

    /// Move virtual time to `offset_ms`, clamped to `[0, total]`. Does not
    /// change the play/pause state.
    pub fn seek(&mut self, offset_ms: i64) {
        self.current_ms = offset_ms.clamp(0, self.total_ms as i64) as u64;
        // Re-anchor so a playing clock does not jump on the next frame.
        self.last_frame_ms = None;
    }

    /// Seek to the event at `index` in the sorted timeline; out-of-range
    /// indices are a no-op.
    pub fn seek_to_event(&mut self, index: usize) {
        if let Some(&timestamp) = self.timeline.get(index) {
            self.seek(timestamp - self.session_start);
        }
    }

    /// Change the speed multiplier. Takes effect on the next frame; never
    /// changes the play/pause state.
    pub fn set_speed(&mut self, speed: PlaybackSpeed) {
        self.speed = speed;
    }

    pub fn jump_to_start(&mut self) {
        self.seek(0);
    }

    /// Force time to the end and stop playback.
    pub fn jump_to_end(&mut self) {
        self.playing = false;
        self.last_frame_ms = None;
        self.current_ms = self.total_ms;
    }

    /// Advance the clock by one frame. `now_ms` is any monotonic wall-clock
    /// reading in milliseconds.
    ///
    /// The first frame after a (re)start applies a zero delta, so playback
    /// never opens with a large jump. Reaching the end stops the clock.
    pub fn frame(&mut self, now_ms: u64) {
        if !self.playing {
            return;
        }

        let delta = match self.last_frame_ms {
            Some(previous) => now_ms.saturating_sub(previous),
            None => 0,
        };

        self.current_ms = self
            .current_ms
            .saturating_add(delta * self.speed.multiplier())
            .min(self.total_ms);

        if self.current_ms >= self.total_ms {
            self.playing = false;
            self.last_frame_ms = None;
        } else {
            self.last_frame_ms = Some(now_ms);
        }
    }

    /// Index of the last event whose timestamp is at or before the current
    /// virtual time, or `None` if no event qualifies. O(log n).
    pub fn current_event_index(&self) -> Option<usize> {
        self.index_at(self.current_ms)
    }

    /// [`Self::current_event_index`] for an arbitrary offset.
    pub fn index_at(&self, offset_ms: u64) -> Option<usize> {
        let cutoff = self.session_start + offset_ms as i64;
        let idx = self.timeline.partition_point(|&ts| ts <= cutoff);
        idx.checked_sub(1)
    }

    /// Percent complete, 0-100. Zero-length sessions read as 0.
    pub fn progress(&self) -> f64 {
        if self.total_ms == 0 {
            0.0
        } else {
            self.current_ms as f64 / self.total_ms as f64 * 100.0
        }
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn current_ms(&self) -> u64 {
        self.current_ms
    }

    pub fn total_ms(&self) -> u64 {
        self.total_ms
    }

    pub fn speed(&self) -> PlaybackSpeed {
        self.speed
    }

    pub fn snapshot(&self) -> ReplayState {
        ReplayState {
            is_playing: self.playing,
            current_ms: self.current_ms,
            total_ms: self.total_ms,
            speed: self.speed,
            current_event_index: self.current_event_index(),
            progress: self.progress(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn clock_with_timestamps(timestamps: &[i64], total_ms: u64) -> PlaybackClock {
        let events: Vec<RawEvent> = timestamps
            .iter()
            .enumerate()
            .map(|(i, &ts)| RawEvent::new(format!("e{}", i), "user", ts, Value::Null))
            .collect();
        PlaybackClock::new(&events, total_ms)
    }

    #[test]
    fn test_seek_clamps_to_bounds() {
        let mut clock = clock_with_timestamps(&[1000, 2000], 10_000);

        clock.seek(15_000);
        assert_eq!(clock.current_ms(), 10_000);

        clock.seek(-500);
        assert_eq!(clock.current_ms(), 0);
    }

    #[test]
    fn test_frame_advances_at_speed() {
        let mut clock = clock_with_timestamps(&[1000], 10_000);
        clock.play();

        clock.frame(100); // anchor frame, zero delta
        assert_eq!(clock.current_ms(), 0);

        clock.frame(350);
        assert_eq!(clock.current_ms(), 250);
        assert!(clock.is_playing());
    }

    #[test]
    fn test_speed_change_applies_on_next_frame() {
        let mut clock = clock_with_timestamps(&[1000], 10_000);
        clock.play();
        clock.frame(0);
        clock.frame(100);
        assert_eq!(clock.current_ms(), 100);

        clock.set_speed(PlaybackSpeed::X4);
        clock.frame(200);
        // 100ms of wall clock at 4x, no discontinuous jump.
        assert_eq!(clock.current_ms(), 500);
    }

    #[test]
    fn test_natural_end_stops_playback() {
        let mut clock = clock_with_timestamps(&[1000], 1_000);
        clock.play();
        clock.frame(0);
        clock.frame(5_000);

        assert_eq!(clock.current_ms(), 1_000);
        assert!(!clock.is_playing());
    }

    #[test]
    fn test_play_at_end_restarts_from_zero() {
        let mut clock = clock_with_timestamps(&[1000], 1_000);
        clock.jump_to_end();
        assert_eq!(clock.current_ms(), 1_000);

        clock.play();
        assert_eq!(clock.current_ms(), 0);
        assert!(clock.is_playing());
    }

    #[test]
    fn test_seek_while_playing_reanchors_delta() {
        let mut clock = clock_with_timestamps(&[1000], 60_000);
        clock.play();
        clock.frame(0);
        clock.frame(100);
        assert_eq!(clock.current_ms(), 100);

        clock.seek(30_000);
        // Anchor was cleared: wall clock moved 10s but the first frame
        // after the seek applies a zero delta.
        clock.frame(10_100);
        assert_eq!(clock.current_ms(), 30_000);

        clock.frame(10_200);
        assert_eq!(clock.current_ms(), 30_100);
    }

    #[test]
    fn test_frame_while_stopped_is_noop() {
        let mut clock = clock_with_timestamps(&[1000], 10_000);
        clock.frame(5_000);
        assert_eq!(clock.current_ms(), 0);

        clock.play();
        clock.frame(6_000);
        clock.pause();
        // Stale callback after pause must not resurrect the loop.
        clock.frame(9_000);
        assert_eq!(clock.current_ms(), 0);
    }

    #[test]
    fn test_event_index_lookup() {
        // Unsorted input; the clock sorts its own copy.
        let clock = clock_with_timestamps(&[3000, 1000, 2000], 5_000);

        assert_eq!(clock.index_at(0), Some(0));
        assert_eq!(clock.index_at(999), Some(0));
        assert_eq!(clock.index_at(1000), Some(1));
        assert_eq!(clock.index_at(2000), Some(2));
        assert_eq!(clock.index_at(4999), Some(2));
    }

    #[test]
    fn test_event_index_empty_timeline() {
        let clock = clock_with_timestamps(&[], 1_000);
        assert_eq!(clock.current_event_index(), None);
    }

    #[test]
    fn test_seek_to_event() {
        let mut clock = clock_with_timestamps(&[1000, 3500, 4000], 10_000);

        clock.seek_to_event(1);
        assert_eq!(clock.current_ms(), 2_500);
        assert_eq!(clock.current_event_index(), Some(1));

        // Out of range is a no-op.
        clock.seek_to_event(99);
        assert_eq!(clock.current_ms(), 2_500);
    }

    #[test]
    fn test_progress_and_snapshot() {
        let mut clock = clock_with_timestamps(&[1000], 4_000);
        clock.seek(1_000);
        assert_eq!(clock.progress(), 25.0);

        let state = clock.snapshot();
        assert!(!state.is_playing);
        assert_eq!(state.current_ms, 1_000);
        assert_eq!(state.total_ms, 4_000);
        assert_eq!(state.speed, PlaybackSpeed::X1);
        assert_eq!(state.current_event_index, Some(0));

        let empty = clock_with_timestamps(&[], 0);
        assert_eq!(empty.progress(), 0.0);
    }

    #[test]
    fn test_speed_serializes_as_multiplier() {
        let json = serde_json::to_string(&PlaybackSpeed::X4).unwrap();
        assert_eq!(json, "4");
        let speed: PlaybackSpeed = serde_json::from_str("2").unwrap();
        assert_eq!(speed, PlaybackSpeed::X2);
        assert!(serde_json::from_str::<PlaybackSpeed>("3").is_err());
    }
}
