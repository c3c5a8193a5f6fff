//! FrameCache - recorded frames and the looping replay
//!
//! While caching, every live frame appends the list of visible particles.
//! Replay walks the recorded frames from the start and wraps around. Entering
//! replay stops recording; leaving it resumes recording without clearing.

use serde::Serialize;

/// One drawable particle of a frame
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct VisiblePixel {
    pub col: u32,
    pub row: u32,
    /// Packed `0xRRGGBB`
    pub color: u32,
}

/// Result of a replay toggle
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReplayToggle {
    Started,
    Stopped,
    /// Nothing recorded yet, state unchanged
    Empty,
}

#[derive(Clone, Debug)]
pub struct FrameCache {
    frames: Vec<Vec<VisiblePixel>>,
    caching: bool,
    replaying: bool,
    replay_cursor: usize,
}

impl Default for FrameCache {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameCache {
    pub fn new() -> Self {
        Self {
            frames: Vec::new(),
            caching: true,
            replaying: false,
            replay_cursor: 0,
        }
    }

    /// Append a live frame. Ignored while recording is off.
    pub fn record(&mut self, frame: Vec<VisiblePixel>) -> bool {
        if !self.caching {
            return false;
        }
        self.frames.push(frame);
        true
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    #[inline]
    pub fn is_caching(&self) -> bool {
        self.caching
    }

    #[inline]
    pub fn is_replaying(&self) -> bool {
        self.replaying
    }

    pub fn frame(&self, idx: usize) -> Option<&[VisiblePixel]> {
        self.frames.get(idx).map(Vec::as_slice)
    }

    pub fn toggle_replay(&mut self) -> ReplayToggle {
        if self.frames.is_empty() {
            sand_log!("no cached frames to replay");
            return ReplayToggle::Empty;
        }

        if self.replaying {
            self.replaying = false;
            self.caching = true;
            sand_log!("replay stopped after {} cached frames", self.frames.len());
            ReplayToggle::Stopped
        } else {
            self.replaying = true;
            self.caching = false;
            self.replay_cursor = 0;
            sand_log!("replaying {} cached frames", self.frames.len());
            ReplayToggle::Started
        }
    }

    /// Index of the frame to draw on this replay step; advances the cursor
    /// and wraps to 0 after the last frame.
    pub fn advance_replay(&mut self) -> Option<usize> {
        if !self.replaying || self.frames.is_empty() {
            return None;
        }
        let idx = self.replay_cursor % self.frames.len();
        self.replay_cursor = (idx + 1) % self.frames.len();
        Some(idx)
    }

    pub fn next_replay_frame(&mut self) -> Option<&[VisiblePixel]> {
        let idx = self.advance_replay()?;
        self.frame(idx)
    }

    /// Drop every frame and return to live recording
    pub fn clear(&mut self) {
        self.frames.clear();
        self.caching = true;
        self.replaying = false;
        self.replay_cursor = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tagged(tag: u32) -> Vec<VisiblePixel> {
        vec![VisiblePixel { col: tag, row: 0, color: 0 }]
    }

    #[test]
    fn replay_wraps_cleanly() {
        let mut cache = FrameCache::new();
        for i in 0..5 {
            assert!(cache.record(tagged(i)));
        }
        assert_eq!(cache.toggle_replay(), ReplayToggle::Started);

        let seen: Vec<u32> = (0..7)
            .map(|_| cache.next_replay_frame().map(|f| f[0].col).unwrap())
            .collect();
        assert_eq!(seen, vec![0, 1, 2, 3, 4, 0, 1]);
    }

    #[test]
    fn empty_cache_toggle_is_noop() {
        let mut cache = FrameCache::new();
        assert_eq!(cache.toggle_replay(), ReplayToggle::Empty);
        assert!(!cache.is_replaying());
        assert!(cache.is_caching());
        assert!(cache.next_replay_frame().is_none());
    }

    #[test]
    fn replay_pauses_recording() {
        let mut cache = FrameCache::new();
        cache.record(tagged(0));
        cache.toggle_replay();
        assert!(!cache.record(tagged(1)));
        assert_eq!(cache.len(), 1);

        assert_eq!(cache.toggle_replay(), ReplayToggle::Stopped);
        assert!(cache.record(tagged(2)));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn restart_begins_at_first_frame() {
        let mut cache = FrameCache::new();
        for i in 0..3 {
            cache.record(tagged(i));
        }
        cache.toggle_replay();
        cache.next_replay_frame();
        cache.next_replay_frame();
        cache.toggle_replay();
        cache.toggle_replay();
        assert_eq!(cache.next_replay_frame().map(|f| f[0].col), Some(0));
    }

    #[test]
    fn clear_resets_state() {
        let mut cache = FrameCache::new();
        cache.record(tagged(0));
        cache.toggle_replay();
        cache.clear();
        assert!(cache.is_empty());
        assert!(cache.is_caching());
        assert!(!cache.is_replaying());
    }
}
