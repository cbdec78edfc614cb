//! Frame counter gating how often the line set is rebuilt

/// Counts frames and fires every `interval`-th one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineCadence {
    interval: u32,
    frame: u64,
}

impl LineCadence {
    /// `interval` is clamped to at least 1 (rebuild every frame)
    pub fn new(interval: u32) -> Self {
        Self {
            interval: interval.max(1),
            frame: 0,
        }
    }

    pub fn every_frame() -> Self {
        Self::new(1)
    }

    pub fn interval(&self) -> u32 {
        self.interval
    }

    /// Number of frames ticked so far
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Count one frame; true when the line set should be rebuilt on it
    pub fn tick(&mut self) -> bool {
        self.frame += 1;
        self.frame % self.interval as u64 == 0
    }
}

impl Default for LineCadence {
    fn default() -> Self {
        Self::every_frame()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_frame_always_fires() {
        let mut cadence = LineCadence::every_frame();
        assert!((0..10).all(|_| cadence.tick()));
        assert_eq!(cadence.frame(), 10);
    }

    #[test]
    fn interval_fires_on_multiples() {
        let mut cadence = LineCadence::new(3);
        let fired: Vec<bool> = (0..7).map(|_| cadence.tick()).collect();
        assert_eq!(fired, vec![false, false, true, false, false, true, false]);
    }

    #[test]
    fn zero_interval_is_clamped() {
        let mut cadence = LineCadence::new(0);
        assert_eq!(cadence.interval(), 1);
        assert!(cadence.tick());
    }
}
