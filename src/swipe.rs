//! Horizontal swipe recognition for the vocabulary card.
//!
//! A drag becomes a swipe once it passes `TRACK_THRESHOLD`; it shows a direction
//! once it passes `DIRECTION_DEAD_ZONE`; it commits on release when the
//! displacement reaches `COMMIT_RATIO` of the container width.

pub const TRACK_THRESHOLD: f64 = 5.0;
pub const DIRECTION_DEAD_ZONE: f64 = 10.0;
pub const COMMIT_RATIO: f64 = 0.15;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeDirection {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SwipeOutcome {
    Commit(SwipeDirection),
    SpringBack,
}

/// Visual feedback while a drag is in progress.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SwipeFeedback {
    pub direction: Option<SwipeDirection>,
    /// 0.0..=1.0, reaches 1.0 at the commit threshold.
    pub progress: f64,
}

pub fn commit_threshold(width: f64) -> f64 {
    width * COMMIT_RATIO
}

pub fn progress(dx: f64, width: f64) -> f64 {
    let threshold = commit_threshold(width);
    if threshold <= 0.0 {
        return 1.0;
    }
    (dx.abs() / threshold).min(1.0)
}

pub fn classify_release(dx: f64, width: f64) -> SwipeOutcome {
    let threshold = commit_threshold(width);
    if dx >= threshold {
        SwipeOutcome::Commit(SwipeDirection::Right)
    } else if dx <= -threshold {
        SwipeOutcome::Commit(SwipeDirection::Left)
    } else {
        SwipeOutcome::SpringBack
    }
}

/// Tracks one drag from press to release.
#[derive(Debug, Clone, Default)]
pub struct SwipeTracker {
    origin: Option<f64>,
    tracking: bool,
    feedback: SwipeFeedback,
}

impl SwipeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn feedback(&self) -> SwipeFeedback {
        self.feedback
    }

    pub fn is_dragging(&self) -> bool {
        self.origin.is_some()
    }

    pub fn press(&mut self, x: f64) {
        self.origin = Some(x);
        self.tracking = false;
        self.feedback = SwipeFeedback::default();
    }

    pub fn drag(&mut self, x: f64, width: f64) -> SwipeFeedback {
        let Some(origin) = self.origin else {
            return self.feedback;
        };
        let dx = x - origin;
        if !self.tracking && dx.abs() > TRACK_THRESHOLD {
            self.tracking = true;
        }
        if self.tracking {
            if dx > DIRECTION_DEAD_ZONE {
                self.feedback.direction = Some(SwipeDirection::Right);
                self.feedback.progress = progress(dx, width);
            } else if dx < -DIRECTION_DEAD_ZONE {
                self.feedback.direction = Some(SwipeDirection::Left);
                self.feedback.progress = progress(dx, width);
            }
        }
        self.feedback
    }

    /// Ends the drag. A drag that never passed the tracking threshold springs back.
    pub fn release(&mut self, x: f64, width: f64) -> SwipeOutcome {
        let origin = self.origin.take();
        let tracking = std::mem::take(&mut self.tracking);
        let outcome = match origin {
            Some(origin) if tracking => classify_release(x - origin, width),
            _ => SwipeOutcome::SpringBack,
        };
        self.feedback = match outcome {
            SwipeOutcome::Commit(direction) => SwipeFeedback {
                direction: Some(direction),
                progress: 1.0,
            },
            SwipeOutcome::SpringBack => SwipeFeedback::default(),
        };
        outcome
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_threshold_commits() {
        assert_eq!(
            classify_release(150.0, 1000.0),
            SwipeOutcome::Commit(SwipeDirection::Right)
        );
        assert_eq!(
            classify_release(-150.0, 1000.0),
            SwipeOutcome::Commit(SwipeDirection::Left)
        );
    }

    #[test]
    fn test_just_below_threshold_springs_back() {
        assert_eq!(classify_release(149.0, 1000.0), SwipeOutcome::SpringBack);
        assert_eq!(classify_release(-149.0, 1000.0), SwipeOutcome::SpringBack);
        assert_eq!(classify_release(0.0, 1000.0), SwipeOutcome::SpringBack);
    }

    #[test]
    fn test_progress_is_capped() {
        assert_eq!(progress(75.0, 1000.0), 0.5);
        assert_eq!(progress(-300.0, 1000.0), 1.0);
        assert_eq!(progress(10.0, 0.0), 1.0);
    }

    #[test]
    fn test_tracker_direction_and_dead_zone() {
        let mut tracker = SwipeTracker::new();
        tracker.press(100.0);

        let feedback = tracker.drag(104.0, 1000.0);
        assert_eq!(feedback.direction, None);

        let feedback = tracker.drag(108.0, 1000.0);
        assert_eq!(feedback.direction, None);

        let feedback = tracker.drag(130.0, 1000.0);
        assert_eq!(feedback.direction, Some(SwipeDirection::Right));
        assert!((feedback.progress - 0.2).abs() < 1e-9);

        // back inside the dead zone keeps the last direction
        let feedback = tracker.drag(105.0, 1000.0);
        assert_eq!(feedback.direction, Some(SwipeDirection::Right));

        let feedback = tracker.drag(50.0, 1000.0);
        assert_eq!(feedback.direction, Some(SwipeDirection::Left));
    }

    #[test]
    fn test_tracker_release_commit_and_spring_back() {
        let mut tracker = SwipeTracker::new();
        tracker.press(0.0);
        tracker.drag(20.0, 100.0);
        assert_eq!(
            tracker.release(20.0, 100.0),
            SwipeOutcome::Commit(SwipeDirection::Right)
        );
        assert!(!tracker.is_dragging());
        assert_eq!(tracker.feedback().progress, 1.0);

        tracker.press(50.0);
        tracker.drag(40.0, 100.0);
        assert_eq!(tracker.release(40.0, 100.0), SwipeOutcome::SpringBack);
        assert_eq!(tracker.feedback(), SwipeFeedback::default());
    }

    #[test]
    fn test_release_without_press_springs_back() {
        let mut tracker = SwipeTracker::new();
        assert_eq!(tracker.release(500.0, 100.0), SwipeOutcome::SpringBack);
    }

    #[test]
    fn test_tiny_drag_is_not_tracked() {
        let mut tracker = SwipeTracker::new();
        tracker.press(0.0);
        tracker.drag(4.0, 20.0);
        // 4.0 would be past 15% of 20.0 but the drag never started tracking
        assert_eq!(tracker.release(4.0, 20.0), SwipeOutcome::SpringBack);
    }
}
