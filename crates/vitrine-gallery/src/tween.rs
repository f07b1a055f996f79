use crate::camera::Camera;
use crate::easing::CubicBezier;

/// What happens when a tween finishes.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum TweenCompletion {
    /// Plain camera move (entering `center`).
    None,
    /// Reveal the detail overlay mid-flight, then enter `cover`.
    OpenCover,
    /// Clear selection, overlay and pending detail.
    ZoomOutComplete,
}

/// A time-bounded camera interpolation. At most one is live; a new one replaces it.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraTween {
    pub from: Camera,
    pub to: Camera,
    pub start_ms: f64,
    pub duration_ms: f64,
    pub completion: TweenCompletion,
    /// Progress at which [`TweenSample::crossed_threshold`] fires.
    pub threshold: Option<f32>,
    threshold_fired: bool,
    last_t: f32,
}

/// Result of sampling a tween at one instant.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TweenSample {
    /// Linear progress in `[0, 1]`, non-decreasing across samples.
    pub t: f32,
    pub camera: Camera,
    /// True on exactly one sample: the first with `t >= threshold`.
    pub crossed_threshold: bool,
    pub finished: bool,
}

impl CameraTween {
    pub fn new(
        from: Camera,
        to: Camera,
        start_ms: f64,
        duration_ms: f64,
        completion: TweenCompletion,
    ) -> Self {
        Self {
            from,
            to,
            start_ms,
            duration_ms,
            completion,
            threshold: None,
            threshold_fired: false,
            last_t: 0.0,
        }
    }

    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = Some(threshold);
        self
    }

    pub fn is_zoom_out(&self) -> bool {
        self.completion == TweenCompletion::ZoomOutComplete
    }

    /// Linear progress for `now_ms`, clamped and never behind the previous sample.
    pub fn progress(&self, now_ms: f64) -> f32 {
        let raw = if self.duration_ms > 0.0 {
            ((now_ms - self.start_ms) / self.duration_ms).clamp(0.0, 1.0) as f32
        } else {
            1.0
        };
        if raw.is_nan() { self.last_t } else { raw.max(self.last_t) }
    }

    pub fn sample(&mut self, now_ms: f64, easing: &CubicBezier) -> TweenSample {
        let t = self.progress(now_ms);
        self.last_t = t;

        let camera = if t >= 1.0 { self.to } else { self.from.lerp(self.to, easing.sample(t)) };

        let crossed_threshold = match self.threshold {
            Some(th) if !self.threshold_fired && t >= th => {
                self.threshold_fired = true;
                true
            }
            _ => false,
        };

        TweenSample { t, camera, crossed_threshold, finished: t >= 1.0 }
    }
}
