//! Animation progress driving for geometry projections.
//!
//! The controller owns the only temporal state in the crate: hosts call
//! [`AnimationController::tick`] once per frame and feed the returned progress
//! into the pure projection functions.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::{ChartError, ChartResult};

/// Chart animation configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Animation {
    /// Static output, progress is always 1.
    Disabled,
    /// Progress runs 0 -> 1 over `duration_ms`.
    Enabled { duration_ms: u32 },
}

impl Animation {
    pub const DEFAULT: Animation = Animation::Enabled { duration_ms: 800 };
    pub const FAST: Animation = Animation::Enabled { duration_ms: 400 };
    pub const SLOW: Animation = Animation::Enabled { duration_ms: 1200 };

    pub fn enabled(duration_ms: u32) -> ChartResult<Self> {
        let animation = Self::Enabled { duration_ms };
        animation.validate()?;
        Ok(animation)
    }

    pub fn validate(self) -> ChartResult<()> {
        match self {
            Self::Enabled { duration_ms: 0 } => Err(ChartError::InvalidConfig(
                "animation duration must be > 0".to_owned(),
            )),
            _ => Ok(()),
        }
    }

    #[must_use]
    pub fn is_enabled(self) -> bool {
        matches!(self, Self::Enabled { .. })
    }

    /// Progress before the first tick.
    #[must_use]
    pub fn initial_progress(self) -> f64 {
        match self {
            Self::Disabled => 1.0,
            Self::Enabled { .. } => 0.0,
        }
    }

    #[must_use]
    pub fn duration(self) -> Duration {
        match self {
            Self::Disabled => Duration::ZERO,
            Self::Enabled { duration_ms } => Duration::from_millis(u64::from(duration_ms)),
        }
    }
}

impl Default for Animation {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Time-monotonic easing curve mapping `t ∈ [0,1]` to progress `∈ [0,1]`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum Easing {
    Linear,
    /// Material standard curve, cubic-bezier(0.4, 0.0, 0.2, 1.0).
    #[default]
    FastOutSlowIn,
    EaseInOutCubic,
    CubicBezier { x1: f64, y1: f64, x2: f64, y2: f64 },
}

impl Easing {
    /// Control points must keep `x1, x2 ∈ [0,1]` so the curve stays a function of time.
    pub fn cubic_bezier(x1: f64, y1: f64, x2: f64, y2: f64) -> ChartResult<Self> {
        if ![x1, y1, x2, y2].iter().all(|v| v.is_finite())
            || !(0.0..=1.0).contains(&x1)
            || !(0.0..=1.0).contains(&x2)
        {
            return Err(ChartError::InvalidConfig(
                "cubic bezier x control points must be in [0, 1]".to_owned(),
            ));
        }
        Ok(Self::CubicBezier { x1, y1, x2, y2 })
    }

    #[must_use]
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::FastOutSlowIn => solve_cubic_bezier(0.4, 0.0, 0.2, 1.0, t),
            Self::EaseInOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let u = -2.0 * t + 2.0;
                    1.0 - u * u * u / 2.0
                }
            }
            Self::CubicBezier { x1, y1, x2, y2 } => solve_cubic_bezier(x1, y1, x2, y2, t),
        }
    }
}

fn bezier_coordinate(p1: f64, p2: f64, s: f64) -> f64 {
    let inv = 1.0 - s;
    3.0 * inv * inv * s * p1 + 3.0 * inv * s * s * p2 + s * s * s
}

fn bezier_slope(p1: f64, p2: f64, s: f64) -> f64 {
    let inv = 1.0 - s;
    3.0 * inv * inv * p1 + 6.0 * inv * s * (p2 - p1) + 3.0 * s * s * (1.0 - p2)
}

/// Evaluates y at time `x` for a bezier anchored at (0,0) and (1,1).
fn solve_cubic_bezier(x1: f64, y1: f64, x2: f64, y2: f64, x: f64) -> f64 {
    if x <= 0.0 {
        return 0.0;
    }
    if x >= 1.0 {
        return 1.0;
    }

    // Newton first, bisection when the slope flattens out.
    let mut s = x;
    for _ in 0..8 {
        let error = bezier_coordinate(x1, x2, s) - x;
        if error.abs() < 1e-7 {
            return bezier_coordinate(y1, y2, s);
        }
        let slope = bezier_slope(x1, x2, s);
        if slope.abs() < 1e-6 {
            break;
        }
        s -= error / slope;
    }

    let (mut low, mut high) = (0.0, 1.0);
    s = x;
    for _ in 0..32 {
        let value = bezier_coordinate(x1, x2, s);
        if (value - x).abs() < 1e-7 {
            break;
        }
        if value < x {
            low = s;
        } else {
            high = s;
        }
        s = (low + high) / 2.0;
    }
    bezier_coordinate(y1, y2, s)
}

/// Per-chart animation clock.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationController {
    animation: Animation,
    easing: Easing,
    elapsed: Duration,
    progress: f64,
}

impl AnimationController {
    #[must_use]
    pub fn new(animation: Animation) -> Self {
        Self {
            animation,
            easing: Easing::default(),
            elapsed: Duration::ZERO,
            progress: animation.initial_progress(),
        }
    }

    #[must_use]
    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self.progress = self.eased_progress();
        self
    }

    #[must_use]
    pub fn animation(&self) -> Animation {
        self.animation
    }

    #[must_use]
    pub fn easing(&self) -> Easing {
        self.easing
    }

    #[must_use]
    pub fn progress(&self) -> f64 {
        self.progress
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.progress >= 1.0
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.animation.is_enabled() && !self.is_finished()
    }

    fn eased_progress(&self) -> f64 {
        match self.animation {
            Animation::Disabled => 1.0,
            Animation::Enabled { .. } => {
                let total = self.animation.duration().as_secs_f64();
                let t = if total > 0.0 {
                    self.elapsed.as_secs_f64() / total
                } else {
                    1.0
                };
                self.easing.apply(t)
            }
        }
    }

    /// Advances the clock by `delta` and returns the eased progress.
    pub fn tick(&mut self, delta: Duration) -> f64 {
        if self.animation.is_enabled() && !self.is_finished() {
            self.elapsed = (self.elapsed + delta).min(self.animation.duration());
            self.progress = self.eased_progress();
            if self.is_finished() {
                trace!(elapsed_ms = self.elapsed.as_millis() as u64, "animation finished");
            }
        }
        self.progress
    }

    /// Restarts from the configured initial progress.
    pub fn reset(&mut self) {
        self.elapsed = Duration::ZERO;
        self.progress = self.animation.initial_progress();
    }

    /// Swaps the configuration; a changed configuration restarts the animation.
    pub fn set_animation(&mut self, animation: Animation) {
        if self.animation != animation {
            self.animation = animation;
            self.reset();
        }
    }
}

impl Default for AnimationController {
    fn default() -> Self {
        Self::new(Animation::default())
    }
}
