// Axis scale policy - expand-on-demand, hysteretic shrink of the Y upper bound

/// Headroom added above the plotted maximum.
const HEADROOM: f64 = 1.0;
/// The upper bound never drops below this.
pub const MIN_Y_MAX: f64 = 1.0;

#[derive(Debug, Clone)]
pub struct AxisScalePolicy {
    initial_max: f64,
    shrink_margin: f64,
    current_max: f64,
}

impl AxisScalePolicy {
    pub fn new(initial_max: f64, shrink_margin: f64) -> Self {
        let initial_max = initial_max.max(MIN_Y_MAX);
        Self {
            initial_max,
            shrink_margin,
            current_max: initial_max,
        }
    }

    pub fn current_max(&self) -> f64 {
        self.current_max
    }

    /// Expand immediately when `value` reaches the current bound.
    /// Returns true if the bound changed.
    pub fn on_sample(&mut self, value: f64) -> bool {
        if value >= self.current_max {
            self.current_max = value + HEADROOM;
            return true;
        }
        false
    }

    /// Shrink to the recent ceiling when it sits more than the margin below
    /// the current bound. Returns true if the bound changed.
    pub fn on_tick(&mut self, recent_max: Option<f64>) -> bool {
        let Some(recent_max) = recent_max else {
            return false;
        };

        let suggested = recent_max + HEADROOM;
        if suggested < self.current_max - self.shrink_margin {
            let shrunk = suggested.max(MIN_Y_MAX);
            if shrunk < self.current_max {
                self.current_max = shrunk;
                return true;
            }
        }
        false
    }

    pub fn reset(&mut self) {
        self.current_max = self.initial_max;
    }
}
