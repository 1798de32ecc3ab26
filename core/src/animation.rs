use serde::{Deserialize, Serialize};

/// Scale of a block nobody has touched yet.
pub const RESTING_SCALE: f32 = 0.9;

/// Scale a revealed block with mines around it shrinks to.
pub const NUMBERED_SCALE: f32 = 0.25;

/// Scale units per second.
pub const SHRINK_RATE: f32 = 200.0;

/// Shrink animation of a single block, stepped once per rendered frame.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScaleAnimation {
    pub active: bool,
    pub current_scale: f32,
    pub target_scale: f32,
}

impl ScaleAnimation {
    pub fn shrink_to(&mut self, target_scale: f32) {
        self.target_scale = target_scale;
        self.active = true;
    }

    /// Moves the scale toward its target without overshooting, returns whether
    /// the scale changed. Time only runs forward: zero, negative and NaN steps
    /// leave the animation untouched.
    pub fn step(&mut self, delta_secs: f32) -> bool {
        if !self.active || delta_secs.is_nan() || delta_secs <= 0.0 {
            return false;
        }

        let before = self.current_scale;
        self.current_scale = if self.current_scale > self.target_scale {
            (self.current_scale - delta_secs * SHRINK_RATE).max(self.target_scale)
        } else {
            (self.current_scale + delta_secs * SHRINK_RATE).min(self.target_scale)
        };

        if self.current_scale == self.target_scale {
            self.active = false;
        }

        before != self.current_scale
    }
}

impl Default for ScaleAnimation {
    fn default() -> Self {
        Self {
            active: false,
            current_scale: RESTING_SCALE,
            target_scale: RESTING_SCALE,
        }
    }
}
