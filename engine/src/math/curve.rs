//! Float Curve Module
//!
//! Keyframed float curves with linear interpolation, used for
//! distance-keyed pitch offsets and the override volume's blend shape.

use serde::{Deserialize, Serialize};

/// A single curve keyframe.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CurveKey {
    pub time: f32,
    pub value: f32,
}

/// Piecewise-linear float curve.
///
/// Keys are kept sorted by time. Sampling outside the keyed range clamps
/// to the first/last value; sampling an empty curve yields 0.0.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FloatCurve {
    keys: Vec<CurveKey>,
}

impl FloatCurve {
    /// Build a curve from `(time, value)` pairs. Keys are sorted by time.
    pub fn new(keys: impl IntoIterator<Item = (f32, f32)>) -> Self {
        let mut keys: Vec<CurveKey> = keys
            .into_iter()
            .map(|(time, value)| CurveKey { time, value })
            .collect();
        keys.sort_by(|a, b| a.time.partial_cmp(&b.time).unwrap_or(std::cmp::Ordering::Equal));
        Self { keys }
    }

    /// A 0 -> 1 ramp over `duration` seconds.
    pub fn linear_ramp(duration: f32) -> Self {
        Self::new([(0.0, 0.0), (duration.max(1e-3), 1.0)])
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Time of the last key (0.0 for an empty curve).
    pub fn duration(&self) -> f32 {
        self.keys.last().map_or(0.0, |k| k.time)
    }

    /// Sample the curve at `time` with linear interpolation.
    pub fn value_at(&self, time: f32) -> f32 {
        let Some(first) = self.keys.first() else {
            return 0.0;
        };
        if time <= first.time {
            return first.value;
        }
        let last = self.keys[self.keys.len() - 1];
        if time >= last.time {
            return last.value;
        }

        // time is strictly inside the keyed range here
        for pair in self.keys.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if time <= b.time {
                let span = b.time - a.time;
                if span <= f32::EPSILON {
                    return b.value;
                }
                let t = (time - a.time) / span;
                return a.value + (b.value - a.value) * t;
            }
        }
        last.value
    }
}
