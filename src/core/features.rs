//! Window summary features.
//!
//! A window is summarized by the Euclidean norm of its per-axis means and of
//! its per-axis maxima. Only the accelerometer pair enters the feature vector.

use crate::ingest::types::Axis3;
use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;

/// Names of the feature vector columns, in order.
pub const FEATURE_NAMES: [&str; FEATURE_DIMENSION] = ["accelerometer", "accelerometer_max"];

/// Number of features per record.
pub const FEATURE_DIMENSION: usize = 2;

/// Per-axis accumulation buffer for one sensor.
#[derive(Debug, Clone, Default)]
pub struct AxisBuffer {
    x: Vec<f64>,
    y: Vec<f64>,
    z: Vec<f64>,
}

impl AxisBuffer {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            x: Vec::with_capacity(capacity),
            y: Vec::with_capacity(capacity),
            z: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, reading: Axis3) {
        self.x.push(reading.x);
        self.y.push(reading.y);
        self.z.push(reading.z);
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn clear(&mut self) {
        self.x.clear();
        self.y.clear();
        self.z.clear();
    }

    /// `sqrt(mean(x)^2 + mean(y)^2 + mean(z)^2)`; NaN when empty.
    pub fn magnitude_of_means(&self) -> f64 {
        Axis3::new(
            Statistics::mean(&self.x),
            Statistics::mean(&self.y),
            Statistics::mean(&self.z),
        )
        .magnitude()
    }

    /// `sqrt(max(x)^2 + max(y)^2 + max(z)^2)`; NaN when empty.
    pub fn magnitude_of_maxes(&self) -> f64 {
        Axis3::new(
            Statistics::max(&self.x),
            Statistics::max(&self.y),
            Statistics::max(&self.z),
        )
        .magnitude()
    }
}

/// Gyroscope and gravity magnitudes, kept for parity checks only.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AuxiliaryMagnitudes {
    pub gyro_magnitude_of_means: f64,
    pub gravity_magnitude_of_means: f64,
}

/// One emitted window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureRecord {
    /// Magnitude of the per-axis accelerometer means
    pub accel_magnitude_of_means: f64,
    /// Magnitude of the per-axis accelerometer maxima
    pub accel_magnitude_of_maxes: f64,
    /// Label of the last row in the window
    pub label: String,
    /// Position of the source file in scan order
    pub file_index: usize,
    /// Position of the window within its file
    pub window_index: usize,
    /// Only present when auxiliary magnitudes are enabled
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub auxiliary: Option<AuxiliaryMagnitudes>,
}

impl FeatureRecord {
    /// Feature vector handed to the trainer.
    pub fn feature_vector(&self) -> [f32; FEATURE_DIMENSION] {
        [
            self.accel_magnitude_of_means as f32,
            self.accel_magnitude_of_maxes as f32,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn buffer(readings: &[(f64, f64, f64)]) -> AxisBuffer {
        let mut buf = AxisBuffer::default();
        for &(x, y, z) in readings {
            buf.push(Axis3::new(x, y, z));
        }
        buf
    }

    #[test]
    fn test_constant_window() {
        let buf = buffer(&[(1.0, 0.0, 0.0); 10]);
        assert_eq!(buf.len(), 10);
        assert_abs_diff_eq!(buf.magnitude_of_means(), 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(buf.magnitude_of_maxes(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_means_and_maxes_are_per_axis() {
        // means (2, 0, 0), maxes (3, 4, 0)
        let buf = buffer(&[(1.0, -4.0, 0.0), (3.0, 4.0, 0.0)]);
        assert_abs_diff_eq!(buf.magnitude_of_means(), 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(buf.magnitude_of_maxes(), 5.0, epsilon = 1e-12);
    }

    #[test]
    fn test_maxes_can_be_smaller_than_means() {
        // all-negative axis: max is closer to zero than the mean
        let buf = buffer(&[(-1.0, 0.0, 0.0), (-3.0, 0.0, 0.0)]);
        assert_abs_diff_eq!(buf.magnitude_of_means(), 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(buf.magnitude_of_maxes(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_clear() {
        let mut buf = buffer(&[(1.0, 2.0, 3.0)]);
        buf.clear();
        assert!(buf.is_empty());
    }

    #[test]
    fn test_feature_vector_order() {
        let record = FeatureRecord {
            accel_magnitude_of_means: 1.5,
            accel_magnitude_of_maxes: 2.5,
            label: "walk".into(),
            file_index: 0,
            window_index: 0,
            auxiliary: None,
        };
        assert_eq!(record.feature_vector(), [1.5, 2.5]);
    }
}
