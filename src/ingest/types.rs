//! Typed sensor readings parsed from log rows.

use serde::{Deserialize, Serialize};

/// One reading of a three-axis sensor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Axis3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Axis3 {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Euclidean norm of the triple.
    pub fn magnitude(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }
}

/// A single parsed log row.
///
/// Samples are handed to the trim policy and aggregator as soon as they are
/// parsed and never retained beyond the window that consumes them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawSample {
    /// Device timestamp in milliseconds
    pub timestamp_millis: i64,
    /// Accelerometer reading
    pub accel: Axis3,
    /// Gyroscope reading
    pub gyro: Axis3,
    /// Gravity vector
    pub gravity: Axis3,
    /// Activity label, lowercased
    pub label: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_magnitude() {
        let axis = Axis3::new(3.0, 4.0, 0.0);
        assert!((axis.magnitude() - 5.0).abs() < 1e-12);
        assert_eq!(Axis3::default().magnitude(), 0.0);
    }
}
