//! Timestamped canvas points sampled from the pointer.

use crate::util;
use chrono::Utc;

/// An immutable canvas-relative sample of the pointer position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    /// Sample time in milliseconds since the Unix epoch
    pub time: i64,
}

impl Point {
    /// Creates a point stamped with the current time.
    pub fn new(x: f64, y: f64) -> Self {
        Self::with_time(x, y, Utc::now().timestamp_millis())
    }

    pub fn with_time(x: f64, y: f64, time: i64) -> Self {
        Self { x, y, time }
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        util::distance(self.x, self.y, other.x, other.y)
    }

    /// Pointer speed in pixels per millisecond between `start` and this point.
    ///
    /// Returns `0.0` when no time elapsed between the samples.
    pub fn velocity_from(&self, start: &Point) -> f64 {
        let elapsed = self.time - start.time;
        if elapsed > 0 {
            self.distance_to(start) / elapsed as f64
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn velocity_uses_elapsed_millis() {
        let start = Point::with_time(0.0, 0.0, 1_000);
        let end = Point::with_time(30.0, 40.0, 1_010);
        assert_eq!(end.distance_to(&start), 50.0);
        assert_eq!(end.velocity_from(&start), 5.0);
    }

    #[test]
    fn velocity_without_elapsed_time_is_zero() {
        let a = Point::with_time(0.0, 0.0, 5);
        let b = Point::with_time(10.0, 0.0, 5);
        assert_eq!(b.velocity_from(&a), 0.0);
    }
}
