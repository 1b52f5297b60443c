/// A range of real numbers, used for the y-extent of cylinders and cones.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub min: f64,
    pub max: f64,
}

impl Interval {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Returns true if x is strictly within (min, max).
    pub fn surrounds(&self, x: f64) -> bool {
        self.min < x && x < self.max
    }
}
