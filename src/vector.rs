use std::fmt;
use std::ops::{Add, AddAssign, Mul, Neg, Sub};

use serde::Serialize;

use crate::error::VectorError;

const THRESH: f64 = 0.000_001;

#[derive(Clone, Copy, Debug, Default, Serialize)]
pub struct Vector2 {
    pub x: f64,
    pub y: f64,
}

impl Vector2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn try_div(self, scalar: f64) -> Result<Self, VectorError> {
        if scalar == 0.0 {
            return Err(VectorError::DivisionByZero);
        }
        Ok(Self::new(self.x / scalar, self.y / scalar))
    }

    pub fn magnitude_squared(self) -> f64 {
        self.x * self.x + self.y * self.y
    }

    pub fn magnitude(self) -> f64 {
        self.magnitude_squared().sqrt()
    }

    pub fn distance_squared(self, other: Self) -> f64 {
        (self - other).magnitude_squared()
    }
}

impl PartialEq for Vector2 {
    fn eq(&self, other: &Self) -> bool {
        (self.x - other.x).abs() < THRESH && (self.y - other.y).abs() < THRESH
    }
}

impl Add for Vector2 {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }
}

impl AddAssign for Vector2 {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl Sub for Vector2 {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }
}

impl Neg for Vector2 {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

impl Mul<f64> for Vector2 {
    type Output = Self;

    fn mul(self, scalar: f64) -> Self {
        Self::new(self.x * scalar, self.y * scalar)
    }
}

impl fmt::Display for Vector2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}, {}>", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_tolerates_tiny_drift() {
        let a = Vector2::new(16.0, 0.0);
        let b = Vector2::new(16.0 + 1e-9, -1e-9);
        assert_eq!(a, b);
        assert_ne!(a, Vector2::new(16.001, 0.0));
    }

    #[test]
    fn division_by_zero_is_an_error() {
        assert_eq!(
            Vector2::new(1.0, 2.0).try_div(0.0),
            Err(VectorError::DivisionByZero)
        );
        assert_eq!(
            Vector2::new(32.0, 16.0).try_div(2.0),
            Ok(Vector2::new(16.0, 8.0))
        );
    }

    #[test]
    fn arithmetic_returns_new_values() {
        let a = Vector2::new(3.0, 4.0);
        let b = Vector2::new(1.0, -1.0);
        assert_eq!(a + b, Vector2::new(4.0, 3.0));
        assert_eq!(a - b, Vector2::new(2.0, 5.0));
        assert_eq!(-a, Vector2::new(-3.0, -4.0));
        assert_eq!(a * 2.0, Vector2::new(6.0, 8.0));
        assert_eq!(a.magnitude(), 5.0);
        assert_eq!(a.magnitude_squared(), 25.0);
        assert_eq!(a.to_string(), "<3, 4>");
    }
}
