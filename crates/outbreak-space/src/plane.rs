//! The bounded square the agents move on.

use outbreak_core::Vec2;

use crate::error::SpaceError;

/// Axis-aligned square `[0, size] × [0, size]`.
///
/// Positions outside the square are brought back with a hard clamp:
/// an agent that would cross an edge stops on it, it does not bounce.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Plane {
    size: f64,
}

impl Plane {
    /// Create a plane with the given side length.
    ///
    /// # Errors
    ///
    /// Returns [`SpaceError::InvalidSize`] if `size` is not finite and
    /// strictly positive.
    pub fn new(size: f64) -> Result<Self, SpaceError> {
        if !size.is_finite() || size <= 0.0 {
            return Err(SpaceError::InvalidSize { value: size });
        }
        Ok(Self { size })
    }

    /// Side length.
    pub fn size(&self) -> f64 {
        self.size
    }

    /// Whether `p` lies inside the closed square.
    pub fn contains(&self, p: Vec2) -> bool {
        (0.0..=self.size).contains(&p.x) && (0.0..=self.size).contains(&p.y)
    }

    /// Clamp a point into the square.
    #[inline]
    pub fn clamp(&self, p: Vec2) -> Vec2 {
        p.clamp(0.0, self.size)
    }

    /// Clamp every point of a slice in place.
    pub fn clamp_all(&self, points: &mut [Vec2]) {
        for p in points.iter_mut() {
            *p = self.clamp(*p);
        }
    }
}
