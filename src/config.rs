//! Model settings and the physical constants of the simulation.

use crate::error::{Result, WobblyError};

/// Default stiffness of every spring in the mesh.
pub const DEFAULT_SPRING_CONSTANT: f64 = 8.0;
/// Default velocity damping coefficient.
pub const DEFAULT_FRICTION: f64 = 3.0;
/// Default cap on the force a single spring may exert.
pub const DEFAULT_MAXIMUM_RANGE: f64 = 500.0;
/// Mass of every mesh point.
pub const MASS: f64 = 15.0;
/// Length of one integration sub-step in milliseconds.
pub const SUB_STEP_MS: u32 = 16;
/// Largest `springs * spring_constant / MASS` one integration slice may
/// see. A stiffer point splits each sub-step into shorter slices.
pub const STABLE_STIFFNESS: f64 = 2.4;
/// Speed and net force below which a free point counts as settled.
pub const SETTLE_EPSILON: f64 = 0.01;
/// Points per side of the texture grid.
pub const GRID_RESOLUTION: usize = 4;

/// Physical parameters of a [`Model`](crate::Model). Fixed for the life of
/// the model.
///
/// # Builder Pattern
/// ```
/// use wobbly::Settings;
///
/// let settings = Settings::new()
///     .with_spring_constant(10.0)
///     .with_friction(4.0)
///     .with_maximum_range(250.0);
/// assert!(settings.validate().is_ok());
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Settings {
    /// Spring stiffness. Must be positive. Default: 8.0.
    pub spring_constant: f64,
    /// Velocity damping. Must be non-negative. Default: 3.0.
    pub friction: f64,
    /// Largest force magnitude one spring contributes. Must be positive.
    /// Default: 500.0.
    pub maximum_range: f64,
}

impl Settings {
    /// Create settings with default values.
    pub fn new() -> Self {
        Settings {
            spring_constant: DEFAULT_SPRING_CONSTANT,
            friction: DEFAULT_FRICTION,
            maximum_range: DEFAULT_MAXIMUM_RANGE,
        }
    }

    /// Set the spring constant.
    pub fn with_spring_constant(mut self, spring_constant: f64) -> Self {
        self.spring_constant = spring_constant;
        self
    }

    /// Set the friction coefficient.
    pub fn with_friction(mut self, friction: f64) -> Self {
        self.friction = friction;
        self
    }

    /// Set the per-spring force cap.
    pub fn with_maximum_range(mut self, maximum_range: f64) -> Self {
        self.maximum_range = maximum_range;
        self
    }

    /// Check every parameter is finite and in range.
    pub fn validate(&self) -> Result<()> {
        if !(self.spring_constant.is_finite() && self.spring_constant > 0.0) {
            return Err(WobblyError::InvalidSettings("spring constant must be positive and finite"));
        }
        if !(self.friction.is_finite() && self.friction >= 0.0) {
            return Err(WobblyError::InvalidSettings("friction must be non-negative and finite"));
        }
        if !(self.maximum_range.is_finite() && self.maximum_range > 0.0) {
            return Err(WobblyError::InvalidSettings("maximum range must be positive and finite"));
        }
        Ok(())
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_constants() {
        let settings = Settings::default();
        assert_eq!(settings.spring_constant, 8.0);
        assert_eq!(settings.friction, 3.0);
        assert_eq!(settings.maximum_range, 500.0);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn zero_friction_is_allowed() {
        assert!(Settings::new().with_friction(0.0).validate().is_ok());
    }

    #[test]
    fn rejects_non_positive_spring_constant() {
        let err = Settings::new().with_spring_constant(0.0).validate().unwrap_err();
        assert!(matches!(err, WobblyError::InvalidSettings(_)));
    }

    #[test]
    fn rejects_negative_friction() {
        assert!(Settings::new().with_friction(-1.0).validate().is_err());
    }

    #[test]
    fn rejects_nan_range() {
        assert!(Settings::new().with_maximum_range(f64::NAN).validate().is_err());
        assert!(Settings::new().with_maximum_range(f64::INFINITY).validate().is_err());
    }
}
