use core::fmt;

pub const WIDTH: f32 = 800.0;
pub const HEIGHT: f32 = 600.0;
pub const NUM_BOIDS: usize = 100;
pub const MAX_SPEED: f32 = 3.0;
pub const MAX_FORCE: f32 = 0.1;
pub const DESIRED_SEPARATION: f32 = 25.0;
pub const NEIGHBOR_RADIUS: f32 = 50.0;

/// Configuration for the boid simulation
///
/// Fixed for the lifetime of a [`Flock`](crate::Flock); build an alternate
/// parameter set with the `with_*` setters before constructing one.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimulationConfig {
    pub width: f32,
    pub height: f32,
    pub boid_count: usize,
    pub max_speed: f32,
    pub max_force: f32,
    pub desired_separation: f32,
    pub neighbor_radius: f32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            width: WIDTH,
            height: HEIGHT,
            boid_count: NUM_BOIDS,
            max_speed: MAX_SPEED,
            max_force: MAX_FORCE,
            desired_separation: DESIRED_SEPARATION,
            neighbor_radius: NEIGHBOR_RADIUS,
        }
    }
}

impl SimulationConfig {
    pub fn with_field(mut self, width: f32, height: f32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_boid_count(mut self, boid_count: usize) -> Self {
        self.boid_count = boid_count;
        self
    }

    pub fn with_max_speed(mut self, max_speed: f32) -> Self {
        self.max_speed = max_speed;
        self
    }

    pub fn with_max_force(mut self, max_force: f32) -> Self {
        self.max_force = max_force;
        self
    }

    pub fn with_desired_separation(mut self, distance: f32) -> Self {
        self.desired_separation = distance;
        self
    }

    pub fn with_neighbor_radius(mut self, radius: f32) -> Self {
        self.neighbor_radius = radius;
        self
    }

    /// Largest radius any steering rule looks at.
    pub fn query_radius(&self) -> f32 {
        self.desired_separation.max(self.neighbor_radius)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("width", self.width),
            ("height", self.height),
            ("max_speed", self.max_speed),
            ("max_force", self.max_force),
            ("desired_separation", self.desired_separation),
            ("neighbor_radius", self.neighbor_radius),
        ];

        for (field, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::NotPositive { field, value });
            }
        }

        if self.boid_count == 0 {
            return Err(ConfigError::EmptyFlock);
        }

        Ok(())
    }
}

/// Rejected simulation parameters
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    NotPositive { field: &'static str, value: f32 },
    EmptyFlock,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NotPositive { field, value } => {
                write!(f, "{} must be a positive finite number, got {}", field, value)
            }
            ConfigError::EmptyFlock => write!(f, "boid_count must be at least 1"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_constants() {
        let config = SimulationConfig::default();
        assert_eq!(config.width, 800.0);
        assert_eq!(config.height, 600.0);
        assert_eq!(config.boid_count, 100);
        assert_eq!(config.max_speed, 3.0);
        assert_eq!(config.max_force, 0.1);
        assert_eq!(config.desired_separation, 25.0);
        assert_eq!(config.neighbor_radius, 50.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_query_radius_is_largest() {
        let config = SimulationConfig::default();
        assert_eq!(config.query_radius(), 50.0);

        let wide_separation = config.with_desired_separation(80.0);
        assert_eq!(wide_separation.query_radius(), 80.0);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let config = SimulationConfig::default().with_max_speed(0.0);
        assert_eq!(
            config.validate(),
            Err(ConfigError::NotPositive {
                field: "max_speed",
                value: 0.0
            })
        );

        let config = SimulationConfig::default().with_field(f32::NAN, 600.0);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NotPositive { field: "width", .. })
        ));

        let config = SimulationConfig::default().with_boid_count(0);
        assert_eq!(config.validate(), Err(ConfigError::EmptyFlock));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_partial_json_uses_defaults() {
        let config: SimulationConfig =
            serde_json::from_str(r#"{ "boid_count": 12, "max_speed": 2.5 }"#).unwrap();
        assert_eq!(config.boid_count, 12);
        assert_eq!(config.max_speed, 2.5);
        assert_eq!(config.width, WIDTH);
        assert_eq!(config.neighbor_radius, NEIGHBOR_RADIUS);
    }
}
