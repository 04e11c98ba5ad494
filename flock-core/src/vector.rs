/// A 2D vector used for position and velocity
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vector2D {
    pub x: f32,
    pub y: f32,
}

pub(crate) fn sqrt(value: f32) -> f32 {
    #[cfg(feature = "std")]
    {
        value.sqrt()
    }
    #[cfg(all(not(feature = "std"), feature = "libm"))]
    {
        libm::sqrtf(value)
    }
}

impl Vector2D {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    pub fn is_zero(&self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    pub fn magnitude(&self) -> f32 {
        sqrt(self.x * self.x + self.y * self.y)
    }

    /// Unit vector in the same direction. A zero-length vector is returned unchanged.
    pub fn normalize(&self) -> Self {
        let mag = self.magnitude();
        if mag > 0.0 {
            Self {
                x: self.x / mag,
                y: self.y / mag,
            }
        } else {
            *self
        }
    }

    /// Rescale to `max` if the magnitude exceeds it.
    pub fn limit(&self, max: f32) -> Self {
        if self.magnitude() > max {
            self.with_magnitude(max)
        } else {
            *self
        }
    }

    pub fn with_magnitude(&self, magnitude: f32) -> Self {
        self.normalize() * magnitude
    }

    pub fn distance(&self, other: &Vector2D) -> f32 {
        (*self - *other).magnitude()
    }
}

impl core::ops::Add for Vector2D {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

impl core::ops::Sub for Vector2D {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

impl core::ops::Mul<f32> for Vector2D {
    type Output = Self;

    fn mul(self, scalar: f32) -> Self {
        Self {
            x: self.x * scalar,
            y: self.y * scalar,
        }
    }
}

/// Component-wise division. `scalar` must be non-zero.
impl core::ops::Div<f32> for Vector2D {
    type Output = Self;

    fn div(self, scalar: f32) -> Self {
        debug_assert!(scalar != 0.0, "Vector2D divided by zero");
        Self {
            x: self.x / scalar,
            y: self.y / scalar,
        }
    }
}

impl core::ops::AddAssign for Vector2D {
    fn add_assign(&mut self, other: Self) {
        self.x += other.x;
        self.y += other.y;
    }
}

impl core::ops::SubAssign for Vector2D {
    fn sub_assign(&mut self, other: Self) {
        self.x -= other.x;
        self.y -= other.y;
    }
}
