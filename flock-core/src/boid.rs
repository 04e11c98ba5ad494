use rand::Rng;

use crate::behavior;
use crate::config::SimulationConfig;
use crate::vector::Vector2D;

/// Per-axis bound of a freshly spawned boid's velocity.
pub const INITIAL_SPEED_RANGE: f32 = 1.5;

/// A single boid entity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Boid {
    pub position: Vector2D,
    pub velocity: Vector2D,
}

impl Boid {
    pub fn new(position: Vector2D, velocity: Vector2D) -> Self {
        Self { position, velocity }
    }

    /// Boid at `position` with a velocity drawn from `[-1.5, 1.5)` on each axis.
    pub fn spawn<R: Rng + ?Sized>(position: Vector2D, rng: &mut R) -> Self {
        let velocity = Vector2D::new(
            rng.gen_range(-INITIAL_SPEED_RANGE..INITIAL_SPEED_RANGE),
            rng.gen_range(-INITIAL_SPEED_RANGE..INITIAL_SPEED_RANGE),
        );
        Self::new(position, velocity)
    }

    /// Unweighted sum of separation, alignment and cohesion against `others`.
    ///
    /// `others` may contain this boid; it sits at distance zero and is
    /// skipped by every rule.
    pub fn acceleration<'a, I>(&self, others: I, config: &SimulationConfig) -> Vector2D
    where
        I: Iterator<Item = &'a Boid> + Clone,
    {
        let separation = behavior::separation(self, others.clone(), config);
        let alignment = behavior::alignment(self, others.clone(), config);
        let cohesion = behavior::cohesion(self, others, config);
        separation + alignment + cohesion
    }

    /// Apply `acceleration` and move.
    ///
    /// The resulting speed is always exactly `max_speed`: the acceleration
    /// only turns the boid. A velocity that sums to zero stays zero.
    pub fn advance(&mut self, acceleration: Vector2D, config: &SimulationConfig) {
        self.velocity += acceleration;
        self.velocity = self.velocity.with_magnitude(config.max_speed);
        self.position += self.velocity;
    }

    pub fn wrap_edges(&mut self, width: f32, height: f32) {
        if self.position.x < 0.0 {
            self.position.x = width;
        } else if self.position.x > width {
            self.position.x = 0.0;
        }

        if self.position.y < 0.0 {
            self.position.y = height;
        } else if self.position.y > height {
            self.position.y = 0.0;
        }
    }

    /// Commit one tick's `acceleration`: move, then wrap at the field edges.
    pub fn step(&mut self, acceleration: Vector2D, config: &SimulationConfig) {
        self.advance(acceleration, config);
        self.wrap_edges(config.width, config.height);
    }

    /// Full per-tick step against a snapshot of the flock.
    pub fn update(&mut self, snapshot: &[Boid], config: &SimulationConfig) {
        let acceleration = self.acceleration(snapshot.iter(), config);
        self.step(acceleration, config);
    }
}
