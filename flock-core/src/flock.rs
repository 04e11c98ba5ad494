use alloc::vec::Vec;

use rand::Rng;

use crate::boid::Boid;
use crate::config::{ConfigError, SimulationConfig};
use crate::neighbors::{BruteForce, NeighborSearch};
use crate::vector::Vector2D;

/// A fixed-size collection of boids advanced one tick at a time.
///
/// Every tick is computed from the pre-tick state of the whole flock and
/// only then committed, so the outcome does not depend on boid order.
#[derive(Debug, Clone)]
pub struct Flock<S = BruteForce> {
    boids: Vec<Boid>,
    config: SimulationConfig,
    search: S,
    ticks: u64,
}

impl Flock<BruteForce> {
    /// Spawn `config.boid_count` boids at random whole-pixel positions.
    pub fn new<R: Rng + ?Sized>(config: SimulationConfig, rng: &mut R) -> Result<Self, ConfigError> {
        config.validate()?;

        let columns = (config.width as u32).max(1);
        let rows = (config.height as u32).max(1);
        let positions: Vec<Vector2D> = (0..config.boid_count)
            .map(|_| {
                Vector2D::new(
                    rng.gen_range(0..columns) as f32,
                    rng.gen_range(0..rows) as f32,
                )
            })
            .collect();

        Self::from_positions(config, positions, rng)
    }

    /// Place one boid at each of `positions`; velocities still come from `rng`.
    ///
    /// The flock size is the number of positions, whatever `config.boid_count` says.
    pub fn from_positions<R, P>(config: SimulationConfig, positions: P, rng: &mut R) -> Result<Self, ConfigError>
    where
        R: Rng + ?Sized,
        P: IntoIterator<Item = Vector2D>,
    {
        let boids = positions
            .into_iter()
            .map(|position| Boid::spawn(position, rng))
            .collect();
        Self::from_boids(config, boids)
    }

    pub fn from_boids(config: SimulationConfig, boids: Vec<Boid>) -> Result<Self, ConfigError> {
        let config = config.with_boid_count(boids.len());
        config.validate()?;

        log::debug!(
            "Flock of {} boids on a {}x{} field",
            boids.len(),
            config.width,
            config.height
        );

        Ok(Self {
            boids,
            config,
            search: BruteForce,
            ticks: 0,
        })
    }
}

impl<S: NeighborSearch> Flock<S> {
    /// Replace the neighbour query used by [`tick`](Self::tick).
    pub fn with_search<T: NeighborSearch>(self, search: T) -> Flock<T> {
        log::info!("Neighbour search: {}", search.name());
        Flock {
            boids: self.boids,
            config: self.config,
            search,
            ticks: self.ticks,
        }
    }

    pub fn tick(&mut self) {
        let radius = self.config.query_radius();
        let boids = &self.boids;

        // Forces first, against the untouched snapshot
        let accelerations: Vec<Vector2D> = boids
            .iter()
            .enumerate()
            .map(|(index, boid)| {
                let neighbors = self.search.neighbors_within(boids, index, radius);
                boid.acceleration(neighbors.iter().map(|&other| &boids[other]), &self.config)
            })
            .collect();

        for (boid, acceleration) in self.boids.iter_mut().zip(accelerations) {
            boid.step(acceleration, &self.config);
        }

        self.ticks += 1;
        log::trace!("tick {} done for {} boids", self.ticks, self.boids.len());
    }

    pub fn run(&mut self, ticks: u64) {
        for _ in 0..ticks {
            self.tick();
        }
    }

    pub fn boids(&self) -> &[Boid] {
        &self.boids
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn search(&self) -> &S {
        &self.search
    }

    /// Number of ticks advanced so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn len(&self) -> usize {
        self.boids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boids.is_empty()
    }
}
