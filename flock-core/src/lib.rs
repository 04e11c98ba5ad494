#![cfg_attr(not(feature = "std"), no_std)]

//! Boid flocking model.
//!
//! A [`Flock`] owns a fixed population of [`Boid`]s and advances them one
//! tick at a time. Each boid steers by separation, alignment and cohesion
//! against the neighbours found by a [`NeighborSearch`].

extern crate alloc;

#[cfg(not(any(feature = "std", feature = "libm")))]
compile_error!("flock-core needs either the `std` or the `libm` feature for float math");

pub mod behavior;
pub mod boid;
pub mod config;
pub mod flock;
pub mod neighbors;
pub mod vector;

pub use boid::Boid;
pub use config::{
    ConfigError, SimulationConfig, DESIRED_SEPARATION, HEIGHT, MAX_FORCE, MAX_SPEED,
    NEIGHBOR_RADIUS, NUM_BOIDS, WIDTH,
};
pub use flock::Flock;
pub use neighbors::{BruteForce, NeighborSearch};
pub use vector::Vector2D;

/// Seedable generator used to place boids reproducibly.
pub type SimRng = rand_chacha::ChaCha8Rng;
