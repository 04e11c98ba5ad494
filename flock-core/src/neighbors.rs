use alloc::vec::Vec;

use crate::boid::Boid;

/// A pluggable neighbour query that can be swapped without touching the steering rules.
pub trait NeighborSearch {
    /// Indices of the boids other than `index` lying strictly between zero
    /// and `radius` from it. Returning extra candidates is allowed: the
    /// steering rules apply their own radius filters.
    fn neighbors_within(&self, boids: &[Boid], index: usize, radius: f32) -> Vec<usize>;

    /// Human-readable name for logging.
    fn name(&self) -> &'static str;
}

/// Reference all-pairs scan.
#[derive(Debug, Clone, Copy, Default)]
pub struct BruteForce;

impl NeighborSearch for BruteForce {
    fn neighbors_within(&self, boids: &[Boid], index: usize, radius: f32) -> Vec<usize> {
        let Some(me) = boids.get(index) else {
            return Vec::new();
        };

        boids
            .iter()
            .enumerate()
            .filter(|(other, boid)| {
                let distance = me.position.distance(&boid.position);
                *other != index && distance > 0.0 && distance < radius
            })
            .map(|(other, _)| other)
            .collect()
    }

    fn name(&self) -> &'static str {
        "brute-force"
    }
}
