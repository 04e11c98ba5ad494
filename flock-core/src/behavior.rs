//! The three local flocking rules and the seek helper they share.
//!
//! Every rule takes the full candidate set, including the boid itself, and
//! keeps only peers at `0 < distance < radius`.

use crate::boid::Boid;
use crate::config::SimulationConfig;
use crate::vector::Vector2D;

/// Turn a desired heading into a steering force bounded by `max_force`.
fn steer_towards(boid: &Boid, desired: Vector2D, config: &SimulationConfig) -> Vector2D {
    let steering = desired.with_magnitude(config.max_speed) - boid.velocity;
    steering.limit(config.max_force)
}

pub fn separation<'a, I>(boid: &Boid, others: I, config: &SimulationConfig) -> Vector2D
where
    I: Iterator<Item = &'a Boid>,
{
    let mut steering = Vector2D::zero();
    let mut count = 0;

    for other in others {
        let distance = boid.position.distance(&other.position);
        if distance > 0.0 && distance < config.desired_separation {
            // Closer neighbours push harder
            let diff = (boid.position - other.position).normalize() / distance;
            steering += diff;
            count += 1;
        }
    }

    if count > 0 {
        steering = steering / count as f32;
    }

    if steering.magnitude() > 0.0 {
        steering = steer_towards(boid, steering, config);
    }

    steering
}

pub fn alignment<'a, I>(boid: &Boid, others: I, config: &SimulationConfig) -> Vector2D
where
    I: Iterator<Item = &'a Boid>,
{
    let mut sum = Vector2D::zero();
    let mut count = 0;

    for other in others {
        let distance = boid.position.distance(&other.position);
        if distance > 0.0 && distance < config.neighbor_radius {
            sum += other.velocity;
            count += 1;
        }
    }

    if count > 0 {
        steer_towards(boid, sum / count as f32, config)
    } else {
        Vector2D::zero()
    }
}

pub fn cohesion<'a, I>(boid: &Boid, others: I, config: &SimulationConfig) -> Vector2D
where
    I: Iterator<Item = &'a Boid>,
{
    let mut sum = Vector2D::zero();
    let mut count = 0;

    for other in others {
        let distance = boid.position.distance(&other.position);
        if distance > 0.0 && distance < config.neighbor_radius {
            sum += other.position;
            count += 1;
        }
    }

    if count > 0 {
        seek(boid, sum / count as f32, config)
    } else {
        Vector2D::zero()
    }
}

pub fn seek(boid: &Boid, target: Vector2D, config: &SimulationConfig) -> Vector2D {
    steer_towards(boid, target - boid.position, config)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    fn config() -> SimulationConfig {
        SimulationConfig::default()
    }

    fn boid(x: f32, y: f32, vx: f32, vy: f32) -> Boid {
        Boid::new(Vector2D::new(x, y), Vector2D::new(vx, vy))
    }

    #[test]
    fn test_no_neighbors_gives_zero() {
        let config = config();
        let me = boid(100.0, 100.0, 1.0, 0.0);
        let far = boid(400.0, 400.0, -1.0, 0.0);
        let flock = [me, far];

        assert!(separation(&me, flock.iter(), &config).is_zero());
        assert!(alignment(&me, flock.iter(), &config).is_zero());
        assert!(cohesion(&me, flock.iter(), &config).is_zero());
    }

    #[test]
    fn test_self_is_ignored() {
        let config = config();
        let me = boid(100.0, 100.0, 1.0, 0.0);
        let flock = [me, me];

        assert!(separation(&me, flock.iter(), &config).is_zero());
        assert!(alignment(&me, flock.iter(), &config).is_zero());
        assert!(cohesion(&me, flock.iter(), &config).is_zero());
    }

    #[test]
    fn test_separation_pushes_apart() {
        let config = config();
        let left = boid(100.0, 100.0, 0.0, 1.0);
        let right = boid(110.0, 100.0, 0.0, 1.0);
        let flock = [left, right];

        let push_left = separation(&left, flock.iter(), &config);
        let push_right = separation(&right, flock.iter(), &config);

        assert!(push_left.x < 0.0);
        assert!(push_right.x > 0.0);
        assert!(push_left.magnitude() <= config.max_force + EPSILON);
        assert!(push_right.magnitude() <= config.max_force + EPSILON);
    }

    #[test]
    fn test_separation_radius_is_exclusive() {
        let config = config();
        let me = boid(100.0, 100.0, 1.0, 0.0);
        let edge = boid(125.0, 100.0, 1.0, 0.0);
        let flock = [me, edge];

        assert!(separation(&me, flock.iter(), &config).is_zero());
        // Still within the neighbour radius for the other rules
        assert!(!cohesion(&me, flock.iter(), &config).is_zero());
    }

    #[test]
    fn test_alignment_turns_towards_neighbor_heading() {
        let config = config();
        let me = boid(100.0, 100.0, 3.0, 0.0);
        let other = boid(130.0, 100.0, 0.0, 3.0);
        let flock = [me, other];

        let steering = alignment(&me, flock.iter(), &config);
        assert!(steering.y > 0.0);
        assert!(steering.x < 0.0);
        assert!((steering.magnitude() - config.max_force).abs() < EPSILON);
    }

    #[test]
    fn test_alignment_already_matched_is_small() {
        let config = config();
        let me = boid(100.0, 100.0, 3.0, 0.0);
        let other = boid(130.0, 100.0, 3.0, 0.0);
        let flock = [me, other];

        let steering = alignment(&me, flock.iter(), &config);
        assert!(steering.magnitude() < EPSILON);
    }

    #[test]
    fn test_cohesion_pulls_towards_centroid() {
        let config = config();
        let me = boid(100.0, 100.0, 0.0, 0.0);
        let a = boid(100.0, 130.0, 0.0, 0.0);
        let b = boid(100.0, 140.0, 0.0, 0.0);
        let flock = [me, a, b];

        let steering = cohesion(&me, flock.iter(), &config);
        assert!(steering.x.abs() < EPSILON);
        assert!(steering.y > 0.0);
        assert!((steering.magnitude() - config.max_force).abs() < EPSILON);
    }

    #[test]
    fn test_seek_is_bounded() {
        let config = config();
        let me = boid(0.0, 0.0, -3.0, 0.0);
        let steering = seek(&me, Vector2D::new(500.0, 0.0), &config);
        assert!(steering.x > 0.0);
        assert!((steering.magnitude() - config.max_force).abs() < EPSILON);
    }
}
