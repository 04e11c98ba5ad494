use std::time::Instant;

use flock_core::{BruteForce, Flock, NeighborSearch};

use crate::shell::{Backend, Color, Event, Rect, Renderer, ShellError};

pub const WINDOW_TITLE: &str = "Flocking Simulation";
/// Side of the square each boid is drawn as, in pixels
pub const BOID_SIZE: u32 = 3;
pub const BACKGROUND: Color = Color::BLACK;
pub const BOID_COLOR: Color = Color::WHITE;

/// Drives a flock through a backend: events, tick, draw, present.
pub struct App<B, S = BruteForce> {
    flock: Flock<S>,
    backend: B,
}

impl<B: Backend, S: NeighborSearch> App<B, S> {
    pub fn new(flock: Flock<S>, backend: B) -> Self {
        Self { flock, backend }
    }

    pub fn flock(&self) -> &Flock<S> {
        &self.flock
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Run until the backend reports `Quit` or `frame_limit` frames are shown.
    ///
    /// Returns the number of frames presented. Frame pacing is uncapped.
    pub fn run(&mut self, frame_limit: Option<u64>) -> Result<u64, ShellError> {
        let config = *self.flock.config();
        // Canvas covers positions up to a fractional far edge
        let window = self.backend.create_window(
            WINDOW_TITLE,
            config.width.ceil() as u32,
            config.height.ceil() as u32,
        )?;
        let mut renderer = self.backend.create_renderer(&window)?;

        log::info!("Starting main loop with {} boids...", self.flock.len());

        let mut frames = 0;
        let mut frame_count = 0;
        let mut last_fps_time = Instant::now();

        'frames: while frame_limit.map_or(true, |limit| frames < limit) {
            while let Some(event) = self.backend.poll_event() {
                if event == Event::Quit {
                    log::info!("Quit requested");
                    break 'frames;
                }
            }

            self.flock.tick();
            self.draw(&mut renderer)?;
            frames += 1;

            frame_count += 1;
            if last_fps_time.elapsed().as_secs() >= 1 {
                let fps = frame_count as f64 / last_fps_time.elapsed().as_secs_f64();
                log::debug!("FPS: {:.1}", fps);
                frame_count = 0;
                last_fps_time = Instant::now();
            }
        }

        log::info!("Stopped after {} frames", frames);
        Ok(frames)
    }

    fn draw(&self, renderer: &mut B::Renderer) -> Result<(), ShellError> {
        renderer.clear(BACKGROUND)?;
        for boid in self.flock.boids() {
            let rect = Rect::new(
                boid.position.x as i32,
                boid.position.y as i32,
                BOID_SIZE,
                BOID_SIZE,
            );
            renderer.fill_rect(rect, BOID_COLOR)?;
        }
        renderer.present()
    }
}
