//! Frame loop and render shells for the flocking simulation.
//!
//! The loop only talks to the [`shell::Backend`] and [`shell::Renderer`]
//! traits. The headless backend is always built; the OpenCV window needs the
//! `opencv-backend` feature.

pub mod app;
pub mod headless;
pub mod settings;
pub mod shell;
#[cfg(feature = "opencv-backend")]
pub mod window;

pub use app::App;
pub use headless::{Framebuffer, HeadlessBackend};
pub use shell::{Backend, Color, Event, Rect, Renderer, ShellError};
