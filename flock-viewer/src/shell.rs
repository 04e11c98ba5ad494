//! Window, renderer and event contract the frame loop draws through.
//!
//! Backends own the platform resources; dropping a window or renderer tears
//! it down.

use std::fmt;

/// RGB colour value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::new(0, 0, 0);
    pub const WHITE: Color = Color::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Axis-aligned rectangle in window pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Quit,
    /// Anything the frame loop does not react to (key presses, focus changes)
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellError {
    WindowCreation(String),
    RendererCreation(String),
    Draw(String),
    /// The requested backend was not compiled in
    Unavailable(&'static str),
}

impl fmt::Display for ShellError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShellError::WindowCreation(reason) => write!(f, "window could not be created: {}", reason),
            ShellError::RendererCreation(reason) => {
                write!(f, "renderer could not be created: {}", reason)
            }
            ShellError::Draw(reason) => write!(f, "drawing failed: {}", reason),
            ShellError::Unavailable(backend) => {
                write!(f, "the {} backend is not available in this build", backend)
            }
        }
    }
}

impl std::error::Error for ShellError {}

pub trait Renderer {
    fn clear(&mut self, color: Color) -> Result<(), ShellError>;

    fn fill_rect(&mut self, rect: Rect, color: Color) -> Result<(), ShellError>;

    /// Show everything drawn since the last `present`.
    fn present(&mut self) -> Result<(), ShellError>;
}

pub trait Backend {
    type Window;
    type Renderer: Renderer;

    fn create_window(&mut self, title: &str, width: u32, height: u32) -> Result<Self::Window, ShellError>;

    fn create_renderer(&mut self, window: &Self::Window) -> Result<Self::Renderer, ShellError>;

    /// Next pending event, without waiting. `None` once the queue is drained.
    fn poll_event(&mut self) -> Option<Event>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ShellError::WindowCreation("no display".to_string());
        assert_eq!(err.to_string(), "window could not be created: no display");

        let err = ShellError::Unavailable("opencv");
        assert_eq!(err.to_string(), "the opencv backend is not available in this build");
    }
}
