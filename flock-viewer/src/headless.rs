//! Off-screen backend drawing into an in-memory framebuffer.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::convert::Infallible;
use std::rc::Rc;

use embedded_graphics::{
    pixelcolor::Rgb888,
    prelude::*,
    primitives::{PrimitiveStyle, Rectangle},
};

use crate::shell::{Backend, Color, Event, Rect, Renderer, ShellError};

impl From<Color> for Rgb888 {
    fn from(color: Color) -> Self {
        Rgb888::new(color.r, color.g, color.b)
    }
}

/// RGB pixel buffer usable as an embedded-graphics draw target
#[derive(Debug, Clone, PartialEq)]
pub struct Framebuffer {
    width: u32,
    height: u32,
    pixels: Vec<Rgb888>,
}

/// Largest canvas side the headless renderer will allocate, in pixels
pub const MAX_CANVAS_SIDE: u32 = 16_384;

impl Framebuffer {
    /// Black canvas of `width` x `height` pixels.
    ///
    /// Fails instead of aborting when the canvas is too large to allocate.
    pub fn new(width: u32, height: u32) -> Result<Self, ShellError> {
        if width > MAX_CANVAS_SIDE || height > MAX_CANVAS_SIDE {
            return Err(ShellError::RendererCreation(format!(
                "{}x{} canvas exceeds the {}px side limit",
                width, height, MAX_CANVAS_SIDE
            )));
        }

        let len = (width as usize)
            .checked_mul(height as usize)
            .ok_or_else(|| {
                ShellError::RendererCreation(format!("{}x{} canvas is too large", width, height))
            })?;

        let mut pixels = Vec::new();
        pixels.try_reserve_exact(len).map_err(|e| {
            ShellError::RendererCreation(format!("{}x{} canvas: {}", width, height, e))
        })?;
        pixels.resize(len, Rgb888::BLACK);

        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb888> {
        if x < self.width && y < self.height {
            Some(self.pixels[self.index(x, y)])
        } else {
            None
        }
    }

    pub fn count(&self, color: Color) -> usize {
        let color = Rgb888::from(color);
        self.pixels.iter().filter(|&&pixel| pixel == color).count()
    }
}

impl DrawTarget for Framebuffer {
    type Color = Rgb888;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if point.x < 0 || point.y < 0 {
                continue;
            }
            let (x, y) = (point.x as u32, point.y as u32);
            if x < self.width && y < self.height {
                let index = self.index(x, y);
                self.pixels[index] = color;
            }
        }
        Ok(())
    }
}

impl OriginDimensions for Framebuffer {
    fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

pub struct HeadlessWindow {
    width: u32,
    height: u32,
}

pub struct HeadlessRenderer {
    canvas: Framebuffer,
    presented: Rc<Cell<u64>>,
    last_frame: Rc<RefCell<Option<Framebuffer>>>,
}

impl Renderer for HeadlessRenderer {
    fn clear(&mut self, color: Color) -> Result<(), ShellError> {
        self.canvas.clear(color.into()).map_err(|never| match never {})
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) -> Result<(), ShellError> {
        Rectangle::new(Point::new(rect.x, rect.y), Size::new(rect.width, rect.height))
            .into_styled(PrimitiveStyle::with_fill(Rgb888::from(color)))
            .draw(&mut self.canvas)
            .map_err(|never| match never {})
    }

    fn present(&mut self) -> Result<(), ShellError> {
        *self.last_frame.borrow_mut() = Some(self.canvas.clone());
        self.presented.set(self.presented.get() + 1);
        Ok(())
    }
}

/// Backend with no display: frames are kept in memory and the event queue
/// is fed by the caller.
#[derive(Default)]
pub struct HeadlessBackend {
    events: VecDeque<Event>,
    quit_after: Option<u64>,
    presented: Rc<Cell<u64>>,
    last_frame: Rc<RefCell<Option<Framebuffer>>>,
}

impl HeadlessBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report `Quit` once this many frames have been presented.
    pub fn with_quit_after(mut self, frames: u64) -> Self {
        self.quit_after = Some(frames);
        self
    }

    pub fn push_event(&mut self, event: Event) {
        self.events.push_back(event);
    }

    pub fn frames_presented(&self) -> u64 {
        self.presented.get()
    }

    /// Copy of the most recently presented frame.
    pub fn last_frame(&self) -> Option<Framebuffer> {
        self.last_frame.borrow().clone()
    }
}

impl Backend for HeadlessBackend {
    type Window = HeadlessWindow;
    type Renderer = HeadlessRenderer;

    fn create_window(&mut self, title: &str, width: u32, height: u32) -> Result<Self::Window, ShellError> {
        if width == 0 || height == 0 {
            return Err(ShellError::WindowCreation(format!(
                "{}x{} is not a drawable size",
                width, height
            )));
        }
        log::debug!("Headless window '{}' ({}x{})", title, width, height);
        Ok(HeadlessWindow { width, height })
    }

    fn create_renderer(&mut self, window: &Self::Window) -> Result<Self::Renderer, ShellError> {
        Ok(HeadlessRenderer {
            canvas: Framebuffer::new(window.width, window.height)?,
            presented: Rc::clone(&self.presented),
            last_frame: Rc::clone(&self.last_frame),
        })
    }

    fn poll_event(&mut self) -> Option<Event> {
        if let Some(event) = self.events.pop_front() {
            return Some(event);
        }
        match self.quit_after {
            Some(limit) if self.presented.get() >= limit => Some(Event::Quit),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_rect_is_clipped() {
        let mut backend = HeadlessBackend::new();
        let window = backend.create_window("test", 10, 10).unwrap();
        let mut renderer = backend.create_renderer(&window).unwrap();

        renderer.clear(Color::BLACK).unwrap();
        renderer.fill_rect(Rect::new(8, 8, 3, 3), Color::WHITE).unwrap();
        renderer.fill_rect(Rect::new(-1, -1, 3, 3), Color::WHITE).unwrap();
        renderer.present().unwrap();

        let frame = backend.last_frame().unwrap();
        assert_eq!(frame.count(Color::WHITE), 4 + 4);
        assert_eq!(frame.pixel(9, 9), Some(Rgb888::WHITE));
        assert_eq!(frame.pixel(0, 0), Some(Rgb888::WHITE));
        assert_eq!(frame.pixel(5, 5), Some(Rgb888::BLACK));
        assert_eq!(frame.pixel(10, 0), None);
    }

    #[test]
    fn test_clear_overwrites() {
        let mut backend = HeadlessBackend::new();
        let window = backend.create_window("test", 4, 4).unwrap();
        let mut renderer = backend.create_renderer(&window).unwrap();

        renderer.fill_rect(Rect::new(0, 0, 4, 4), Color::WHITE).unwrap();
        renderer.clear(Color::new(10, 20, 30)).unwrap();
        renderer.present().unwrap();

        let frame = backend.last_frame().unwrap();
        assert_eq!(frame.count(Color::new(10, 20, 30)), 16);
    }

    #[test]
    fn test_events_then_quit_after_limit() {
        let mut backend = HeadlessBackend::new().with_quit_after(1);
        backend.push_event(Event::Other);
        assert_eq!(backend.poll_event(), Some(Event::Other));
        assert_eq!(backend.poll_event(), None);

        let window = backend.create_window("test", 2, 2).unwrap();
        let mut renderer = backend.create_renderer(&window).unwrap();
        renderer.present().unwrap();

        assert_eq!(backend.frames_presented(), 1);
        assert_eq!(backend.poll_event(), Some(Event::Quit));
    }

    #[test]
    fn test_oversized_canvas_fails_renderer_creation() {
        let mut backend = HeadlessBackend::new();
        for (width, height) in [(70_000, 70_000), (u32::MAX, u32::MAX), (MAX_CANVAS_SIDE + 1, 1)] {
            let window = backend.create_window("huge", width, height).unwrap();
            assert!(matches!(
                backend.create_renderer(&window),
                Err(ShellError::RendererCreation(_))
            ));
        }
    }

    #[test]
    fn test_largest_side_indexes_in_bounds() {
        let mut frame = Framebuffer::new(MAX_CANVAS_SIDE, 2).unwrap();
        frame
            .draw_iter([Pixel(Point::new(MAX_CANVAS_SIDE as i32 - 1, 1), Rgb888::WHITE)])
            .unwrap();
        assert_eq!(frame.pixel(MAX_CANVAS_SIDE - 1, 1), Some(Rgb888::WHITE));
        assert_eq!(frame.pixel(MAX_CANVAS_SIDE, 1), None);
        assert_eq!(frame.count(Color::WHITE), 1);
    }

    #[test]
    fn test_zero_sized_window_fails() {
        let mut backend = HeadlessBackend::new();
        assert!(matches!(
            backend.create_window("test", 0, 600),
            Err(ShellError::WindowCreation(_))
        ));
    }
}
