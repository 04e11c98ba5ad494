//! On-screen backend built on OpenCV HighGUI.

use std::cell::Cell;
use std::rc::Rc;

use opencv::{
    core::{self, Mat, Scalar, CV_8UC3},
    highgui, imgproc,
    prelude::*,
};

use crate::shell::{Backend, Color, Event, Rect, Renderer, ShellError};

const KEY_ESCAPE: i32 = 27;

fn scalar(color: Color) -> Scalar {
    // OpenCV stores pixels as BGR
    Scalar::new(color.b as f64, color.g as f64, color.r as f64, 0.0)
}

fn draw_error(err: opencv::Error) -> ShellError {
    ShellError::Draw(err.to_string())
}

pub struct OpenCvWindow {
    name: String,
    width: u32,
    height: u32,
}

impl Drop for OpenCvWindow {
    fn drop(&mut self) {
        if let Err(e) = highgui::destroy_window(&self.name) {
            log::warn!("Failed to close window '{}': {}", self.name, e);
        }
    }
}

pub struct OpenCvRenderer {
    window_name: String,
    frame: Mat,
    shown: Rc<Cell<bool>>,
}

impl Renderer for OpenCvRenderer {
    fn clear(&mut self, color: Color) -> Result<(), ShellError> {
        let full = core::Rect::new(0, 0, self.frame.cols(), self.frame.rows());
        imgproc::rectangle(&mut self.frame, full, scalar(color), imgproc::FILLED, imgproc::LINE_8, 0)
            .map_err(draw_error)
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) -> Result<(), ShellError> {
        let rect = core::Rect::new(rect.x, rect.y, rect.width as i32, rect.height as i32);
        imgproc::rectangle(&mut self.frame, rect, scalar(color), imgproc::FILLED, imgproc::LINE_8, 0)
            .map_err(draw_error)
    }

    fn present(&mut self) -> Result<(), ShellError> {
        highgui::imshow(&self.window_name, &self.frame).map_err(draw_error)?;
        self.shown.set(true);
        Ok(())
    }
}

/// HighGUI window backend. `q`, Esc or closing the window quits.
#[derive(Default)]
pub struct OpenCvBackend {
    window_name: Option<String>,
    shown: Rc<Cell<bool>>,
}

impl OpenCvBackend {
    pub fn new() -> Self {
        Self::default()
    }

    fn window_closed(&self) -> bool {
        let Some(name) = self.window_name.as_deref() else {
            return false;
        };
        if !self.shown.get() {
            return false;
        }
        match highgui::get_window_property(name, highgui::WND_PROP_VISIBLE) {
            Ok(visible) => visible < 1.0,
            Err(e) => {
                log::debug!("Window property query failed: {}", e);
                true
            }
        }
    }
}

impl Backend for OpenCvBackend {
    type Window = OpenCvWindow;
    type Renderer = OpenCvRenderer;

    fn create_window(&mut self, title: &str, width: u32, height: u32) -> Result<Self::Window, ShellError> {
        highgui::named_window(title, highgui::WINDOW_AUTOSIZE)
            .map_err(|e| ShellError::WindowCreation(e.to_string()))?;
        log::info!("Opened window '{}' ({}x{})", title, width, height);

        self.window_name = Some(title.to_string());
        Ok(OpenCvWindow {
            name: title.to_string(),
            width,
            height,
        })
    }

    fn create_renderer(&mut self, window: &Self::Window) -> Result<Self::Renderer, ShellError> {
        let frame = Mat::new_rows_cols_with_default(
            window.height as i32,
            window.width as i32,
            CV_8UC3,
            scalar(Color::BLACK),
        )
        .map_err(|e| ShellError::RendererCreation(e.to_string()))?;

        Ok(OpenCvRenderer {
            window_name: window.name.clone(),
            frame,
            shown: Rc::clone(&self.shown),
        })
    }

    fn poll_event(&mut self) -> Option<Event> {
        if self.window_closed() {
            return Some(Event::Quit);
        }

        match highgui::poll_key() {
            Ok(key) if key == b'q' as i32 || key == KEY_ESCAPE => Some(Event::Quit),
            Ok(key) if key >= 0 => Some(Event::Other),
            Ok(_) => None,
            Err(e) => {
                log::warn!("Event polling failed: {}", e);
                None
            }
        }
    }
}
