use std::io;

use crate::color::Rgb;

/// Something a frame can be painted on. Coordinates and sizes are in pixels, with `(0, 0)` at the
/// top left.
pub trait Surface {
    /// Paint the whole surface with `color`.
    fn clear(&mut self, color: Rgb);

    /// Fill the `size` x `size` square whose top left corner is `(x, y)`.
    fn draw_cell(&mut self, x: u32, y: u32, size: u32, color: Rgb);

    /// Make everything drawn since the last `clear` visible.
    fn present(&mut self) -> io::Result<()>;

    /// Whether the user asked to quit since the last call.
    fn poll_quit(&mut self) -> io::Result<bool>;
}

/// An in-memory pixel buffer.
///
/// Drawing outside the buffer is clipped. Nothing is ever shown, so presenting only counts
/// frames, and quitting has to be requested with [`Framebuffer::request_quit`].
pub struct Framebuffer {
    /// Row-major pixels
    px: Vec<Rgb>,

    /// Width in pixels
    w: u32,

    /// Height in pixels
    h: u32,

    /// Number of presented frames
    frames: u64,

    quit: bool,
}

impl Framebuffer {
    pub fn new(w: u32, h: u32) -> Self {
        Self {
            px: vec![Rgb::new(0, 0, 0); w as usize * h as usize],
            w,
            h,
            frames: 0,
            quit: false,
        }
    }

    pub fn width(&self) -> u32 {
        self.w
    }

    pub fn height(&self) -> u32 {
        self.h
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb> {
        if x < self.w && y < self.h {
            Some(self.px[self.xy_from(x, y)])
        } else {
            None
        }
    }

    /// Make the next [`Surface::poll_quit`] report a quit.
    pub fn request_quit(&mut self) {
        self.quit = true;
    }

    fn xy_from(&self, x: u32, y: u32) -> usize {
        y as usize * self.w as usize + x as usize
    }
}

impl Surface for Framebuffer {
    fn clear(&mut self, color: Rgb) {
        self.px.fill(color);
    }

    fn draw_cell(&mut self, x: u32, y: u32, size: u32, color: Rgb) {
        let x1 = x.saturating_add(size).min(self.w);
        let y1 = y.saturating_add(size).min(self.h);

        for py in y..y1 {
            for px in x..x1 {
                let i = self.xy_from(px, py);
                self.px[i] = color;
            }
        }
    }

    fn present(&mut self) -> io::Result<()> {
        self.frames += 1;

        Ok(())
    }

    fn poll_quit(&mut self) -> io::Result<bool> {
        Ok(std::mem::take(&mut self.quit))
    }
}
