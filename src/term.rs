use std::io;
use std::io::Stdout;
use std::io::Write;
use std::time::Duration;

use crossterm::cursor;
use crossterm::event;
use crossterm::event::Event as CrossTermEvent;
use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use crossterm::event::KeyEventKind;
use crossterm::event::KeyModifiers;
use crossterm::execute;
use crossterm::queue;
use crossterm::style;
use crossterm::style::Color;
use crossterm::terminal;
use tracing::debug;

use crate::color::Rgb;
use crate::events::Event;
use crate::surface::Framebuffer;
use crate::surface::Surface;

pub const TITLE: &str = "John Conway's Game of Life";

/// Upper half block. The foreground paints the top pixel and the background the bottom one.
const HALF_BLOCK: char = '\u{2580}';

impl From<Rgb> for Color {
    fn from(c: Rgb) -> Self {
        Color::Rgb {
            r: c.r,
            g: c.g,
            b: c.b,
        }
    }
}

/// Converts a crossterm event into a simulation event
pub fn convert_event(event: CrossTermEvent) -> Option<Event> {
    match event {
        CrossTermEvent::Key(KeyEvent {
            kind: KeyEventKind::Release,
            ..
        }) => None,
        CrossTermEvent::Key(key_event) => match key_event {
            KeyEvent {
                code: KeyCode::Char('q') | KeyCode::Esc,
                ..
            }
            | KeyEvent {
                code: KeyCode::Char('c'),
                modifiers: KeyModifiers::CONTROL,
                ..
            } => Some(Event::Quit),
            _ => None,
        },
        CrossTermEvent::Resize(cols, rows) => Some(Event::Resize { cols, rows }),
        _ => None,
    }
}

/// A surface shown in the terminal.
///
/// Frames are drawn into a [`Framebuffer`] of the requested pixel size. Presenting scales that
/// canvas down to fit the terminal, keeping its aspect ratio, with every character cell showing
/// two pixels stacked vertically.
pub struct TerminalSurface {
    canvas: Framebuffer,
    stdout: Stdout,

    /// Terminal width in characters
    cols: u16,

    /// Terminal height in characters
    rows: u16,
}

impl TerminalSurface {
    /// Take over the terminal with a `w` x `h` pixel canvas. The terminal is restored on drop.
    pub fn create(w: u32, h: u32) -> io::Result<Self> {
        let (cols, rows) = terminal::size()?;

        terminal::enable_raw_mode()?;

        // From here on, dropping the surface restores the terminal
        let mut surface = Self {
            canvas: Framebuffer::new(w, h),
            stdout: io::stdout(),
            cols,
            rows,
        };

        execute!(
            surface.stdout,
            terminal::EnterAlternateScreen,
            terminal::SetTitle(TITLE),
            terminal::DisableLineWrap,
            cursor::Hide
        )?;

        debug!(w, h, cols, rows, "created terminal surface");

        Ok(surface)
    }

    /// Canvas pixels per terminal pixel, so that the whole canvas fits.
    fn scale(&self) -> f64 {
        let sx = self.canvas.width() as f64 / self.cols.max(1) as f64;
        let sy = self.canvas.height() as f64 / (2 * self.rows.max(1) as u32) as f64;

        sx.max(sy)
    }

    /// Color of the canvas at the center of terminal pixel `(tx, ty)`, if the canvas reaches it.
    fn sample(&self, tx: u16, ty: u32, scale: f64) -> Option<Rgb> {
        let x = ((tx as f64 + 0.5) * scale) as u32;
        let y = ((ty as f64 + 0.5) * scale) as u32;

        self.canvas.pixel(x, y)
    }

    fn render(&mut self) -> io::Result<()> {
        let scale = self.scale();

        queue!(self.stdout, terminal::BeginSynchronizedUpdate)?;

        for row in 0..self.rows {
            queue!(self.stdout, cursor::MoveTo(0, row))?;

            let mut last: Option<(Option<Rgb>, Option<Rgb>)> = None;
            for col in 0..self.cols {
                let top = self.sample(col, 2 * row as u32, scale);
                let bot = self.sample(col, 2 * row as u32 + 1, scale);

                if last != Some((top, bot)) {
                    let fg = top.map_or(Color::Reset, Color::from);
                    let bg = bot.map_or(Color::Reset, Color::from);
                    queue!(
                        self.stdout,
                        style::SetForegroundColor(fg),
                        style::SetBackgroundColor(bg)
                    )?;

                    last = Some((top, bot));
                }

                let ch = if top.is_some() || bot.is_some() { HALF_BLOCK } else { ' ' };
                queue!(self.stdout, style::Print(ch))?;
            }
        }

        queue!(
            self.stdout,
            style::ResetColor,
            terminal::EndSynchronizedUpdate
        )?;

        self.stdout.flush()
    }
}

impl Surface for TerminalSurface {
    fn clear(&mut self, color: Rgb) {
        self.canvas.clear(color);
    }

    fn draw_cell(&mut self, x: u32, y: u32, size: u32, color: Rgb) {
        self.canvas.draw_cell(x, y, size, color);
    }

    fn present(&mut self) -> io::Result<()> {
        self.render()?;
        self.canvas.present()
    }

    fn poll_quit(&mut self) -> io::Result<bool> {
        while event::poll(Duration::ZERO)? {
            match convert_event(event::read()?) {
                Some(Event::Quit) => return Ok(true),
                Some(Event::Resize { cols, rows }) => {
                    debug!(cols, rows, "terminal resized");

                    self.cols = cols;
                    self.rows = rows;
                    execute!(self.stdout, terminal::Clear(terminal::ClearType::All))?;
                }
                None => {}
            }
        }

        Ok(false)
    }
}

impl Drop for TerminalSurface {
    fn drop(&mut self) {
        let _ = execute!(
            self.stdout,
            style::ResetColor,
            terminal::EnableLineWrap,
            cursor::Show,
            terminal::LeaveAlternateScreen
        );
        let _ = terminal::disable_raw_mode();
    }
}
