//! Screen compositor: absolute-position drawing primitives.
//!
//! Everything here draws at explicit 1-indexed (x, y) terminal
//! coordinates, origin top-left, queued onto a generic writer and
//! flushed explicitly. Panels and flows compose these primitives;
//! nothing in this module knows about records or application state.

use std::io::{self, Write};
use std::thread;
use std::time::Duration;

use crossterm::{
    cursor::{Hide, MoveTo, Show},
    queue,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
    terminal::{Clear, ClearType},
};

use super::theme::Theme;

/// Number of discrete frames in a value animation.
const ANIMATION_STEPS: u32 = 20;

/// Length of `text` as it will appear on screen, with SGR escape
/// sequences (`ESC [ ... m`) excluded.
pub fn visible_width(text: &str) -> usize {
    let mut width = 0;
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\x1b' && chars.peek() == Some(&'[') {
            chars.next();
            for esc in chars.by_ref() {
                if esc == 'm' {
                    break;
                }
            }
        } else {
            width += 1;
        }
    }
    width
}

/// Left-pad `text` so its visible content is centered in `width`
/// columns. Styling markers do not count toward the centering math.
pub fn center_text(text: &str, width: usize) -> String {
    let padding = width.saturating_sub(visible_width(text)) / 2;
    format!("{}{}", " ".repeat(padding), text)
}

/// Drawing surface over a terminal writer.
///
/// Commands are queued and only hit the terminal on [`flush`](Screen::flush);
/// animations flush once per frame.
pub struct Screen<W: Write> {
    out: W,
    /// When false, animations and pauses collapse to their final frame.
    animate: bool,
}

impl<W: Write> Screen<W> {
    pub fn new(out: W, animate: bool) -> Self {
        Screen { out, animate }
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }

    /// Consume the screen and return the underlying writer.
    #[allow(dead_code)] // Used in tests
    pub fn into_inner(self) -> W {
        self.out
    }

    /// Whether cosmetic animations are enabled.
    pub fn animates(&self) -> bool {
        self.animate
    }

    pub fn clear(&mut self) -> io::Result<()> {
        queue!(self.out, Clear(ClearType::All))
    }

    /// Move the cursor to 1-indexed (x, y).
    pub fn move_to(&mut self, x: u16, y: u16) -> io::Result<()> {
        queue!(self.out, MoveTo(x.saturating_sub(1), y.saturating_sub(1)))
    }

    pub fn hide_cursor(&mut self) -> io::Result<()> {
        queue!(self.out, Hide)
    }

    pub fn show_cursor(&mut self) -> io::Result<()> {
        queue!(self.out, Show)
    }

    pub fn print(&mut self, text: &str) -> io::Result<()> {
        queue!(self.out, Print(text))
    }

    pub fn print_colored(&mut self, text: &str, color: Color) -> io::Result<()> {
        queue!(
            self.out,
            SetForegroundColor(color),
            Print(text),
            ResetColor
        )
    }

    pub fn print_bold(&mut self, text: &str, color: Color) -> io::Result<()> {
        queue!(
            self.out,
            SetForegroundColor(color),
            SetAttribute(Attribute::Bold),
            Print(text),
            SetAttribute(Attribute::Reset),
            ResetColor
        )
    }

    /// Print `text` at (x, y) with the given color.
    pub fn put_colored(&mut self, x: u16, y: u16, text: &str, color: Color) -> io::Result<()> {
        self.move_to(x, y)?;
        self.print_colored(text, color)
    }

    /// Draw a rounded box of `width` x `height` cells with its top-left
    /// corner at (x, y). A non-empty title is embedded in the top
    /// border as `┤ Title ├`, starting two cells in.
    pub fn draw_box(
        &mut self,
        x: u16,
        y: u16,
        width: u16,
        height: u16,
        title: &str,
        theme: &Theme,
    ) -> io::Result<()> {
        if width < 2 || height < 2 {
            return Ok(());
        }
        let inner = (width - 2) as usize;

        self.move_to(x, y)?;
        self.print_colored(&format!("╭{}╮", "─".repeat(inner)), theme.border)?;

        if !title.is_empty() {
            self.move_to(x + 2, y)?;
            self.print_colored("┤ ", theme.border)?;
            self.print_bold(title, theme.accent)?;
            self.print_colored(" ├", theme.border)?;
        }

        for row in 1..height - 1 {
            self.move_to(x, y + row)?;
            self.print_colored(&format!("│{}│", " ".repeat(inner)), theme.border)?;
        }

        self.move_to(x, y + height - 1)?;
        self.print_colored(&format!("╰{}╯", "─".repeat(inner)), theme.border)
    }

    /// Block for `duration` only when animations are enabled.
    pub fn pause(&mut self, duration: Duration) {
        if self.animate {
            thread::sleep(duration);
        }
    }

    /// Animate a numeric readout from `start` to `end` at (x, y).
    ///
    /// Redraws the same cell in `ANIMATION_STEPS` linear steps over
    /// `duration`, flushing each frame; the last frame always shows
    /// exactly `end`. Purely cosmetic feedback, blocking by design.
    /// With animations disabled only the final frame is drawn.
    #[allow(clippy::too_many_arguments)]
    pub fn animate_value(
        &mut self,
        start: f64,
        end: f64,
        x: u16,
        y: u16,
        duration: Duration,
        prefix: &str,
        suffix: &str,
        color: Color,
    ) -> io::Result<()> {
        let steps = if self.animate { ANIMATION_STEPS } else { 0 };
        let delay = duration / (steps + 1);
        for step in 0..=steps {
            let current = interpolate(start, end, step, steps);
            self.move_to(x, y)?;
            // Trailing spaces paint over stale digits from the previous frame.
            self.print_bold(&format!("{prefix}{current:.1}{suffix}    "), color)?;
            self.flush()?;
            if step < steps {
                thread::sleep(delay);
            }
        }
        Ok(())
    }
}

/// Linear interpolation at `step` of `steps`; `steps == 0` jumps
/// straight to the end value.
fn interpolate(start: f64, end: f64, step: u32, steps: u32) -> f64 {
    if steps == 0 || step >= steps {
        return end;
    }
    start + (end - start) * (f64::from(step) / f64::from(steps))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visible_width_ignores_sgr() {
        assert_eq!(visible_width("plain"), 5);
        assert_eq!(visible_width("\x1b[38;5;208mplain\x1b[0m"), 5);
        assert_eq!(visible_width("\x1b[1m\x1b[31mab\x1b[0m"), 2);
    }

    #[test]
    fn test_center_text_pads_by_visible_length() {
        assert_eq!(center_text("ab", 6), "  ab");
        let styled = "\x1b[31mab\x1b[0m";
        assert_eq!(center_text(styled, 6), format!("  {styled}"));
    }

    #[test]
    fn test_center_text_wider_than_width() {
        assert_eq!(center_text("abcdef", 4), "abcdef");
    }

    #[test]
    fn test_interpolate_endpoints() {
        assert_eq!(interpolate(2.0, 10.0, 0, 20), 2.0);
        assert_eq!(interpolate(2.0, 10.0, 20, 20), 10.0);
        assert_eq!(interpolate(2.0, 10.0, 10, 20), 6.0);
        // Degenerate step count goes straight to the end value.
        assert_eq!(interpolate(2.0, 10.0, 0, 0), 10.0);
    }

    #[test]
    fn test_animate_final_frame_is_exact() {
        let mut screen = Screen::new(Vec::new(), false);
        screen
            .animate_value(
                1.0,
                2.5,
                1,
                1,
                Duration::from_millis(0),
                "Avg: ",
                "°",
                Color::Yellow,
            )
            .unwrap();
        let output = String::from_utf8(screen.out).unwrap();
        assert!(output.contains("Avg: 2.5°"));
        assert!(!output.contains("Avg: 1.0°"));
    }

    #[test]
    fn test_draw_box_box_glyphs() {
        let mut screen = Screen::new(Vec::new(), false);
        let theme = Theme::default();
        screen.draw_box(1, 1, 10, 4, "T", &theme).unwrap();
        screen.flush().unwrap();
        let output = String::from_utf8(screen.out).unwrap();
        assert!(output.contains('╭'));
        assert!(output.contains('╯'));
        assert!(output.contains("┤ "));
        assert!(output.contains('T'));
    }

    #[test]
    fn test_draw_box_degenerate_size_is_noop() {
        let mut screen = Screen::new(Vec::new(), false);
        let theme = Theme::default();
        screen.draw_box(1, 1, 1, 1, "", &theme).unwrap();
        screen.flush().unwrap();
        assert!(screen.out.is_empty());
    }
}
