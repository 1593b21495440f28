//! Line input on top of raw-mode key events.
//!
//! Every prompt in the application reads exactly one line: printable
//! characters echo at the cursor as typed, Backspace edits, Enter
//! submits the trimmed buffer. Ctrl-C and Ctrl-D surface as a
//! distinct interruption signal so the controller can unwind to its
//! shutdown path from any prompt.

use std::io::{self, Write};

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};

use super::screen::Screen;

/// Outcome of reading one prompt line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineInput {
    /// A submitted line, surrounding whitespace already trimmed.
    Line(String),
    /// Ctrl-C / Ctrl-D: the user asked to abort.
    Interrupted,
}

/// Read one line of input, echoing at the current cursor position.
pub fn read_line<W: Write>(screen: &mut Screen<W>) -> io::Result<LineInput> {
    let mut buffer = String::new();
    screen.flush()?;

    loop {
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind == KeyEventKind::Release {
            continue;
        }

        match key.code {
            KeyCode::Char('c') | KeyCode::Char('d')
                if key.modifiers.contains(KeyModifiers::CONTROL) =>
            {
                return Ok(LineInput::Interrupted);
            }
            KeyCode::Enter => {
                return Ok(LineInput::Line(buffer.trim().to_string()));
            }
            KeyCode::Backspace => {
                if buffer.pop().is_some() {
                    screen.print("\x08 \x08")?;
                    screen.flush()?;
                }
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                buffer.push(c);
                let mut echo = [0u8; 4];
                screen.print(c.encode_utf8(&mut echo))?;
                screen.flush()?;
            }
            _ => {}
        }
    }
}

/// Block until any key press (the "press any key to continue" prompt).
///
/// Ctrl-C / Ctrl-D still surface as [`LineInput::Interrupted`]; every
/// other key reports as an empty line.
pub fn wait_for_key() -> io::Result<LineInput> {
    loop {
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind == KeyEventKind::Release {
            continue;
        }
        if matches!(key.code, KeyCode::Char('c') | KeyCode::Char('d'))
            && key.modifiers.contains(KeyModifiers::CONTROL)
        {
            return Ok(LineInput::Interrupted);
        }
        return Ok(LineInput::Line(String::new()));
    }
}
