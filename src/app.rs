//! Main application state and the interactive control loop.
//!
//! The controller owns the record set for the process lifetime:
//! `Loading -> MainMenu <-> {AddFlow, ViewFlow, DeleteFlow} ->
//! Terminated`. Every mutation persists the whole store before the
//! next redraw, and every exit path, clean or interrupted, restores
//! the terminal.

use std::io::{self, Write};
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use crossterm::{
    cursor::Show,
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, size, EnterAlternateScreen, LeaveAlternateScreen,
    },
};

use crate::cli::AppConfig;
use crate::data::{EntryLog, Store, TempStats};
use crate::ui::{
    input::{read_line, wait_for_key, LineInput},
    panels::{self, Pager},
    screen::{center_text, Screen},
    Theme,
};

/// Frames of the startup spinner.
const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
/// How long warnings and inline errors stay on screen.
const NOTICE_PAUSE: Duration = Duration::from_millis(1500);
/// Pause after a successful add, so the animated average can be read.
const ADD_PAUSE: Duration = Duration::from_millis(1000);

/// What a flow tells the main loop to do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    /// Back to the main menu.
    Menu,
    /// Shut down (quit command or interruption).
    Quit,
}

/// Application state: record set, persistence, and the screen.
struct App {
    theme: Theme,
    store: Store,
    log: EntryLog,
    screen: Screen<io::Stdout>,
}

impl App {
    fn new(config: AppConfig) -> Self {
        let store = Store::new(config.data_file);
        let screen = Screen::new(io::stdout(), config.animate);
        App {
            theme: Theme::default(),
            store,
            log: EntryLog::default(),
            screen,
        }
    }

    /// Startup animation, then the initial load from disk.
    fn loading(&mut self) -> Result<()> {
        let (width, height) = size().context("Failed to read terminal size")?;
        let center_y = height / 2;
        let title = "☀  WEATHER TRACKER";

        self.screen.hide_cursor()?;
        if self.screen.animates() {
            for i in 0..15 {
                let frame = SPINNER_FRAMES[i % SPINNER_FRAMES.len()];
                self.screen.clear()?;
                self.screen.move_to(1, center_y)?;
                let text = center_text(
                    &format!("{frame} Loading Weather Tracker..."),
                    width as usize,
                );
                self.screen.print_colored(&text, self.theme.accent)?;
                self.screen.flush()?;
                self.screen.pause(Duration::from_millis(100));
            }
        }

        self.screen.clear()?;
        self.screen.move_to(1, center_y)?;
        self.screen
            .print_bold(&center_text(title, width as usize), self.theme.accent)?;
        self.screen.flush()?;
        self.screen.pause(Duration::from_millis(300));

        self.log = EntryLog::new(self.store.load());
        Ok(())
    }

    /// Main menu loop. Returns once the user quits or interrupts.
    fn main_loop(&mut self) -> Result<()> {
        loop {
            // Terminal may have been resized since the last iteration.
            let (width, _) = size().context("Failed to read terminal size")?;

            self.screen.hide_cursor()?;
            self.screen.clear()?;
            panels::draw_header(&mut self.screen, width, &self.theme)?;
            let next_y =
                panels::draw_stats_panel(&mut self.screen, &self.log, 4, width, &self.theme)?;
            let next_y =
                panels::draw_recent_entries(&mut self.screen, &self.log, next_y, width, &self.theme)?;
            let menu_y = panels::draw_menu(&mut self.screen, next_y, width, &self.theme)?;

            let (x, _) = panels::panel_geometry(width, panels::PANEL_WIDTH);
            self.screen.move_to(x, menu_y + 1)?;
            self.screen.print_colored("❯ ", self.theme.accent)?;
            self.screen.show_cursor()?;

            let command = match read_line(&mut self.screen)? {
                LineInput::Line(line) => line.to_lowercase(),
                LineInput::Interrupted => return Ok(()),
            };

            let flow = match command.as_str() {
                "a" => self.add_flow()?,
                "v" => self.view_flow()?,
                "d" => self.delete_flow()?,
                "q" => Flow::Quit,
                // Unknown commands just redraw the menu.
                _ => Flow::Menu,
            };
            if flow == Flow::Quit {
                return Ok(());
            }
        }
    }

    /// Redraw the header on a cleared screen and return the terminal
    /// width; flows start from this blank page.
    fn fresh_page(&mut self) -> Result<u16> {
        let (width, _) = size().context("Failed to read terminal size")?;
        self.screen.clear()?;
        panels::draw_header(&mut self.screen, width, &self.theme)?;
        Ok(width)
    }

    /// Date prompt: blank means today, malformed input falls back to
    /// today with a visible warning.
    fn pick_date(&mut self) -> Result<Option<String>> {
        let width = self.fresh_page()?;
        let (x, panel_width) = panels::panel_geometry(width, panels::PANEL_WIDTH);
        let today = Local::now().format("%Y-%m-%d").to_string();

        self.screen
            .draw_box(x, 4, panel_width, 12, "Select Date", &self.theme)?;
        self.screen.put_colored(
            x + 4,
            6,
            "Type a date, or press Enter for today",
            self.theme.border,
        )?;
        self.screen
            .put_colored(x + 4, 8, "Format: YYYY-MM-DD", self.theme.text)?;
        self.screen
            .put_colored(x + 4, 10, &format!("Today: {today}"), self.theme.cold)?;
        self.screen
            .put_colored(x + 4, 12, "Enter date (or press Enter for today): ", self.theme.accent)?;
        self.screen.show_cursor()?;

        let input = match read_line(&mut self.screen)? {
            LineInput::Line(line) => line,
            LineInput::Interrupted => return Ok(None),
        };

        let (date, warn) = resolve_date_input(&input, &today);
        if warn {
            self.screen.put_colored(
                x + 4,
                14,
                "Invalid date format! Using today's date.",
                self.theme.warn,
            )?;
            self.screen.flush()?;
            self.screen.pause(NOTICE_PAUSE);
        }
        Ok(Some(date))
    }

    /// Add flow: pick a date, read a temperature, upsert + persist,
    /// then animate the average from its old value to its new one.
    fn add_flow(&mut self) -> Result<Flow> {
        let Some(date) = self.pick_date()? else {
            return Ok(Flow::Quit);
        };

        let width = self.fresh_page()?;
        let (x, panel_width) = panels::panel_geometry(width, panels::PANEL_WIDTH);

        self.screen
            .draw_box(x, 4, panel_width, 8, "Add Temperature", &self.theme)?;
        self.screen.move_to(x + 4, 6)?;
        self.screen.print_colored("Date: ", self.theme.text)?;
        self.screen.print_colored(&date, self.theme.cold)?;
        self.screen
            .put_colored(x + 4, 8, "Enter temperature (°C): ", self.theme.accent)?;
        self.screen.show_cursor()?;

        let input = match read_line(&mut self.screen)? {
            LineInput::Line(line) => line,
            LineInput::Interrupted => return Ok(Flow::Quit),
        };

        let Ok(temp) = input.parse::<f64>() else {
            // Aborted add: nothing was mutated, nothing is saved.
            self.screen
                .put_colored(x + 4, 10, "Invalid temperature!", self.theme.warn)?;
            self.screen.flush()?;
            self.screen.pause(NOTICE_PAUSE);
            return Ok(Flow::Menu);
        };

        // The average of a previously-empty store is defined as the
        // incoming temperature, so the animation starts flat.
        let old_avg = TempStats::from_entries(self.log.entries())
            .map(|s| s.avg)
            .unwrap_or(temp);

        let updated = self.log.upsert(&date, temp);
        if updated {
            self.screen
                .put_colored(x + 4, 10, "Updated existing entry", self.theme.highlight)?;
        } else {
            self.screen
                .put_colored(x + 4, 10, "Entry added!", self.theme.mild)?;
        }

        self.store
            .save(self.log.entries())
            .context("Failed to persist records")?;

        let new_avg = TempStats::from_entries(self.log.entries())
            .map(|s| s.avg)
            .unwrap_or(temp);

        self.screen.hide_cursor()?;
        self.screen
            .put_colored(x + 4, 11, "Average updating...", self.theme.text)?;
        self.screen.flush()?;
        self.screen.animate_value(
            old_avg,
            new_avg,
            x + 4,
            11,
            Duration::from_millis(800),
            "New Average: ",
            "°",
            self.theme.highlight,
        )?;
        self.screen.pause(ADD_PAUSE);

        Ok(Flow::Menu)
    }

    /// View flow: paginated listing until `q` (or interruption).
    fn view_flow(&mut self) -> Result<Flow> {
        if self.log.is_empty() {
            let _ = self.fresh_page()?;
            self.screen.hide_cursor()?;
            self.screen
                .put_colored(4, 5, "No entries to display", self.theme.dim)?;
            self.screen
                .put_colored(4, 7, "Press any key to continue...", self.theme.border)?;
            self.screen.flush()?;
            return match wait_for_key()? {
                LineInput::Interrupted => Ok(Flow::Quit),
                LineInput::Line(_) => Ok(Flow::Menu),
            };
        }

        let (_, height) = size().context("Failed to read terminal size")?;
        let mut pager = Pager::new(self.log.len(), height.saturating_sub(10) as usize);

        loop {
            let width = self.fresh_page()?;
            let sorted = self.log.sorted_desc();
            panels::draw_listing_page(&mut self.screen, &sorted, &pager, width, &self.theme)?;
            self.screen.show_cursor()?;

            let command = match read_line(&mut self.screen)? {
                LineInput::Line(line) => line.to_lowercase(),
                LineInput::Interrupted => return Ok(Flow::Quit),
            };
            match command.as_str() {
                "n" => pager.next(),
                "p" => pager.prev(),
                "q" => return Ok(Flow::Menu),
                _ => {}
            }
        }
    }

    /// Delete flow: exact-match removal by date string.
    fn delete_flow(&mut self) -> Result<Flow> {
        if self.log.is_empty() {
            let _ = self.fresh_page()?;
            self.screen.hide_cursor()?;
            self.screen
                .put_colored(4, 5, "No entries to delete", self.theme.dim)?;
            self.screen.flush()?;
            self.screen.pause(NOTICE_PAUSE);
            return Ok(Flow::Menu);
        }

        let width = self.fresh_page()?;
        let (x, panel_width) = panels::panel_geometry(width, panels::PANEL_WIDTH);

        self.screen
            .draw_box(x, 4, panel_width, 6, "Delete Entry", &self.theme)?;
        self.screen.put_colored(
            x + 4,
            6,
            "Enter date to delete (YYYY-MM-DD): ",
            self.theme.accent,
        )?;
        self.screen.show_cursor()?;

        let date = match read_line(&mut self.screen)? {
            LineInput::Line(line) => line,
            LineInput::Interrupted => return Ok(Flow::Quit),
        };

        let removed = self.log.remove(&date);
        if removed > 0 {
            self.store
                .save(self.log.entries())
                .context("Failed to persist records")?;
            self.screen
                .put_colored(x + 4, 8, "Entry deleted!", self.theme.mild)?;
        } else {
            // Not found: no mutation happened, so nothing to save.
            self.screen
                .put_colored(x + 4, 8, "Entry not found", self.theme.warn)?;
        }
        self.screen.flush()?;
        self.screen.pause(NOTICE_PAUSE);

        Ok(Flow::Menu)
    }
}

/// Resolve the date prompt input: blank means today, anything that is
/// not a valid `YYYY-MM-DD` date falls back to today. The second
/// value is true when the fallback deserves a visible warning.
fn resolve_date_input(input: &str, today: &str) -> (String, bool) {
    if input.is_empty() {
        return (today.to_string(), false);
    }
    if NaiveDate::parse_from_str(input, "%Y-%m-%d").is_ok() {
        (input.to_string(), false)
    } else {
        (today.to_string(), true)
    }
}

/// Restore terminal to normal state.
///
/// Best effort: this runs on every exit path, including errors, so
/// the cursor is never left hidden.
fn restore_terminal() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen, Show);
}

/// Run the application.
pub fn run(config: AppConfig) -> Result<()> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
        restore_terminal();
        return Err(e).context("Failed to enter alternate screen");
    }

    let mut app = App::new(config);
    let mut result = app.loading();
    if result.is_ok() {
        result = app.main_loop();
    }

    restore_terminal();
    if result.is_ok() {
        let accent = Theme::default().accent;
        let mut out = io::stdout();
        let _ = execute!(out, crossterm::style::SetForegroundColor(accent));
        let _ = writeln!(out, "Goodbye! ☀");
        let _ = execute!(out, crossterm::style::ResetColor);
    }
    result
}
