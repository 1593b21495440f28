//! View panels: each renders one rectangular region of the page.
//!
//! Panels are pure functions of (data, layout): they take the current
//! record set, a starting row, and the terminal width, draw through
//! the compositor, and return the first row below what they drew.
//! The controller stacks them top to bottom without hard-coded
//! coordinates.

use std::io::{self, Write};

use crossterm::style::Stylize;

use crate::data::{Entry, EntryLog, TempStats};

use super::screen::{center_text, Screen};
use super::theme::Theme;

/// Standard panel width cap (stats, recent, menu, prompts).
pub const PANEL_WIDTH: u16 = 60;
/// Wider cap used by the full listing.
pub const LISTING_WIDTH: u16 = 70;
/// Entries shown in the recent-entries panel.
pub const RECENT_ENTRIES: usize = 5;

/// Horizontal placement of a centered panel: (left column, width).
pub fn panel_geometry(term_width: u16, cap: u16) -> (u16, u16) {
    let width = cap.min(term_width.saturating_sub(4)).max(2);
    let x = (term_width.saturating_sub(width)) / 2;
    (x.max(1), width)
}

/// Draw the application header on rows 1-2.
pub fn draw_header<W: Write>(
    screen: &mut Screen<W>,
    term_width: u16,
    theme: &Theme,
) -> io::Result<()> {
    screen.move_to(1, 1)?;
    let title = "☀  WEATHER TRACKER"
        .with(theme.accent)
        .bold()
        .to_string();
    screen.print(&center_text(&title, term_width as usize))?;

    screen.move_to(1, 2)?;
    screen.print_colored(&"━".repeat(term_width as usize), theme.border)
}

/// Draw the statistics panel. Returns the next free row.
pub fn draw_stats_panel<W: Write>(
    screen: &mut Screen<W>,
    log: &EntryLog,
    start_y: u16,
    term_width: u16,
    theme: &Theme,
) -> io::Result<u16> {
    let (x, width) = panel_geometry(term_width, PANEL_WIDTH);
    screen.draw_box(x, start_y, width, 8, "Temperature Stats", theme)?;

    match TempStats::from_entries(log.entries()) {
        Some(stats) => {
            screen.put_colored(x + 4, start_y + 2, "Highest:", theme.text)?;
            screen.move_to(x + 13, start_y + 2)?;
            screen.print_bold(&format!("{:>6.1}°", stats.high), theme.hot)?;

            screen.put_colored(x + 4, start_y + 3, "Lowest:", theme.text)?;
            screen.move_to(x + 13, start_y + 3)?;
            screen.print_bold(&format!("{:>6.1}°", stats.low), theme.cold)?;

            screen.put_colored(x + 4, start_y + 4, "Average:", theme.text)?;
            screen.move_to(x + 13, start_y + 4)?;
            screen.print_bold(&format!("{:>6.1}°", stats.avg), theme.highlight)?;

            screen.put_colored(
                x + 4,
                start_y + 6,
                &format!("Total entries: {}", log.len()),
                theme.border,
            )?;

            if stats.high != stats.low && width > 30 {
                let bar_width = (width - 30) as usize;
                screen.put_colored(x + 22, start_y + 2, &"█".repeat(bar_width), theme.hot)?;
                // The low bar is a fixed single cell: its value sits at
                // ratio 0 of its own scale, so any proportional length
                // would be empty. One cell keeps the row visible.
                screen.put_colored(x + 22, start_y + 3, "█", theme.cold)?;
                let avg_cells = avg_bar_cells(&stats, bar_width);
                screen.put_colored(x + 22, start_y + 4, &"█".repeat(avg_cells), theme.highlight)?;
            }
        }
        None => {
            screen.put_colored(
                x + 4,
                start_y + 3,
                "No data available. Add your first entry!",
                theme.dim,
            )?;
        }
    }

    Ok(start_y + 9)
}

/// Cells of the average bar: proportional position of the average
/// between low and high, clamped to [1, bar_width].
fn avg_bar_cells(stats: &TempStats, bar_width: usize) -> usize {
    let ratio = (stats.avg - stats.low) / (stats.high - stats.low);
    let cells = (ratio * bar_width as f64) as usize;
    cells.clamp(1, bar_width)
}

/// Draw the recent-entries panel. Returns the next free row.
pub fn draw_recent_entries<W: Write>(
    screen: &mut Screen<W>,
    log: &EntryLog,
    start_y: u16,
    term_width: u16,
    theme: &Theme,
) -> io::Result<u16> {
    let (x, width) = panel_geometry(term_width, PANEL_WIDTH);
    let height = ((RECENT_ENTRIES + 4) as u16).min(10);
    screen.draw_box(x, start_y, width, height, "Recent Entries", theme)?;

    if log.is_empty() {
        screen.put_colored(x + 4, start_y + 2, "No entries yet", theme.dim)?;
    } else {
        for (i, entry) in log.sorted_desc().iter().take(RECENT_ENTRIES).enumerate() {
            screen.move_to(x + 4, start_y + 2 + i as u16)?;
            screen.print_colored(&entry.date, theme.border)?;
            screen.print_colored(
                &format!("  {:>6.1}°", entry.temp),
                theme.band_color(entry.band()),
            )?;
        }
    }

    Ok(start_y + height + 1)
}

/// Draw the main menu. Returns the next free row.
pub fn draw_menu<W: Write>(
    screen: &mut Screen<W>,
    start_y: u16,
    term_width: u16,
    theme: &Theme,
) -> io::Result<u16> {
    let (x, width) = panel_geometry(term_width, PANEL_WIDTH);

    screen.move_to(x, start_y)?;
    screen.print_colored(&"─".repeat(width as usize), theme.border)?;

    let items = [
        ("A", "Add new entry"),
        ("V", "View all entries"),
        ("D", "Delete entry"),
        ("Q", "Quit"),
    ];
    for (i, (key, label)) in items.iter().enumerate() {
        screen.move_to(x, start_y + 2 + i as u16)?;
        screen.print("  ")?;
        screen.print_colored(&format!("[{key}]"), theme.accent)?;
        screen.print_colored(&format!(" {label}"), theme.text)?;
    }

    Ok(start_y + 7)
}

/// Page arithmetic for the full listing.
///
/// Page size is clamped to at least one entry so short terminals
/// never divide by zero; the page index clamps at both ends, so
/// navigating past either edge is a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    total: usize,
    page_size: usize,
    page: usize,
}

impl Pager {
    pub fn new(total: usize, page_size: usize) -> Self {
        Pager {
            total,
            page_size: page_size.max(1),
            page: 0,
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Current page, 0-indexed.
    pub fn page(&self) -> usize {
        self.page
    }

    pub fn total_pages(&self) -> usize {
        self.total.div_ceil(self.page_size).max(1)
    }

    pub fn next(&mut self) {
        if self.page + 1 < self.total_pages() {
            self.page += 1;
        }
    }

    pub fn prev(&mut self) {
        self.page = self.page.saturating_sub(1);
    }

    /// Index range of the entries on the current page.
    pub fn range(&self) -> std::ops::Range<usize> {
        let start = self.page * self.page_size;
        let end = (start + self.page_size).min(self.total);
        start..end
    }
}

/// Draw one page of the full listing. The caller owns the
/// next/previous/back loop; this only renders the current page.
pub fn draw_listing_page<W: Write>(
    screen: &mut Screen<W>,
    sorted: &[&Entry],
    pager: &Pager,
    term_width: u16,
    theme: &Theme,
) -> io::Result<()> {
    let (x, width) = panel_geometry(term_width, LISTING_WIDTH);
    let page_rows = pager.page_size() as u16;

    screen.draw_box(
        x,
        4,
        width,
        page_rows + 4,
        &format!("All Entries (Page {}/{})", pager.page() + 1, pager.total_pages()),
        theme,
    )?;

    for (i, entry) in sorted[pager.range()].iter().enumerate() {
        screen.move_to(x + 4, 6 + i as u16)?;
        screen.print_colored(&entry.date, theme.border)?;
        screen.print_colored(
            &format!("  {:>7.1}°", entry.temp),
            theme.band_color(entry.band()),
        )?;
    }

    screen.move_to(x, page_rows + 9)?;
    screen.print_colored("  [N] Next  [P] Previous  [Q] Back", theme.border)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Entry;

    #[test]
    fn test_panel_geometry_caps_and_centers() {
        let (x, w) = panel_geometry(100, 60);
        assert_eq!(w, 60);
        assert_eq!(x, 20);

        // Narrow terminal: panel shrinks to width - 4.
        let (_, w) = panel_geometry(50, 60);
        assert_eq!(w, 46);
    }

    #[test]
    fn test_pager_total_pages_is_ceiling() {
        assert_eq!(Pager::new(10, 4).total_pages(), 3);
        assert_eq!(Pager::new(8, 4).total_pages(), 2);
        assert_eq!(Pager::new(0, 4).total_pages(), 1);
        assert_eq!(Pager::new(3, 4).total_pages(), 1);
    }

    #[test]
    fn test_pager_clamps_at_edges() {
        let mut pager = Pager::new(10, 4);
        pager.prev();
        assert_eq!(pager.page(), 0);
        pager.next();
        pager.next();
        assert_eq!(pager.page(), 2);
        pager.next();
        assert_eq!(pager.page(), 2);
    }

    #[test]
    fn test_pager_zero_page_size_is_clamped() {
        let pager = Pager::new(5, 0);
        assert_eq!(pager.page_size(), 1);
        assert_eq!(pager.total_pages(), 5);
    }

    #[test]
    fn test_pager_range_last_page_is_partial() {
        let mut pager = Pager::new(10, 4);
        pager.next();
        pager.next();
        assert_eq!(pager.range(), 8..10);
    }

    #[test]
    fn test_avg_bar_clamps_to_one_cell() {
        let stats = TempStats {
            high: 100.0,
            low: 0.0,
            avg: 0.1,
        };
        assert_eq!(avg_bar_cells(&stats, 30), 1);
        let stats = TempStats {
            high: 100.0,
            low: 0.0,
            avg: 50.0,
        };
        assert_eq!(avg_bar_cells(&stats, 30), 15);
    }

    #[test]
    fn test_stats_panel_empty_state_message() {
        let mut screen = Screen::new(Vec::new(), false);
        let theme = Theme::default();
        let log = EntryLog::default();
        let next = draw_stats_panel(&mut screen, &log, 4, 80, &theme).unwrap();
        screen.flush().unwrap();
        assert_eq!(next, 13);
        let output = screen_output(screen);
        assert!(output.contains("No data available"));
    }

    #[test]
    fn test_recent_entries_shows_latest_five() {
        let mut screen = Screen::new(Vec::new(), false);
        let theme = Theme::default();
        let log = EntryLog::new(
            (1..=7)
                .map(|d| Entry::new(format!("2024-01-{d:02}"), d as f64))
                .collect(),
        );
        draw_recent_entries(&mut screen, &log, 4, 80, &theme).unwrap();
        screen.flush().unwrap();
        let output = screen_output(screen);
        assert!(output.contains("2024-01-07"));
        assert!(output.contains("2024-01-03"));
        assert!(!output.contains("2024-01-02"));
    }

    fn screen_output(screen: Screen<Vec<u8>>) -> String {
        String::from_utf8(screen.into_inner()).unwrap()
    }
}
