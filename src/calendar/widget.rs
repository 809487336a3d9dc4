use super::grid::{DayCell, MonthGrid, DAYS_IN_WEEK};
use crate::theme::{BASE_STYLE, HOLIDAY_STYLE, HINT_STYLE, WEEKDAY_STYLE};
use ratatui::{prelude::*, widgets::*};

static WEEKDAY_NAMES: [&str; DAYS_IN_WEEK] = ["Seg", "Ter", "Qua", "Qui", "Sex", "Sáb", "Dom"];

/// Number of lines taken up by the header and its rule
const HEADER_LINES: u16 = 2;

/// Fewest lines a week is allowed to take: one for the day number and
/// holiday, one for the day's text
const MIN_WEEK_LINES: u16 = 2;

/// Columns taken up by the day number, including its brackets or padding
const DAY_NUMBER_WIDTH: u16 = 4;

const ACS_HLINE: char = '─';

/// Month calendar with one column per weekday (Monday first).  Each day shows
/// its number, the name of the holiday falling on it, and its entry.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct MonthView<'a> {
    grid: &'a MonthGrid,
    today: Option<u8>,
    cursor: Option<u8>,
    cursor_style: Style,
}

impl<'a> MonthView<'a> {
    pub(crate) fn new(grid: &'a MonthGrid) -> Self {
        MonthView {
            grid,
            today: None,
            cursor: None,
            cursor_style: Style::new(),
        }
    }

    /// Mark `day` as the current date, drawn as `[dd]`
    pub(crate) fn today(mut self, day: Option<u8>) -> Self {
        self.today = day;
        self
    }

    /// Draw the entry of `day` with `style`
    pub(crate) fn cursor(mut self, day: Option<u8>, style: Style) -> Self {
        self.cursor = day;
        self.cursor_style = style;
        self
    }

    fn week_lines(&self, height: u16) -> u16 {
        let weeks = u16::try_from(self.grid.week_count()).unwrap_or(u16::MAX).max(1);
        (height.saturating_sub(HEADER_LINES) / weeks).max(MIN_WEEK_LINES)
    }
}

impl Widget for MonthView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let col_width = area.width / 7;
        let week_lines = self.week_lines(area.height);
        let mut canvas = BufferCanvas::new(area, buf);
        canvas.draw_header(col_width);
        for (row, week) in std::iter::zip(0u16.., self.grid.weeks()) {
            let y = HEADER_LINES + row * week_lines;
            for (col, cell) in std::iter::zip(0u16.., week) {
                let Some(dc) = cell.as_day() else {
                    continue;
                };
                let x = col * col_width;
                canvas.draw_day_number(y, x, dc, self.today == Some(dc.day));
                if let Some(name) = dc.holiday {
                    canvas.mvprint(
                        y,
                        x + DAY_NUMBER_WIDTH,
                        name,
                        col_width.saturating_sub(DAY_NUMBER_WIDTH + 1),
                        HOLIDAY_STYLE,
                    );
                }
                let style = if self.cursor == Some(dc.day) {
                    self.cursor_style
                } else {
                    BASE_STYLE
                };
                canvas.draw_entry(y + 1, x, col_width, week_lines - 1, &dc.text, style);
            }
        }
    }
}

#[derive(Debug, Eq, PartialEq)]
struct BufferCanvas<'a> {
    area: Rect,
    buf: &'a mut Buffer,
}

impl<'a> BufferCanvas<'a> {
    fn new(area: Rect, buf: &'a mut Buffer) -> Self {
        Self { area, buf }
    }

    fn draw_header(&mut self, col_width: u16) {
        for (col, name) in std::iter::zip(0u16.., WEEKDAY_NAMES) {
            self.mvprint(0, col * col_width + 1, name, col_width, WEEKDAY_STYLE);
        }
        self.hline(1, 0, ACS_HLINE, col_width.saturating_mul(7));
    }

    fn draw_day_number(&mut self, y: u16, x: u16, dc: &DayCell, is_today: bool) {
        let s = if is_today {
            format!("[{:2}]", dc.day)
        } else {
            format!(" {:2} ", dc.day)
        };
        let style = if dc.holiday.is_some() {
            HOLIDAY_STYLE.add_modifier(Modifier::BOLD)
        } else {
            WEEKDAY_STYLE
        };
        self.mvprint(y, x, s, DAY_NUMBER_WIDTH, style);
    }

    // Wraps `text` onto up to `lines` lines of one cell, leaving a blank
    // column between neighboring cells.  An empty entry under the cursor is
    // drawn as a placeholder so that the cursor stays visible.
    fn draw_entry(&mut self, y: u16, x: u16, col_width: u16, lines: u16, text: &str, style: Style) {
        let width = col_width.saturating_sub(2).max(1);
        if text.is_empty() {
            if style != BASE_STYLE {
                self.mvprint(y, x + 1, "…", 1, style);
            }
            return;
        }
        let x = x + 1;
        if y >= self.area.height || x >= self.area.width {
            return;
        }
        let text = text.chars().filter(|c| !c.is_control()).collect::<String>();
        Paragraph::new(Text::styled(text, style))
            .wrap(Wrap { trim: false })
            .render(
                Rect {
                    x: x + self.area.x,
                    y: y + self.area.y,
                    width: (self.area.width - x).min(width),
                    height: (self.area.height - y).min(lines),
                },
                self.buf,
            );
    }

    fn mvprint<S: AsRef<str>>(&mut self, y: u16, x: u16, s: S, max_width: u16, style: Style) {
        if y < self.area.height && x < self.area.width {
            let text = Text::styled(s.as_ref(), style);
            let width = u16::try_from(text.width()).unwrap_or(u16::MAX);
            // Using a Paragraph lets us truncate text that extends beyond the
            // cell's area, though we need to be sure that the Rect passed to
            // the Paragraph is entirely within the frame lest a panic result.
            Paragraph::new(text).render(
                Rect {
                    x: x + self.area.x,
                    y: y + self.area.y,
                    width: (self.area.width - x).min(width).min(max_width),
                    height: 1,
                },
                self.buf,
            );
        }
    }

    fn hline(&mut self, y: u16, x: u16, ch: char, length: u16) {
        self.mvprint(y, x, String::from(ch).repeat(length.into()), length, HINT_STYLE);
    }
}
