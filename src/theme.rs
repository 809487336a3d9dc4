use ratatui::style::{Color, Modifier, Style};

pub(crate) const BASE_STYLE: Style = Style::new().fg(Color::White).bg(Color::Black);

pub(crate) const BANNER_STYLE: Style = Style::new()
    .fg(Color::LightCyan)
    .bg(Color::Black)
    .add_modifier(Modifier::BOLD);

pub(crate) const TITLE_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);

pub(crate) const WEEKDAY_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);

pub(crate) const HOLIDAY_STYLE: Style = Style::new().fg(Color::LightRed).bg(Color::Black);

pub(crate) const HINT_STYLE: Style = BASE_STYLE.fg(Color::DarkGray);

/// Focused field while browsing
pub(crate) const FOCUS_STYLE: Style = BASE_STYLE.add_modifier(Modifier::REVERSED);

/// Focused field while its text is being edited
pub(crate) const EDITING_STYLE: Style = Style::new()
    .fg(Color::LightYellow)
    .bg(Color::Black)
    .add_modifier(Modifier::UNDERLINED);

pub(crate) mod jumpto {
    use super::*;

    pub(crate) const UNFILLED_CELL_STYLE: Style = BASE_STYLE.fg(Color::DarkGray);

    pub(crate) const READY_ENTER_STYLE: Style = BASE_STYLE.add_modifier(Modifier::UNDERLINED);
}
