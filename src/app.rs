use crate::calendar::{month_name, MonthView, PeriodError};
use crate::help::Help;
use crate::jumpto::{JumpTo, JumpToInput, JumpToOutput, JumpToState};
use crate::planner::{Field, Planner, PlannerView};
use crate::sidebar::Sidebar;
use crate::store::NOTE_SLOTS;
use crate::theme::{BANNER_STYLE, BASE_STYLE, EDITING_STYLE, FOCUS_STYLE, HINT_STYLE};
use crossterm::event::{read, KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    backend::Backend,
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, StatefulWidget, Widget},
    Terminal,
};
use std::io::{self, Write};
use time::Month;

/// Columns given to the notes, goals, and observation
const SIDEBAR_WIDTH: u16 = 36;

/// Lines taken up by the banner
const BANNER_LINES: u16 = 2;

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct App {
    planner: Planner,
    focus: Field,
    state: AppState,
}

impl App {
    pub(crate) fn new(planner: Planner) -> App {
        App {
            planner,
            focus: Field::Note(0),
            state: AppState::Browsing,
        }
    }

    pub(crate) fn run<B: Backend>(mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        while !self.quitting() {
            self.draw(terminal)?;
            self.handle_input()?;
        }
        log::debug!(
            "Quitting with {} month records in memory",
            self.planner.store().record_count()
        );
        Ok(())
    }

    fn draw<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        terminal.draw(|frame| frame.render_widget(self, frame.area()))?;
        Ok(())
    }

    fn handle_input(&mut self) -> io::Result<()> {
        let normal_modifiers = KeyModifiers::NONE | KeyModifiers::SHIFT;
        if let Some(KeyEvent {
            code, modifiers, ..
        }) = read()?.as_key_press_event()
        {
            if modifiers == KeyModifiers::CONTROL && code == KeyCode::Char('c') {
                self.state = AppState::Quitting;
            } else if !normal_modifiers.contains(modifiers) || !self.handle_key(code) {
                self.beep()?;
            }
        }
        // else: Redraw on resize, and we might as well redraw on other stuff
        // too
        Ok(())
    }

    // Returns `false` if the user pressed an invalid key
    fn handle_key(&mut self, key: KeyCode) -> bool {
        match &mut self.state {
            AppState::Browsing => match key {
                KeyCode::Char('t') => {
                    self.planner.toggle_team();
                    true
                }
                KeyCode::Char('n') | KeyCode::PageDown => self.change_period(Planner::next_month),
                KeyCode::Char('p') | KeyCode::PageUp => {
                    self.change_period(Planner::previous_month)
                }
                KeyCode::Char('>') => self.change_period(Planner::next_year),
                KeyCode::Char('<') => self.change_period(Planner::previous_year),
                KeyCode::F(n) => match Month::try_from(n) {
                    Ok(month) => {
                        self.planner.select_month(month);
                        self.clamp_focus();
                        true
                    }
                    Err(_) => false,
                },
                KeyCode::Char('0') | KeyCode::Home => {
                    self.planner.go_home();
                    self.clamp_focus();
                    true
                }
                KeyCode::Char('g') => {
                    self.state = AppState::Jumping(JumpToState::new());
                    true
                }
                KeyCode::Tab => self.cycle_focus(true),
                KeyCode::BackTab => self.cycle_focus(false),
                KeyCode::Up | KeyCode::Down | KeyCode::Left | KeyCode::Right => {
                    self.move_focus(key)
                }
                KeyCode::Enter | KeyCode::Char('e') => {
                    self.state = AppState::Editing;
                    true
                }
                KeyCode::Delete => {
                    self.planner.edit(self.focus, String::new());
                    true
                }
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.state = AppState::Quitting;
                    true
                }
                KeyCode::Char('?') => {
                    self.state = AppState::Helping;
                    true
                }
                _ => false,
            },
            AppState::Editing => match key {
                KeyCode::Enter | KeyCode::Esc => {
                    self.state = AppState::Browsing;
                    true
                }
                KeyCode::Char(c) => {
                    let mut text = self.planner.text(self.focus);
                    text.push(c);
                    self.planner.edit(self.focus, text);
                    true
                }
                KeyCode::Backspace => {
                    let mut text = self.planner.text(self.focus);
                    if text.pop().is_some() {
                        self.planner.edit(self.focus, text);
                        true
                    } else {
                        false
                    }
                }
                _ => false,
            },
            AppState::Helping => {
                self.state = AppState::Browsing;
                true
            }
            AppState::Jumping(state) => {
                if matches!(key, KeyCode::Char('q' | 'g') | KeyCode::Esc) {
                    self.state = AppState::Browsing;
                    true
                } else {
                    let output = match key {
                        KeyCode::Char(c) => match c.to_digit(10).and_then(|d| u8::try_from(d).ok())
                        {
                            Some(d) => state.handle_input(JumpToInput::Digit(d)),
                            None => JumpToOutput::Invalid,
                        },
                        KeyCode::Backspace | KeyCode::Delete => {
                            state.handle_input(JumpToInput::Backspace)
                        }
                        KeyCode::Enter => state.handle_input(JumpToInput::Enter),
                        _ => JumpToOutput::Invalid,
                    };
                    match output {
                        JumpToOutput::Ok => true,
                        JumpToOutput::Invalid => false,
                        JumpToOutput::Jump(period) => {
                            if self.planner.select(period).is_ok() {
                                self.state = AppState::Browsing;
                                self.clamp_focus();
                                true
                            } else {
                                false
                            }
                        }
                    }
                }
            }
            AppState::Quitting => false,
        }
    }

    fn beep(&self) -> io::Result<()> {
        io::stdout().write_all(b"\x07")
    }

    fn quitting(&self) -> bool {
        self.state == AppState::Quitting
    }

    fn change_period(&mut self, step: fn(&mut Planner) -> Result<(), PeriodError>) -> bool {
        match step(&mut self.planner) {
            Ok(()) => {
                self.clamp_focus();
                true
            }
            Err(e) => {
                log::debug!("Month change rejected: {e}");
                false
            }
        }
    }

    fn days_in_month(&self) -> u8 {
        self.planner.period().days_in_month()
    }

    // Keep a focused day inside the newly selected month
    fn clamp_focus(&mut self) {
        if let Field::Day(day) = self.focus {
            self.focus = Field::Day(day.min(self.days_in_month()));
        }
    }

    fn field_order(&self) -> Vec<Field> {
        (0..NOTE_SLOTS)
            .map(Field::Note)
            .chain([Field::Goals, Field::Observation])
            .chain((1..=self.days_in_month()).map(Field::Day))
            .collect()
    }

    fn cycle_focus(&mut self, forwards: bool) -> bool {
        let order = self.field_order();
        let len = order.len();
        let i = order.iter().position(|&f| f == self.focus).unwrap_or(0);
        let j = if forwards {
            (i + 1) % len
        } else {
            (i + len - 1) % len
        };
        match order.get(j) {
            Some(&field) => {
                self.focus = field;
                true
            }
            None => false,
        }
    }

    fn move_focus(&mut self, key: KeyCode) -> bool {
        let days = self.days_in_month();
        let target = match (self.focus, key) {
            (Field::Note(i), KeyCode::Up) => i.checked_sub(1).map(Field::Note),
            (Field::Note(i), KeyCode::Down) if i + 1 < NOTE_SLOTS => Some(Field::Note(i + 1)),
            (Field::Note(_), KeyCode::Down) => Some(Field::Goals),
            (Field::Goals, KeyCode::Up) => Some(Field::Note(NOTE_SLOTS - 1)),
            (Field::Goals, KeyCode::Down) => Some(Field::Observation),
            (Field::Observation, KeyCode::Up) => Some(Field::Goals),
            (Field::Note(_) | Field::Goals | Field::Observation, KeyCode::Right) => {
                Some(Field::Day(1))
            }
            (Field::Day(d), KeyCode::Left) => d.checked_sub(1).filter(|&d| d > 0).map(Field::Day),
            (Field::Day(d), KeyCode::Right) => d.checked_add(1).filter(|&d| d <= days).map(Field::Day),
            (Field::Day(d), KeyCode::Up) => d.checked_sub(7).filter(|&d| d > 0).map(Field::Day),
            (Field::Day(d), KeyCode::Down) => d.checked_add(7).filter(|&d| d <= days).map(Field::Day),
            _ => None,
        };
        match target {
            Some(field) => {
                self.focus = field;
                true
            }
            None => false,
        }
    }

    fn focus_style(&self) -> Style {
        if self.state == AppState::Editing {
            EDITING_STYLE
        } else {
            FOCUS_STYLE
        }
    }

    fn render_banner(&self, view: &PlannerView, area: Rect, buf: &mut Buffer) {
        let [top, bottom] = Layout::vertical([1, 1]).areas(area);
        let period = view.period();
        let month = Line::styled(
            format!("{} {} ", month_name(period.month()), period.year()),
            BANNER_STYLE,
        )
        .alignment(Alignment::Right);
        let month_width = u16::try_from(month.width()).unwrap_or(u16::MAX);
        let [team_area, month_area] =
            Layout::horizontal([Constraint::Fill(1), Constraint::Length(month_width)]).areas(top);
        Paragraph::new(Line::from_iter([
            Span::styled(format!(" {} ", view.team.label()), BANNER_STYLE),
            Span::styled(" (t: trocar equipe)", HINT_STYLE),
        ]))
        .render(team_area, buf);
        Paragraph::new(month).render(month_area, buf);
        let hint = if self.state == AppState::Editing {
            " Editando: ENTER ou ESC para concluir"
        } else {
            " ?: ajuda"
        };
        Paragraph::new(Line::styled(hint, HINT_STYLE)).render(bottom, buf);
    }
}

impl Widget for &mut App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, BASE_STYLE);
        let view = self.planner.refresh();
        let [banner_area, body_area] =
            Layout::vertical([Constraint::Length(BANNER_LINES), Constraint::Fill(1)]).areas(area);
        self.render_banner(&view, banner_area, buf);
        let [side_area, calendar_area] =
            Layout::horizontal([Constraint::Length(SIDEBAR_WIDTH), Constraint::Fill(1)])
                .spacing(1)
                .areas(body_area);
        let focus_style = self.focus_style();
        Sidebar::new(&view.notes, &view.goals, &view.observation)
            .focus(self.focus, focus_style)
            .render(side_area, buf);
        let cursor = match self.focus {
            Field::Day(day) => Some(day),
            _ => None,
        };
        let today = (view.period() == self.planner.home()).then(|| self.planner.today().day());
        MonthView::new(&view.grid)
            .today(today)
            .cursor(cursor, focus_style)
            .render(calendar_area, buf);
        if self.state == AppState::Helping {
            Help(BASE_STYLE).render(area, buf);
        } else if let AppState::Jumping(ref mut state) = self.state {
            JumpTo(self.planner.year_window()).render(area, buf, state);
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum AppState {
    Browsing,
    Editing,
    Helping,
    Jumping(JumpToState),
    Quitting,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::YearMonth;
    use crate::team::Team;
    use time::macros::date;

    fn app() -> App {
        App::new(Planner::new(date!(2024 - 09 - 16)))
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            assert!(app.handle_key(KeyCode::Char(c)));
        }
    }

    fn lines(buf: &Buffer) -> Vec<String> {
        let width = usize::from(buf.area.width);
        buf.content
            .chunks(width)
            .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
            .collect()
    }

    fn render(app: &mut App) -> Vec<String> {
        let area = Rect::new(0, 0, 120, 40);
        let mut buffer = Buffer::empty(area);
        app.render(area, &mut buffer);
        lines(&buffer)
    }

    #[test]
    fn test_edit_note() {
        let mut app = app();
        assert!(app.handle_key(KeyCode::Down));
        assert!(app.handle_key(KeyCode::Enter));
        type_text(&mut app, "Reunião");
        assert!(app.handle_key(KeyCode::Backspace));
        assert!(app.handle_key(KeyCode::Enter));
        assert_eq!(app.state, AppState::Browsing);
        assert_eq!(app.planner.text(Field::Note(1)), "Reuniã");
    }

    #[test]
    fn test_backspace_on_empty_field_is_invalid() {
        let mut app = app();
        assert!(app.handle_key(KeyCode::Enter));
        assert!(!app.handle_key(KeyCode::Backspace));
    }

    #[test]
    fn test_commands_are_text_while_editing() {
        let mut app = app();
        app.focus = Field::Goals;
        assert!(app.handle_key(KeyCode::Char('e')));
        type_text(&mut app, "tq?");
        assert!(app.handle_key(KeyCode::Esc));
        assert_eq!(app.planner.team(), Team::Tarde);
        assert!(!app.quitting());
        assert_eq!(app.planner.text(Field::Goals), "tq?");
    }

    #[test]
    fn test_toggle_team_twice_restores_data() {
        let mut app = app();
        app.focus = Field::Day(7);
        assert!(app.handle_key(KeyCode::Enter));
        type_text(&mut app, "desfile");
        assert!(app.handle_key(KeyCode::Enter));
        let before = app.planner.refresh();
        assert!(app.handle_key(KeyCode::Char('t')));
        assert_eq!(app.planner.team(), Team::Manha);
        assert_eq!(app.planner.text(Field::Day(7)), "");
        assert!(app.handle_key(KeyCode::Char('t')));
        assert_eq!(app.planner.team(), Team::Tarde);
        assert_eq!(app.planner.refresh(), before);
    }

    #[test]
    fn test_month_navigation_clamps_focused_day() {
        let mut app = app();
        app.planner
            .select(YearMonth::new(2024, Month::January).unwrap())
            .unwrap();
        app.focus = Field::Day(31);
        assert!(app.handle_key(KeyCode::Char('n')));
        assert_eq!(
            app.planner.period(),
            YearMonth::new(2024, Month::February).unwrap()
        );
        assert_eq!(app.focus, Field::Day(29));
        assert!(app.handle_key(KeyCode::F(12)));
        assert_eq!(
            app.planner.period(),
            YearMonth::new(2024, Month::December).unwrap()
        );
        assert!(!app.handle_key(KeyCode::F(13)));
        assert!(app.handle_key(KeyCode::Home));
        assert_eq!(
            app.planner.period(),
            YearMonth::new(2024, Month::September).unwrap()
        );
    }

    #[test]
    fn test_year_navigation_stays_in_window() {
        let mut app = app();
        for _ in 0..5 {
            assert!(app.handle_key(KeyCode::Char('>')));
        }
        assert!(!app.handle_key(KeyCode::Char('>')));
        assert_eq!(app.planner.period().year(), 2029);
        for _ in 0..10 {
            assert!(app.handle_key(KeyCode::Char('<')));
        }
        assert!(!app.handle_key(KeyCode::Char('<')));
        assert_eq!(app.planner.period().year(), 2019);
    }

    #[test]
    fn test_move_focus_in_calendar() {
        let mut app = app();
        assert!(app.handle_key(KeyCode::Right));
        assert_eq!(app.focus, Field::Day(1));
        assert!(!app.handle_key(KeyCode::Left));
        assert!(!app.handle_key(KeyCode::Up));
        assert!(app.handle_key(KeyCode::Down));
        assert_eq!(app.focus, Field::Day(8));
        app.focus = Field::Day(28);
        assert!(app.handle_key(KeyCode::Right));
        assert_eq!(app.focus, Field::Day(29));
        assert!(!app.handle_key(KeyCode::Down));
    }

    #[test]
    fn test_cycle_focus_wraps() {
        let mut app = app();
        assert!(app.handle_key(KeyCode::BackTab));
        assert_eq!(app.focus, Field::Day(30));
        assert!(app.handle_key(KeyCode::Tab));
        assert_eq!(app.focus, Field::Note(0));
        app.focus = Field::Note(14);
        assert!(app.handle_key(KeyCode::Tab));
        assert_eq!(app.focus, Field::Goals);
        assert!(app.handle_key(KeyCode::Tab));
        assert!(app.handle_key(KeyCode::Tab));
        assert_eq!(app.focus, Field::Day(1));
    }

    #[test]
    fn test_delete_clears_field() {
        let mut app = app();
        app.planner.edit(Field::Note(0), String::from("apagar"));
        assert!(app.handle_key(KeyCode::Delete));
        assert_eq!(app.planner.text(Field::Note(0)), "");
    }

    #[test]
    fn test_jump_to_month() {
        let mut app = app();
        assert!(app.handle_key(KeyCode::Char('g')));
        for c in "202603".chars() {
            assert!(app.handle_key(KeyCode::Char(c)));
        }
        assert!(app.handle_key(KeyCode::Enter));
        assert_eq!(app.state, AppState::Browsing);
        assert_eq!(
            app.planner.period(),
            YearMonth::new(2026, Month::March).unwrap()
        );
    }

    #[test]
    fn test_jump_outside_window_is_rejected() {
        let mut app = app();
        assert!(app.handle_key(KeyCode::Char('g')));
        for c in "203501".chars() {
            assert!(app.handle_key(KeyCode::Char(c)));
        }
        assert!(!app.handle_key(KeyCode::Enter));
        assert!(matches!(app.state, AppState::Jumping(_)));
        assert!(app.handle_key(KeyCode::Esc));
        assert_eq!(
            app.planner.period(),
            YearMonth::new(2024, Month::September).unwrap()
        );
    }

    #[test]
    fn test_help_and_quit() {
        let mut app = app();
        assert!(app.handle_key(KeyCode::Char('?')));
        assert_eq!(app.state, AppState::Helping);
        assert!(app.handle_key(KeyCode::Char('x')));
        assert_eq!(app.state, AppState::Browsing);
        assert!(!app.handle_key(KeyCode::Char('x')));
        assert!(app.handle_key(KeyCode::Char('q')));
        assert!(app.quitting());
    }

    #[test]
    fn test_render() {
        let mut app = app();
        app.planner.edit(Field::Note(0), String::from("pagar boletos"));
        app.planner.edit(Field::Goals, String::from("zerar pendências"));
        app.planner.edit(Field::Day(16), String::from("auditoria"));
        let lines = render(&mut app);
        assert!(lines[0].starts_with(" Equipe tarde: Fernanda  (t: trocar equipe)"));
        assert!(lines[0].ends_with("Setembro 2024 "), "{:?}", lines[0]);
        assert!(lines[1].starts_with(" ?: ajuda"));
        assert!(lines[3].contains("01 pagar boletos"), "{:?}", lines[3]);
        assert!(lines[2..].iter().any(|l| l.contains("zerar pendências")));
        assert!(lines[2..].iter().any(|l| l.contains("[16]")));
        assert!(lines[2..].iter().any(|l| l.contains("auditoria")));
        assert!(lines[2..].iter().any(|l| l.contains("Indepe")));
    }

    #[test]
    fn test_render_editing_hint() {
        let mut app = app();
        assert!(app.handle_key(KeyCode::Enter));
        let lines = render(&mut app);
        assert!(
            lines[1].starts_with(" Editando: ENTER ou ESC para concluir"),
            "{:?}",
            lines[1]
        );
    }

    #[test]
    fn test_render_other_team() {
        let mut app = app();
        app.planner.edit(Field::Note(0), String::from("pagar boletos"));
        assert!(app.handle_key(KeyCode::Char('t')));
        let lines = render(&mut app);
        assert!(lines[0].starts_with(" Equipe manhã: Camila "));
        assert!(!lines.iter().any(|l| l.contains("pagar boletos")));
    }

    #[test]
    fn test_render_no_today_marker_in_other_months() {
        let mut app = app();
        assert!(app.handle_key(KeyCode::Char('n')));
        let lines = render(&mut app);
        assert!(lines[0].ends_with("Outubro 2024 "), "{:?}", lines[0]);
        assert!(!lines.iter().any(|l| l.contains("[16]")));
    }

    #[test]
    fn test_render_help_and_jump() {
        let mut app = app();
        assert!(app.handle_key(KeyCode::Char('?')));
        let lines = render(&mut app);
        assert!(lines.iter().any(|l| l.contains("Comandos")));
        assert!(lines.iter().any(|l| l.contains("Trocar equipe")));
        assert!(lines.iter().any(|l| l.contains("Pressione qualquer tecla")));
        assert!(app.handle_key(KeyCode::Char('?')));
        assert!(app.handle_key(KeyCode::Char('g')));
        assert!(render(&mut app).iter().any(|l| l.contains("Ir para mês")));
    }
}
