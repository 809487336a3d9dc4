use crate::planner::Field;
use crate::store::NOTE_SLOTS;
use crate::theme::{BASE_STYLE, HINT_STYLE, TITLE_STYLE};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget, Wrap},
};

/// Lines taken by the notes list, including its borders
#[allow(clippy::cast_possible_truncation)]
const NOTES_HEIGHT: u16 = NOTE_SLOTS as u16 + 2;

/// The notes, goals, and observation of the selected month
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Sidebar<'a> {
    notes: &'a [String],
    goals: &'a str,
    observation: &'a str,
    focus: Option<Field>,
    focus_style: Style,
}

impl<'a> Sidebar<'a> {
    pub(crate) fn new(notes: &'a [String], goals: &'a str, observation: &'a str) -> Self {
        Sidebar {
            notes,
            goals,
            observation,
            focus: None,
            focus_style: Style::new(),
        }
    }

    pub(crate) fn focus(mut self, field: Field, style: Style) -> Self {
        self.focus = Some(field);
        self.focus_style = style;
        self
    }

    fn style_for(&self, field: Field) -> Style {
        if self.focus == Some(field) {
            self.focus_style
        } else {
            BASE_STYLE
        }
    }

    fn text_box(&self, title: &'static str, text: &'a str, field: Field) -> Paragraph<'a> {
        let block = Block::bordered()
            .title(Span::styled(title, TITLE_STYLE))
            .border_style(self.style_for(field));
        Paragraph::new(text)
            .style(BASE_STYLE)
            .wrap(Wrap { trim: false })
            .block(block)
    }
}

impl Widget for Sidebar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [notes_area, goals_area, observation_area] = Layout::vertical([
            Constraint::Length(NOTES_HEIGHT),
            Constraint::Fill(1),
            Constraint::Fill(1),
        ])
        .areas(area);
        let notes = self
            .notes
            .iter()
            .enumerate()
            .map(|(i, text)| {
                let field = Field::Note(i);
                let text = if text.is_empty() && self.focus == Some(field) {
                    "…"
                } else {
                    text.as_str()
                };
                Line::from_iter([
                    Span::styled(format!("{:02} ", i + 1), HINT_STYLE),
                    Span::styled(text, self.style_for(field)),
                ])
            })
            .collect::<Vec<_>>();
        Paragraph::new(notes)
            .style(BASE_STYLE)
            .block(Block::bordered().title(Span::styled(" Anotações importantes ", TITLE_STYLE)))
            .render(notes_area, buf);
        self.text_box(" Metas ", self.goals, Field::Goals)
            .render(goals_area, buf);
        self.text_box(" Observação ", self.observation, Field::Observation)
            .render(observation_area, buf);
    }
}
