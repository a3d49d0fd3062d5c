use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Widget, Wrap};

use crate::lexicon::Category;
use crate::lexicon::store::LexiconStore;
use crate::session::grade::Grade;
use crate::session::summary::SessionSummary;
use crate::ui::theme::Theme;

pub struct LexiconSummary<'a> {
    lexicon: &'a LexiconStore,
    last_session: Option<&'a SessionSummary>,
    theme: &'a Theme,
}

impl<'a> LexiconSummary<'a> {
    pub fn new(
        lexicon: &'a LexiconStore,
        last_session: Option<&'a SessionSummary>,
        theme: &'a Theme,
    ) -> Self {
        Self {
            lexicon,
            last_session,
            theme,
        }
    }
}

impl Widget for LexiconSummary<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let label = Style::default().fg(colors.muted());
        let value = Style::default().fg(colors.fg()).add_modifier(Modifier::BOLD);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(colors.border()))
            .title(" Lexicon ")
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let source = match self.lexicon.snapshot() {
            Some(snapshot) => snapshot
                .source
                .clone()
                .unwrap_or_else(|| "imported".to_string()),
            None => "built-in".to_string(),
        };
        let counts = self.lexicon.counts();

        let mut lines = vec![Line::from(vec![
            Span::styled("Source   ", label),
            Span::styled(source, value),
        ])];
        for category in Category::ALL {
            lines.push(Line::from(vec![
                Span::styled(format!("{:<9}", category.plural_label()), label),
                Span::styled(counts.get(category).to_string(), value),
            ]));
        }

        if let Some(session) = self.last_session {
            lines.push(Line::default());
            lines.push(Line::from(Span::styled("Last session", label)));
            let mut tally = Vec::new();
            for grade in Grade::ALL {
                tally.push(Span::styled(
                    format!("{} {}  ", grade.label(), session.count(grade)),
                    Style::default().fg(colors.grade(grade)),
                ));
            }
            lines.push(Line::from(tally));
            if !session.unknown_surfaces.is_empty() {
                let words: Vec<&str> = session.unknown_surfaces.iter().map(String::as_str).collect();
                lines.push(Line::from(vec![
                    Span::styled("Unknown  ", label),
                    Span::styled(words.join(" "), Style::default().fg(colors.unknown())),
                ]));
            }
        }

        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .render(inner, buf);
    }
}
