use std::collections::BTreeSet;

use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction as LayoutDirection, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Widget, Wrap};

use crate::config::Direction;
use crate::session::card::{Card, Token};
use crate::ui::theme::Theme;

pub struct PracticeCard<'a> {
    card: Option<&'a Card>,
    position: usize,
    total: usize,
    revealed: bool,
    direction: Direction,
    show_readings: bool,
    selected: usize,
    unknown: Option<&'a BTreeSet<String>>,
    theme: &'a Theme,
}

impl<'a> PracticeCard<'a> {
    pub fn new(card: Option<&'a Card>, theme: &'a Theme) -> Self {
        Self {
            card,
            position: 0,
            total: 0,
            revealed: false,
            direction: Direction::JpEn,
            show_readings: true,
            selected: 0,
            unknown: None,
            theme,
        }
    }

    pub fn position(mut self, position: usize, total: usize) -> Self {
        self.position = position;
        self.total = total;
        self
    }

    pub fn revealed(mut self, revealed: bool) -> Self {
        self.revealed = revealed;
        self
    }

    pub fn direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    pub fn show_readings(mut self, show: bool) -> Self {
        self.show_readings = show;
        self
    }

    pub fn selected(mut self, selected: usize) -> Self {
        self.selected = selected;
        self
    }

    pub fn unknown(mut self, unknown: Option<&'a BTreeSet<String>>) -> Self {
        self.unknown = unknown;
        self
    }

    fn is_unknown(&self, token: &Token) -> bool {
        self.unknown.is_some_and(|set| set.contains(&token.id))
    }

    fn token_style(&self, index: usize, token: &Token) -> Style {
        let colors = &self.theme.colors;
        let mut style = if self.revealed {
            Style::default().fg(colors.part_of_speech(token.pos))
        } else {
            Style::default().fg(colors.fg())
        };
        if self.is_unknown(token) {
            style = style
                .fg(colors.unknown())
                .add_modifier(Modifier::UNDERLINED);
        }
        if index == self.selected {
            style = style.bg(colors.selected_bg()).add_modifier(Modifier::BOLD);
        }
        style
    }

    /// Surfaces on one line, with readings aligned above them when enabled.
    fn token_lines(&self, card: &Card) -> Vec<Line<'static>> {
        let colors = &self.theme.colors;
        let mut readings: Vec<Span<'static>> = Vec::new();
        let mut surfaces: Vec<Span<'static>> = Vec::new();

        for (i, token) in card.tokens.iter().enumerate() {
            if i > 0 {
                readings.push(Span::raw(" "));
                surfaces.push(Span::raw(" "));
            }
            let surface = Span::styled(token.surface.clone(), self.token_style(i, token));
            let reading = token
                .reading
                .as_deref()
                .filter(|r| *r != token.surface)
                .unwrap_or("");
            let reading = Span::styled(reading.to_string(), Style::default().fg(colors.muted()));

            let width = surface.width().max(reading.width());
            let surface_pad = width - surface.width();
            let reading_pad = width - reading.width();
            surfaces.push(surface);
            surfaces.push(Span::raw(" ".repeat(surface_pad)));
            readings.push(reading);
            readings.push(Span::raw(" ".repeat(reading_pad)));
        }

        if self.show_readings {
            vec![Line::from(readings), Line::from(surfaces)]
        } else {
            vec![Line::from(surfaces)]
        }
    }

    fn target_lines(&self, card: &Card) -> Vec<Line<'static>> {
        vec![Line::from(Span::styled(
            card.target.clone(),
            Style::default().fg(self.theme.colors.fg()),
        ))]
    }

    fn token_detail(&self, card: &Card) -> Line<'static> {
        let colors = &self.theme.colors;
        let Some(token) = card.tokens.get(self.selected) else {
            return Line::default();
        };
        let mut spans = vec![Span::styled(
            token.surface.clone(),
            Style::default().fg(colors.accent()).add_modifier(Modifier::BOLD),
        )];
        if let Some(reading) = &token.reading {
            spans.push(Span::styled(format!("  {reading}"), Style::default().fg(colors.muted())));
        }
        if let Some(gloss) = &token.gloss {
            spans.push(Span::styled(format!("  {gloss}"), Style::default().fg(colors.fg())));
        }
        if self.is_unknown(token) {
            spans.push(Span::styled("  unknown", Style::default().fg(colors.unknown())));
        }
        Line::from(spans)
    }
}

impl Widget for PracticeCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(colors.border_focused()))
            .style(Style::default().bg(colors.bg()));

        let Some(card) = self.card else {
            let inner = block.inner(area);
            block.render(area, buf);
            Paragraph::new(vec![
                Line::from("No cards in this session."),
                Line::from("Import a deck with `jpdrills import <csv>`, then press r."),
            ])
            .style(Style::default().fg(colors.muted()))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(inner, buf);
            return;
        };

        block = block
            .title(Line::from(format!(
                " Card {}/{} ",
                self.position + 1,
                self.total
            )))
            .title(
                Line::from(Span::styled(
                    format!(" {} ", card.hint),
                    Style::default().fg(colors.muted()),
                ))
                .alignment(Alignment::Right),
            );
        let inner = block.inner(area);
        block.render(area, buf);

        let tokens = self.token_lines(card);
        let target = self.target_lines(card);
        let tokens_visible = self.direction == Direction::JpEn || self.revealed;
        let (prompt, answer) = match self.direction {
            Direction::JpEn => (tokens, target),
            Direction::EnJp => (target, tokens),
        };

        let sections = Layout::default()
            .direction(LayoutDirection::Vertical)
            .constraints([
                Constraint::Min(3),
                Constraint::Length(1),
                Constraint::Min(3),
                Constraint::Length(1),
            ])
            .split(inner);

        Paragraph::new(prompt)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: false })
            .render(sections[0], buf);

        Paragraph::new(Line::from("─".repeat(sections[1].width as usize)))
            .style(Style::default().fg(colors.border()))
            .render(sections[1], buf);

        if self.revealed {
            Paragraph::new(answer)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: false })
                .render(sections[2], buf);
        } else {
            Paragraph::new(Line::from("[Space] reveal"))
                .style(Style::default().fg(colors.muted()))
                .alignment(Alignment::Center)
                .render(sections[2], buf);
        }

        if tokens_visible {
            Paragraph::new(self.token_detail(card)).render(sections[3], buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::frame::FrameKind;
    use crate::session::card::{PartOfSpeech, TokenDraft};

    fn card() -> Card {
        Card::assemble(
            "c0".to_string(),
            vec![
                TokenDraft::new("本", "book", PartOfSpeech::Noun)
                    .with_reading(Some("ほん".to_string())),
                TokenDraft::new("です", "is", PartOfSpeech::Verb),
                TokenDraft::period(),
            ],
            "This is a book.".to_string(),
            FrameKind::CopulaDemonstrative,
            "hint".to_string(),
        )
    }

    fn rendered(widget: PracticeCard<'_>) -> String {
        let area = Rect::new(0, 0, 60, 14);
        let mut buf = Buffer::empty(area);
        widget.render(area, &mut buf);
        buf.content().iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn answer_hidden_until_revealed() {
        let theme = Theme::default();
        let card = card();
        let hidden = rendered(PracticeCard::new(Some(&card), &theme).position(0, 3));
        assert!(hidden.contains("Card 1/3"));
        assert!(hidden.contains("[Space] reveal"));
        assert!(!hidden.contains("This is a book."));

        let shown = rendered(PracticeCard::new(Some(&card), &theme).revealed(true));
        assert!(shown.contains("This is a book."));
    }

    #[test]
    fn english_prompt_hides_token_detail() {
        let theme = Theme::default();
        let card = card();
        let out = rendered(
            PracticeCard::new(Some(&card), &theme)
                .direction(Direction::EnJp)
                .selected(0),
        );
        assert!(out.contains("This is a book."));
        assert!(!out.contains("book  "));
    }

    #[test]
    fn empty_session_message() {
        let theme = Theme::default();
        assert!(rendered(PracticeCard::new(None, &theme)).contains("No cards"));
    }

    #[test]
    fn readings_line_only_when_enabled() {
        let theme = Theme::default();
        let card = card();
        let with = PracticeCard::new(Some(&card), &theme).token_lines(&card);
        let without = PracticeCard::new(Some(&card), &theme)
            .show_readings(false)
            .token_lines(&card);
        assert_eq!(with.len(), 2);
        assert_eq!(without.len(), 1);
        assert_eq!(with[0].width(), with[1].width());
    }
}
