use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Widget};

use crate::config::Config;
use crate::session::grade::Grade;
use crate::session::queue::QueueStats;
use crate::ui::theme::Theme;

/// Header line: session settings on the left, grade tally on the right.
pub struct SessionBar<'a> {
    stats: &'a QueueStats,
    config: &'a Config,
    status: Option<&'a str>,
    theme: &'a Theme,
}

impl<'a> SessionBar<'a> {
    pub fn new(
        stats: &'a QueueStats,
        config: &'a Config,
        status: Option<&'a str>,
        theme: &'a Theme,
    ) -> Self {
        Self {
            stats,
            config,
            status,
            theme,
        }
    }
}

impl Widget for SessionBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let block = Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.header_bg()).fg(colors.header_fg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let mut spans = vec![
            Span::styled(
                " jpdrills ",
                Style::default().fg(colors.accent()).add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!(
                " {} · {} · {} cards · readings {} ",
                self.config.direction,
                self.config.difficulty,
                self.config.session_size,
                if self.config.show_readings { "on" } else { "off" },
            )),
        ];
        for grade in Grade::ALL {
            spans.push(Span::styled(
                format!(" {}:{} ", grade.key(), self.stats.count(grade)),
                Style::default().fg(colors.grade(grade)),
            ));
        }
        spans.push(Span::raw(format!(" seen {} ", self.stats.seen)));

        let mut lines = vec![Line::from(spans)];
        if let Some(status) = self.status {
            lines.push(Line::from(Span::styled(
                format!(" {status}"),
                Style::default().fg(colors.muted()),
            )));
        }
        Paragraph::new(lines).render(inner, buf);
    }
}
