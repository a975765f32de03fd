use tui::buffer::Buffer;
use tui::layout::Rect;
use tui::style::{Color, Modifier, Style};
use tui::text::{Line, Span};
use tui::widgets::{Paragraph, Widget};

/// One row of selectable buttons. `active` is the selected value, `cursor`
/// the keyboard position, shown only while the strip has focus.
pub struct ButtonStrip {
    pub labels: Vec<String>,
    pub active: Option<usize>,
    pub cursor: usize,
    pub focused: bool,
    pub accent: Color,
}

impl ButtonStrip {
    fn button_width(label: &str) -> u16 {
        // "[ label ]" plus one column gap
        Span::raw(label).width() as u16 + 5
    }

    /// First label to draw so the cursor button fits in `width`.
    fn first_visible(&self, width: u16) -> usize {
        let mut start = self.cursor.min(self.labels.len().saturating_sub(1));
        let mut used = self.labels.get(start).map(|l| Self::button_width(l)).unwrap_or(0);
        while start > 0 {
            let next = used + Self::button_width(&self.labels[start - 1]);
            if next > width {
                break;
            }
            used = next;
            start -= 1;
        }
        start
    }
}

impl Widget for ButtonStrip {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        if self.labels.is_empty() {
            Paragraph::new(Span::styled("none", Style::default().fg(Color::DarkGray)))
                .render(area, buf);
            return;
        }

        let start = self.first_visible(area.width);
        let mut spans = Vec::new();
        if start > 0 {
            spans.push(Span::styled("‹ ", Style::default().fg(Color::DarkGray)));
        }
        for (idx, label) in self.labels.iter().enumerate().skip(start) {
            let mut style = if Some(idx) == self.active {
                Style::default().fg(Color::Black).bg(self.accent).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            if self.focused && idx == self.cursor {
                style = style.add_modifier(Modifier::UNDERLINED | Modifier::REVERSED);
            }
            spans.push(Span::styled(format!("[ {label} ]"), style));
            spans.push(Span::raw(" "));
        }
        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strip(cursor: usize) -> ButtonStrip {
        ButtonStrip {
            labels: (1..=6).map(|i| format!("stint {i}")).collect(),
            active: Some(0),
            cursor,
            focused: true,
            accent: Color::Yellow,
        }
    }

    #[test]
    fn scrolls_so_cursor_is_visible() {
        // each button is 12 columns wide
        assert_eq!(strip(0).first_visible(30), 0);
        assert_eq!(strip(5).first_visible(30), 4);
        assert_eq!(strip(5).first_visible(200), 0);
    }

    #[test]
    fn renders_labels_in_order() {
        let area = Rect::new(0, 0, 40, 1);
        let mut buf = Buffer::empty(area);
        strip(0).render(area, &mut buf);
        let row: String = (0..area.width).map(|x| buf[(x, 0)].symbol().to_string()).collect();
        assert!(row.starts_with("[ stint 1 ] [ stint 2 ]"));
    }
}
