use tui::buffer::Buffer;
use tui::layout::Rect;
use tui::style::{Color, Modifier, Style};
use tui::text::Line;
use tui::widgets::{Block, BorderType, Borders, Paragraph, Widget};

/// Minimum card width including borders.
pub const CARD_WIDTH: u16 = 32;
const CARD_GAP: u16 = 1;

/// Cards that fit side by side in `width`. Never less than one.
pub fn columns_for(width: u16) -> usize {
    (((width + CARD_GAP) / (CARD_WIDTH + CARD_GAP)) as usize).max(1)
}

pub struct Card<'a> {
    pub title: Line<'a>,
    pub lines: Vec<Line<'a>>,
    pub accent: Color,
}

/// Responsive grid of bordered cards. Rows scroll so the selected card stays
/// on screen.
pub struct CardGrid<'a> {
    pub cards: Vec<Card<'a>>,
    pub selected: usize,
    pub card_height: u16,
}

impl CardGrid<'_> {
    fn first_visible_row(&self, columns: usize, visible_rows: usize) -> usize {
        let selected_row = self.selected / columns;
        (selected_row + 1).saturating_sub(visible_rows.max(1))
    }
}

impl Widget for CardGrid<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height < self.card_height.min(3) {
            return;
        }

        let columns = columns_for(area.width);
        let card_width = (area.width + CARD_GAP) / columns as u16 - CARD_GAP;
        let visible_rows = (area.height / self.card_height.max(1)) as usize;
        let first_row = self.first_visible_row(columns, visible_rows);
        let selected = self.selected;
        let card_height = self.card_height;

        for (idx, card) in self.cards.into_iter().enumerate() {
            let row = idx / columns;
            if row < first_row || row >= first_row + visible_rows.max(1) {
                continue;
            }
            let col = (idx % columns) as u16;
            let rect = Rect::new(
                area.x + col * (card_width + CARD_GAP),
                area.y + (row - first_row) as u16 * card_height,
                card_width,
                card_height.min(area.height),
            );

            let is_selected = idx == selected;
            let border = if is_selected { card.accent } else { Color::DarkGray };
            let block = Block::default()
                .borders(Borders::ALL)
                .border_type(if is_selected { BorderType::Thick } else { BorderType::Rounded })
                .border_style(Style::default().fg(border))
                .title(card.title.style(Style::default().fg(card.accent).add_modifier(Modifier::BOLD)));
            let inner = block.inner(rect);
            block.render(rect, buf);
            Paragraph::new(card.lines).render(inner, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_count_follows_width() {
        assert_eq!(columns_for(0), 1);
        assert_eq!(columns_for(31), 1);
        assert_eq!(columns_for(65), 2);
        assert_eq!(columns_for(140), 4);
    }

    #[test]
    fn scrolls_to_keep_selection_visible() {
        let grid = CardGrid { cards: Vec::new(), selected: 9, card_height: 6 };
        assert_eq!(grid.first_visible_row(2, 3), 2);
        assert_eq!(grid.first_visible_row(4, 3), 0);
    }

    #[test]
    fn renders_selected_card_title() {
        let cards = vec![
            Card { title: Line::from("Cooper Flagg"), lines: vec![Line::from("Duke")], accent: Color::Blue },
            Card { title: Line::from("RJ Davis"), lines: vec![Line::from("UNC")], accent: Color::Cyan },
        ];
        let area = Rect::new(0, 0, 66, 6);
        let mut buf = Buffer::empty(area);
        CardGrid { cards, selected: 1, card_height: 6 }.render(area, &mut buf);

        let row: String = (0..area.width).map(|x| buf[(x, 0)].symbol().to_string()).collect();
        assert!(row.contains("Cooper Flagg"));
        assert!(row.contains("RJ Davis"));
        let body: String = (0..area.width).map(|x| buf[(x, 1)].symbol().to_string()).collect();
        assert!(body.contains("UNC"));
    }
}
