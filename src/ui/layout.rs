use tui::layout::{Constraint, Layout, Rect, Size};
pub const HEADER_HEIGHT: u16 = 3;
pub const LOGS_HEIGHT: u16 = 8;

/// Pre-computed layout areas for the main draw loop.
pub struct LayoutAreas {
    pub header: [Rect; 2],
    pub main: Rect,
    pub logs: Option<Rect>,
}

impl LayoutAreas {
    pub fn new(size: Size) -> Self {
        let rect = Rect::new(0, 0, size.width, size.height);
        Self::from_rect(rect, false, false)
    }

    pub fn update(&mut self, area: Rect, full_screen: bool, show_logs: bool) {
        *self = Self::from_rect(area, full_screen, show_logs);
    }

    fn from_rect(area: Rect, full_screen: bool, show_logs: bool) -> Self {
        let header_height = if full_screen { 0 } else { HEADER_HEIGHT };
        let logs_height = if show_logs { LOGS_HEIGHT } else { 0 };

        let [header, main, logs] = Layout::vertical([
            Constraint::Length(header_height),
            Constraint::Fill(1),
            Constraint::Length(logs_height),
        ])
        .areas(area);

        LayoutAreas {
            header: if full_screen { [Rect::ZERO, Rect::ZERO] } else { Self::split_header(header) },
            main,
            logs: show_logs.then_some(logs),
        }
    }

    fn split_header(area: Rect) -> [Rect; 2] {
        Layout::horizontal([Constraint::Percentage(75), Constraint::Percentage(25)]).areas(area)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_screen_gives_main_everything() {
        let mut layout = LayoutAreas::new(Size::new(100, 40));
        assert_eq!(layout.main.height, 40 - HEADER_HEIGHT);

        layout.update(Rect::new(0, 0, 100, 40), true, false);
        assert_eq!(layout.main, Rect::new(0, 0, 100, 40));
        assert_eq!(layout.logs, None);
    }

    #[test]
    fn logs_take_the_bottom_rows() {
        let mut layout = LayoutAreas::new(Size::new(100, 40));
        layout.update(Rect::new(0, 0, 100, 40), false, true);
        assert_eq!(layout.logs, Some(Rect::new(0, 40 - LOGS_HEIGHT, 100, LOGS_HEIGHT)));
        assert_eq!(layout.main.height, 40 - HEADER_HEIGHT - LOGS_HEIGHT);
    }
}
