use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Width of the settings sidebar in columns
pub const SIDEBAR_WIDTH: u16 = 34;

/// Dashboard layout:
/// - Sidebar: fixed width (left)
/// - Main column: header, metric cards, tab bar, tab content, chat transcript, chat input
/// - Footer: bottom row across the main column
pub struct DashboardLayout {
    pub sidebar_area: Rect,
    pub header_area: Rect,
    pub cards_area: [Rect; 3],
    pub tabs_area: Rect,
    pub tab_content_area: Rect,
    pub chat_area: Rect,
    pub input_area: Rect,
    pub footer_area: Rect,
}

impl DashboardLayout {
    pub fn new(area: Rect) -> Self {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(20)])
            .split(area);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Header
                Constraint::Length(3), // Metric cards
                Constraint::Length(1), // Tab bar
                Constraint::Fill(2),   // Tab content
                Constraint::Fill(3),   // Chat transcript
                Constraint::Length(3), // Chat input
                Constraint::Length(1), // Footer
            ])
            .split(columns[1]);

        let cards = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, 3); 3])
            .split(rows[1]);

        Self {
            sidebar_area: columns[0],
            header_area: rows[0],
            cards_area: [cards[0], cards[1], cards[2]],
            tabs_area: rows[2],
            tab_content_area: rows[3],
            chat_area: rows[4],
            input_area: rows[5],
            footer_area: rows[6],
        }
    }
}

/// Sidebar sections: key label, masked key field, everything else
pub struct SidebarLayout {
    pub label_area: Rect,
    pub key_field_area: Rect,
    pub info_area: Rect,
}

impl SidebarLayout {
    pub fn new(inner: Rect) -> Self {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Length(3), Constraint::Min(0)])
            .split(inner);

        Self { label_area: rows[0], key_field_area: rows[1], info_area: rows[2] }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_splits_sidebar_and_main() {
        let area = Rect::new(0, 0, 120, 40);
        let layout = DashboardLayout::new(area);

        assert_eq!(layout.sidebar_area.width, SIDEBAR_WIDTH);
        assert_eq!(layout.sidebar_area.height, 40);
        assert_eq!(layout.header_area.x, SIDEBAR_WIDTH);
        assert_eq!(layout.header_area.width, 120 - SIDEBAR_WIDTH);
    }

    #[test]
    fn test_layout_fixed_rows() {
        let area = Rect::new(0, 0, 120, 40);
        let layout = DashboardLayout::new(area);

        assert_eq!(layout.header_area.height, 1);
        assert_eq!(layout.header_area.y, 0);
        assert_eq!(layout.cards_area[0].height, 3);
        assert_eq!(layout.tabs_area.height, 1);
        assert_eq!(layout.input_area.height, 3);
        assert_eq!(layout.footer_area.height, 1);
        assert_eq!(layout.footer_area.y, 39);
    }

    #[test]
    fn test_flexible_rows_share_remaining_height() {
        let area = Rect::new(0, 0, 120, 40);
        let layout = DashboardLayout::new(area);

        // 40 rows minus 9 fixed rows
        assert_eq!(layout.tab_content_area.height + layout.chat_area.height, 31);
        assert!(layout.tab_content_area.height > 0);
        assert!(layout.tab_content_area.height <= layout.chat_area.height);
    }

    #[test]
    fn test_cards_share_width() {
        let area = Rect::new(0, 0, 124, 40);
        let layout = DashboardLayout::new(area);

        let total: u16 = layout.cards_area.iter().map(|r| r.width).sum();
        assert_eq!(total, 124 - SIDEBAR_WIDTH);
        assert_eq!(layout.cards_area[0].width, 30);
    }

    #[test]
    fn test_sidebar_layout() {
        let layout = SidebarLayout::new(Rect::new(1, 1, 30, 20));

        assert_eq!(layout.label_area.height, 1);
        assert_eq!(layout.key_field_area.height, 3);
        assert_eq!(layout.key_field_area.y, 2);
        assert_eq!(layout.info_area.height, 16);
    }
}
