// Screen layout: panel arrangement and sizing.
//
// +--------------------------------------------------+
// | Status Bar (1 row): title, page tabs, timestamp   |
// +--------------------------------------------------+
// | Page body (fill)                                  |
// +--------------------------------------------------+
// | Help Bar (1 row)                                  |
// +--------------------------------------------------+
//
// Pages split the body further with the helpers below.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

#[derive(Debug, Clone)]
pub struct AppLayout {
    pub status_bar: Rect,
    pub body: Rect,
    pub help_bar: Rect,
}

pub fn build_layout(area: Rect) -> AppLayout {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // status bar
            Constraint::Min(5),    // page body
            Constraint::Length(1), // help bar
        ])
        .split(area);

    AppLayout {
        status_bar: vertical[0],
        body: vertical[1],
        help_bar: vertical[2],
    }
}

/// Split `area` into a fixed-height header and the remainder.
pub fn header_and_rest(area: Rect, header_height: u16) -> (Rect, Rect) {
    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(header_height), Constraint::Min(0)])
        .split(area);
    (parts[0], parts[1])
}

/// Split `area` into `n` equal-width columns.
pub fn columns(area: Rect, n: u32) -> Vec<Rect> {
    let constraints: Vec<Constraint> = (0..n).map(|_| Constraint::Ratio(1, n)).collect();
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area)
        .to_vec()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn test_area() -> Rect {
        Rect::new(0, 0, 160, 50)
    }

    #[test]
    fn layout_bars_are_one_row() {
        let layout = build_layout(test_area());
        assert_eq!(layout.status_bar.height, 1);
        assert_eq!(layout.help_bar.height, 1);
        assert_eq!(layout.body.height, 48);
    }

    #[test]
    fn layout_zones_stack_without_overlap() {
        let layout = build_layout(test_area());
        assert_eq!(layout.status_bar.y, 0);
        assert_eq!(layout.body.y, 1);
        assert_eq!(layout.help_bar.y, 49);
        assert_eq!(layout.body.width, 160);
    }

    #[test]
    fn header_split() {
        let (head, rest) = header_and_rest(Rect::new(0, 0, 80, 20), 3);
        assert_eq!(head.height, 3);
        assert_eq!(rest.height, 17);
        assert_eq!(rest.y, 3);
    }

    #[test]
    fn columns_cover_width() {
        let cols = columns(Rect::new(0, 0, 90, 10), 3);
        assert_eq!(cols.len(), 3);
        let total: u16 = cols.iter().map(|r| r.width).sum();
        assert_eq!(total, 90);
        assert!(cols.iter().all(|r| r.width == 30));
    }

    #[test]
    fn small_terminal_still_has_body() {
        let layout = build_layout(Rect::new(0, 0, 40, 8));
        assert!(layout.body.height >= 5);
    }
}
