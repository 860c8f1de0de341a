use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Flex, Layout, Rect},
    style::Style,
    text::{Line, Text},
    widgets::{Block, Clear, Paragraph, Widget},
};

static TEXT: &[&str] = &[
    "h, LEFT, PAGE UP       Show the previous month",
    "l, RIGHT, PAGE DOWN    Show the next month",
    "k, UP                  Select the previous day",
    "j, DOWN                Select the next day",
    "i, /                   Edit the date field",
    "?                      Show this help",
    "q, ESC                 Quit and print the date",
    "",
    "While editing:",
    "ENTER                  Apply the typed date",
    "ESC                    Apply and stop editing",
    "",
    "Click a day to select it, or the arrows to",
    "change the month.",
    "",
    "Press the Any Key to dismiss.",
];

/// Key reference drawn centered over the picker
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) struct Help(pub(crate) Style);

impl Widget for Help {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let lines = TEXT.iter().map(|&s| Line::raw(s)).collect::<Vec<_>>();
        let text = Text::from(lines);
        let height = u16::try_from(text.height())
            .unwrap_or(u16::MAX)
            .min(area.height)
            .saturating_add(2);
        let width = u16::try_from(text.width())
            .unwrap_or(u16::MAX)
            .min(area.width)
            .saturating_add(2);
        let para = Paragraph::new(text)
            .block(
                Block::bordered()
                    .title(" Commands ")
                    .title_alignment(Alignment::Center),
            )
            .style(self.0);
        let [help_area] = Layout::horizontal([width]).flex(Flex::Center).areas(area);
        let [help_area] = Layout::vertical([height])
            .flex(Flex::Center)
            .areas(help_area);
        let outer_area = Rect {
            x: help_area.x.saturating_sub(1),
            y: help_area.y,
            width: help_area.width.saturating_add(2),
            height: help_area.height,
        };
        Clear.render(outer_area, buf);
        Block::new().style(self.0).render(outer_area, buf);
        para.render(help_area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(buffer: &Buffer) -> Vec<String> {
        (0..buffer.area.height)
            .map(|y| {
                (0..buffer.area.width)
                    .map(|x| buffer[(x, y)].symbol())
                    .collect::<String>()
            })
            .collect()
    }

    #[test]
    fn test_centered_box() {
        let area = Rect::new(0, 0, 80, 24);
        let mut buffer = Buffer::empty(area);
        Help(Style::new()).render(area, &mut buffer);
        let rows = rows(&buffer);
        assert_eq!(rows.len(), 24);
        // 16 lines of text plus the border, centered vertically
        assert_eq!(rows[2].trim(), "");
        assert!(rows[3].trim().starts_with('┌'));
        assert!(rows[3].contains(" Commands "));
        assert_eq!(
            rows[4].trim(),
            "│h, LEFT, PAGE UP       Show the previous month│"
        );
        assert_eq!(rows[19].trim(), "│Press the Any Key to dismiss.                 │");
        assert!(rows[20].trim().starts_with('└'));
        assert_eq!(rows[21].trim(), "");
    }
}
