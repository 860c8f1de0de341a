use crate::layout::{CELL_WIDTH, DAYS_IN_WEEK};
use crate::surface::{PageSurface, Surface};
use crate::theme::{
    BASE_STYLE, BUTTON_STYLE, CAPTION_STYLE, EFFECT_STYLE, HEADING_STYLE, INPUT_FOCUS_STYLE,
    INPUT_STYLE, SELECTED_STYLE,
};
use ratatui::{
    buffer::Buffer,
    layout::{Flex, Layout, Rect},
    style::Style,
    text::Span,
    widgets::StatefulWidget,
};

/// Width of the picker in columns: one week of cells
pub const WIDTH: u16 = CELL_WIDTH * 7;

/// Lines taken up by the text field, the controls, and the captions
const HEADER_LINES: u16 = 3;

/// Most week rows a month can need (31 days starting on a Sunday)
const MAX_WEEKS: u16 = 6;

pub const HEIGHT: u16 = HEADER_LINES + MAX_WEEKS;

/// Columns taken by each of the previous/next buttons
const BUTTON_WIDTH: u16 = 3;

const INPUT_ROW: u16 = 0;
const CONTROLS_ROW: u16 = 1;
const CAPTION_ROW: u16 = 2;

/// What lies under a given screen position
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Target {
    Input,
    Prev,
    Next,
    Day(u8),
}

/// Paints a bound [`PageSurface`]: text field on top, then the month
/// controls, the weekday captions, and the day grid.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct PickerView {
    input_focused: bool,
}

impl PickerView {
    pub fn new() -> PickerView {
        PickerView::default()
    }

    pub fn input_focused(mut self, focused: bool) -> PickerView {
        self.input_focused = focused;
        self
    }

    /// The part of `area` the picker is drawn in
    pub fn frame(area: Rect) -> Rect {
        let [area] = Layout::horizontal([WIDTH]).flex(Flex::Center).areas(area);
        let [area] = Layout::vertical([HEIGHT]).flex(Flex::Center).areas(area);
        area
    }

    /// Finds what is drawn at (`column`, `row`) when `surface` is rendered in
    /// `area`
    pub fn hit_test(area: Rect, surface: &PageSurface, column: u16, row: u16) -> Option<Target> {
        let frame = PickerView::frame(area);
        if !surface.is_bound() || !frame.contains((column, row).into()) {
            return None;
        }
        let x = column - frame.x;
        let y = row - frame.y;
        match y {
            INPUT_ROW => Some(Target::Input),
            CONTROLS_ROW if x < BUTTON_WIDTH => Some(Target::Prev),
            CONTROLS_ROW if x >= WIDTH - BUTTON_WIDTH => Some(Target::Next),
            CONTROLS_ROW | CAPTION_ROW => None,
            _ => day_positions(surface)
                .into_iter()
                .find(|&(_, cx, cy)| cy == y && (cx..cx + CELL_WIDTH).contains(&x))
                .map(|(day, _, _)| Target::Day(day)),
        }
    }
}

impl StatefulWidget for PickerView {
    type State = PageSurface;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        if !state.is_bound() {
            return;
        }
        let frame = PickerView::frame(area);
        buf.set_style(frame, BASE_STYLE);
        let mut canvas = Canvas { area: frame, buf };

        let input_style = if state.effect_active() {
            EFFECT_STYLE
        } else if self.input_focused {
            INPUT_FOCUS_STYLE
        } else {
            INPUT_STYLE
        };
        let value = state.input_value();
        canvas.print(
            INPUT_ROW,
            0,
            &format!("{value:<width$}", width = usize::from(WIDTH)),
            input_style,
        );

        canvas.print(
            CONTROLS_ROW,
            0,
            &format!(" {} ", state.prev_label()),
            BUTTON_STYLE,
        );
        canvas.print(
            CONTROLS_ROW,
            WIDTH - BUTTON_WIDTH,
            &format!(" {} ", state.next_label()),
            BUTTON_STYLE,
        );
        let heading = state.heading();
        let span_width = WIDTH - 2 * BUTTON_WIDTH;
        let heading_width = u16::try_from(Span::raw(heading).width()).unwrap_or(u16::MAX);
        let offset = span_width.saturating_sub(heading_width) / 2;
        canvas.print(CONTROLS_ROW, BUTTON_WIDTH + offset, heading, HEADING_STYLE);

        for (cap, x) in state.captions().into_iter().zip(cell_columns()) {
            canvas.print(CAPTION_ROW, x, &cell_text(cap), CAPTION_STYLE);
        }

        let selected = state
            .day_cells()
            .into_iter()
            .filter(|c| c.selected)
            .map(|c| c.day)
            .collect::<Vec<_>>();
        for (day, x, y) in day_positions(state) {
            let style = if selected.contains(&day) {
                SELECTED_STYLE
            } else {
                BASE_STYLE
            };
            canvas.print(y, x, &cell_text(&day.to_string()), style);
        }
    }
}

/// Text of one grid cell: right-aligned in all but the last column
fn cell_text(s: &str) -> String {
    let w = usize::from(CELL_WIDTH - 1);
    format!("{s:>w$} ")
}

fn cell_columns() -> impl Iterator<Item = u16> {
    (0..7).map(|i| i * CELL_WIDTH)
}

/// Day number and frame-relative position of every visible day cell.  Cells
/// flow left to right from the leading margin, seven to a row.
fn day_positions(surface: &PageSurface) -> Vec<(u8, u16, u16)> {
    let week = u16::try_from(DAYS_IN_WEEK).unwrap_or(7);
    let mut slot = surface.leading_margin() / CELL_WIDTH;
    let mut out = Vec::new();
    for cell in surface.day_cells() {
        if !cell.visible {
            continue;
        }
        out.push((
            cell.day,
            (slot % week) * CELL_WIDTH,
            HEADER_LINES + slot / week,
        ));
        slot += 1;
    }
    out
}

#[derive(Debug)]
struct Canvas<'a> {
    area: Rect,
    buf: &'a mut Buffer,
}

impl Canvas<'_> {
    // Prints `s` at (`x`, `y`) relative to the canvas, truncating anything
    // that would extend past its right or bottom edge
    fn print(&mut self, y: u16, x: u16, s: &str, style: Style) {
        if y < self.area.height && x < self.area.width {
            self.buf.set_stringn(
                self.area.x + x,
                self.area.y + y,
                s,
                usize::from(self.area.width - x),
                style,
            );
        }
    }
}
