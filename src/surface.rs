use crate::config::ControlHooks;
use crate::layout::{DAYS_IN_WEEK, MAX_CELLS};
use crate::page::{ElementId, Page, Tag};
use thiserror::Error;

/// Class added to the day item that is currently highlighted
pub const SELECTED_CLASS: &str = "selected";

/// Class added to the effect element while the selection effect is active
pub const TOGGLED_CLASS: &str = "toggled";

/// Name of the attribute holding a day item's day number
pub const DATE_ATTRIBUTE: &str = "data-date";

/// Everything the widget needs from the thing it is displayed on.
///
/// Day cells are addressed by zero-based index (day number minus one).
pub trait Surface {
    /// Builds the widget's elements from scratch
    fn create_scaffold(&mut self, hooks: &ControlHooks, captions: &[&str], input_effect: bool);

    /// Looks up the elements named by `hooks` and returns the number of day
    /// cells found
    fn bind(&mut self, hooks: &ControlHooks) -> Result<usize, MountError>;

    fn set_heading(&mut self, text: &str);

    /// Sets the blank space before the first day cell
    fn set_leading_margin(&mut self, margin: u16);

    fn set_cell_visible(&mut self, index: usize, visible: bool);

    fn set_cell_selected(&mut self, index: usize, selected: bool);

    fn input_value(&self) -> String;

    fn set_input_value(&mut self, value: &str);

    fn set_effect(&mut self, active: bool);
}

#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum MountError {
    #[error("no element with class {0:?}")]
    MissingElement(String),
    #[error("expected {expected} day cells but found {found}")]
    CellCount { expected: usize, found: usize },
}

/// A [`Surface`] backed by a [`Page`]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct PageSurface {
    page: Page,
    mount_point: Option<ElementId>,
    bound: Option<Bindings>,
}

#[derive(Clone, Debug, Eq, PartialEq)]
struct Bindings {
    prev: ElementId,
    next: ElementId,
    heading: ElementId,
    input: ElementId,
    captions: Vec<ElementId>,
    items: Vec<ElementId>,
}

/// A day cell as currently displayed
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct DayCell {
    pub day: u8,
    pub visible: bool,
    pub selected: bool,
}

impl PageSurface {
    /// A surface on an empty page; the widget must create its own elements
    pub fn new() -> PageSurface {
        PageSurface::default()
    }

    /// A surface on a page that may already contain the widget's markup
    pub fn with_page(page: Page) -> PageSurface {
        PageSurface {
            page,
            mount_point: None,
            bound: None,
        }
    }

    /// Created elements are attached under `parent` instead of at the top
    /// level of the page
    pub fn mount_under(mut self, parent: ElementId) -> PageSurface {
        self.mount_point = Some(parent);
        self
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn is_bound(&self) -> bool {
        self.bound.is_some()
    }

    pub fn heading(&self) -> &str {
        self.bound.as_ref().map_or("", |b| self.page.text(b.heading))
    }

    pub fn prev_label(&self) -> &str {
        self.bound.as_ref().map_or("", |b| self.page.text(b.prev))
    }

    pub fn next_label(&self) -> &str {
        self.bound.as_ref().map_or("", |b| self.page.text(b.next))
    }

    pub fn captions(&self) -> Vec<&str> {
        self.bound.as_ref().map_or_else(Vec::new, |b| {
            b.captions.iter().map(|&id| self.page.text(id)).collect()
        })
    }

    pub fn day_cells(&self) -> Vec<DayCell> {
        let Some(b) = self.bound.as_ref() else {
            return Vec::new();
        };
        b.items
            .iter()
            .zip(1u8..)
            .map(|(&id, fallback)| DayCell {
                day: self
                    .page
                    .attribute(id, DATE_ATTRIBUTE)
                    .and_then(|s| s.parse::<u8>().ok())
                    .unwrap_or(fallback),
                visible: !self.page.is_hidden(id),
                selected: self.page.has_class(id, SELECTED_CLASS),
            })
            .collect()
    }

    /// Margin of the first day cell's container
    pub fn leading_margin(&self) -> u16 {
        self.bound
            .as_ref()
            .and_then(|b| b.items.first())
            .and_then(|&id| self.margin_target(id))
            .and_then(|id| self.page.get(id))
            .map_or(0, |el| el.margin_left)
    }

    pub fn effect_active(&self) -> bool {
        self.bound
            .as_ref()
            .and_then(|b| self.page.next_sibling(b.input))
            .is_some_and(|id| self.page.has_class(id, TOGGLED_CLASS))
    }

    // The margin goes on the element wrapping the first item (its list
    // cell) when there is one
    fn margin_target(&self, item: ElementId) -> Option<ElementId> {
        self.page.get(item)?.parent().or(Some(item))
    }

    fn item(&self, index: usize) -> Option<ElementId> {
        self.bound.as_ref()?.items.get(index).copied()
    }

    fn require(&self, class: &str) -> Result<ElementId, MountError> {
        self.page
            .query(class)
            .ok_or_else(|| MountError::MissingElement(class.to_owned()))
    }
}

impl Surface for PageSurface {
    fn create_scaffold(&mut self, hooks: &ControlHooks, captions: &[&str], input_effect: bool) {
        build_scaffold(
            &mut self.page,
            self.mount_point,
            hooks,
            captions,
            input_effect,
        );
    }

    fn bind(&mut self, hooks: &ControlHooks) -> Result<usize, MountError> {
        let prev = self.require(&hooks.prev)?;
        let next = self.require(&hooks.next)?;
        let heading = self.require(&hooks.heading)?;
        let input = self.require(&hooks.input_field.class)?;
        let items = self.page.query_all(&hooks.item);
        if items.len() != MAX_CELLS {
            return Err(MountError::CellCount {
                expected: MAX_CELLS,
                found: items.len(),
            });
        }
        let captions = self.page.query_all(&hooks.day_caption);
        let count = items.len();
        self.bound = Some(Bindings {
            prev,
            next,
            heading,
            input,
            captions,
            items,
        });
        Ok(count)
    }

    fn set_heading(&mut self, text: &str) {
        if let Some(id) = self.bound.as_ref().map(|b| b.heading) {
            self.page.set_text(id, text);
        }
    }

    fn set_leading_margin(&mut self, margin: u16) {
        let target = self
            .bound
            .as_ref()
            .and_then(|b| b.items.first())
            .and_then(|&id| self.margin_target(id));
        if let Some(id) = target {
            self.page.set_margin_left(id, margin);
        }
    }

    fn set_cell_visible(&mut self, index: usize, visible: bool) {
        if let Some(id) = self.item(index) {
            self.page.set_hidden(id, !visible);
        }
    }

    fn set_cell_selected(&mut self, index: usize, selected: bool) {
        if let Some(id) = self.item(index) {
            self.page.set_class(id, SELECTED_CLASS, selected);
        }
    }

    fn input_value(&self) -> String {
        self.bound
            .as_ref()
            .map_or_else(String::new, |b| self.page.value(b.input).to_owned())
    }

    fn set_input_value(&mut self, value: &str) {
        if let Some(id) = self.bound.as_ref().map(|b| b.input) {
            self.page.set_value(id, value);
        }
    }

    fn set_effect(&mut self, active: bool) {
        let target = self
            .bound
            .as_ref()
            .and_then(|b| self.page.next_sibling(b.input));
        if let Some(id) = target {
            self.page.set_class(id, TOGGLED_CLASS, active);
        }
    }
}

/// Adds the complete widget markup to `page` under `parent`:
///
/// ```text
/// root
/// ├── input wrapper
/// │   ├── input field
/// │   └── effect line (only if `input_effect`)
/// └── content wrapper
///     ├── controls: prev, heading, next
///     └── content
///         ├── list: 7 caption cells, then 31 cells each holding a day item
///         └── clear
/// ```
pub fn build_scaffold(
    page: &mut Page,
    parent: Option<ElementId>,
    hooks: &ControlHooks,
    captions: &[&str],
    input_effect: bool,
) -> ElementId {
    let root = page.create_with_class(Tag::Div, &hooks.calendar_root);

    let input_wrapper = page.create_with_class(Tag::Div, &hooks.input_wrapper);
    page.append_child(Some(root), input_wrapper);
    let field = page.create_with_class(Tag::Input, &hooks.input_field.class);
    page.set_attribute(field, "type", "text");
    page.set_attribute(field, "name", &hooks.input_field.name);
    page.append_child(Some(input_wrapper), field);
    if input_effect {
        let effect = page.create_with_class(Tag::Div, &hooks.input_field.effect);
        page.append_child(Some(input_wrapper), effect);
    }

    let content_wrapper = page.create_with_class(Tag::Div, &hooks.content_wrapper);
    page.append_child(Some(root), content_wrapper);

    let controls = page.create_with_class(Tag::Div, &hooks.controls);
    page.append_child(Some(content_wrapper), controls);
    let prev = page.create_with_class(Tag::Link, &format!("{} {}", hooks.buttons, hooks.prev));
    page.set_text(prev, "<");
    let heading = page.create_with_class(Tag::Span, &hooks.heading);
    page.set_text(heading, " ");
    let next = page.create_with_class(Tag::Link, &format!("{} {}", hooks.buttons, hooks.next));
    page.set_text(next, ">");
    for id in [prev, heading, next] {
        page.append_child(Some(controls), id);
    }

    let content = page.create_with_class(Tag::Div, &hooks.content);
    page.append_child(Some(content_wrapper), content);
    let list = page.create(Tag::List);
    page.append_child(Some(content), list);
    for &caption in captions.iter().take(DAYS_IN_WEEK) {
        let cell = page.create_with_class(
            Tag::ListItem,
            &format!("{} {}", hooks.cell, hooks.day_caption),
        );
        page.set_text(cell, caption);
        page.append_child(Some(list), cell);
    }
    for day in 1..=MAX_CELLS {
        let cell = page.create_with_class(Tag::ListItem, &hooks.cell);
        let item = page.create_with_class(Tag::Link, &hooks.item);
        let label = day.to_string();
        page.set_attribute(item, DATE_ATTRIBUTE, &label);
        page.set_text(item, &label);
        page.append_child(Some(cell), item);
        page.append_child(Some(list), cell);
    }
    let clear = page.create_with_class(Tag::Div, &hooks.clear);
    page.append_child(Some(content), clear);

    page.append_child(parent, root);
    root
}
