use crate::config::Options;
use crate::date::{OutOfTimeError, SelectedDate, YearMonth};
use crate::input::{parse_date, DateInputError};
use crate::layout::compute_layout;
use crate::surface::{MountError, Surface};
use crossterm::event::KeyCode;
use std::time::{Duration, Instant};
use thiserror::Error;
use time::Date;

/// How long the text field stays marked after a day is clicked
pub const EFFECT_DURATION: Duration = Duration::from_secs(1);

/// How [`CalendarWidget::init`] obtains its elements
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Mount {
    /// Build the elements on the surface first
    Create,
    /// The surface already holds matching markup; only bind to it
    Existing,
}

#[derive(Copy, Clone, Debug, Eq, Error, PartialEq)]
#[error("day {0} is not shown in the displayed month")]
pub struct HiddenDayError(pub u8);

/// A month-grid date picker drawn on a [`Surface`]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CalendarWidget<S> {
    options: Options,
    display: YearMonth,
    selected: SelectedDate,
    // Day count of the month the surface currently shows; `None` until the
    // first layout
    shown_day_count: Option<u8>,
    effect_deadline: Option<Instant>,
    surface: S,
}

impl<S: Surface> CalendarWidget<S> {
    /// Mounts a widget on `surface`.  The initially selected day is the day
    /// of month of `today` within the configured starting month (or that
    /// month's last day if it is shorter).
    pub fn init(
        options: Options,
        today: Date,
        mut surface: S,
        mount: Mount,
    ) -> Result<Self, MountError> {
        if mount == Mount::Create {
            surface.create_scaffold(
                &options.controls,
                options.locale.day_abbrevs(),
                options.input_effect,
            );
        }
        if let Err(e) = surface.bind(&options.controls) {
            log::warn!("Could not mount calendar: {e}");
            return Err(e);
        }
        let display = options.start;
        let initial = display.clamped_date(today.day());
        log::info!(
            "Mounted calendar ({mount:?}, locale {}) on {}-{:02}",
            options.locale,
            display.year(),
            u8::from(display.month())
        );
        let mut widget = CalendarWidget {
            options,
            display,
            selected: SelectedDate::new(initial),
            shown_day_count: None,
            effect_deadline: None,
            surface,
        };
        widget.update_heading();
        widget.select(initial);
        widget.relayout();
        Ok(widget)
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn display(&self) -> YearMonth {
        self.display
    }

    pub fn selected_date(&self) -> SelectedDate {
        self.selected
    }

    /// The selected date as `D/M/Y`
    pub fn get_date(&self) -> String {
        self.selected.to_string()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn next_month(&mut self) -> Result<(), OutOfTimeError> {
        let ym = self.display.next()?;
        self.switch_month(ym);
        Ok(())
    }

    pub fn previous_month(&mut self) -> Result<(), OutOfTimeError> {
        let ym = self.display.previous()?;
        self.switch_month(ym);
        Ok(())
    }

    fn switch_month(&mut self, ym: YearMonth) {
        log::debug!("Showing {}", self.options.locale.heading(ym));
        self.display = ym;
        self.update_heading();
        // The selection survives navigation; only its highlight follows the
        // displayed month.
        let here = self.selected.year_month() == self.display;
        self.surface
            .set_cell_selected(self.selected.cell_index(), here);
        self.relayout();
    }

    /// Selects `day` of the displayed month
    pub fn select_day(&mut self, day: u8) -> Result<(), HiddenDayError> {
        let date = self.display.date(day).ok_or(HiddenDayError(day))?;
        self.select(date);
        Ok(())
    }

    /// Handles a click on the cell for `day`: selects it and, if enabled,
    /// starts the input effect
    pub fn click_day(&mut self, day: u8) -> Result<(), HiddenDayError> {
        self.click_day_at(day, Instant::now())
    }

    pub fn click_day_at(&mut self, day: u8, now: Instant) -> Result<(), HiddenDayError> {
        self.select_day(day)?;
        if self.options.input_effect {
            // Restarting replaces any pending clear from an earlier click
            self.effect_deadline = Some(now + EFFECT_DURATION);
            self.surface.set_effect(true);
        }
        Ok(())
    }

    /// When the input effect must be cleared, if it is active
    pub fn effect_deadline(&self) -> Option<Instant> {
        self.effect_deadline
    }

    /// Clears the input effect once its deadline has passed
    pub fn tick(&mut self, now: Instant) {
        if self.effect_deadline.is_some_and(|d| d <= now) {
            self.effect_deadline = None;
            self.surface.set_effect(false);
        }
    }

    /// Parses `text` as a `D/M/Y` date and, if it is valid, shows its month
    /// and selects it.  On error nothing changes.
    pub fn apply_input(&mut self, text: &str) -> Result<(), DateInputError> {
        let date = parse_date(text).inspect_err(|e| {
            log::warn!("Ignoring date input {text:?}: {e}");
        })?;
        self.display = YearMonth::of(date);
        self.relayout();
        self.select(date);
        self.update_heading();
        Ok(())
    }

    /// Handles the text field losing focus: re-reads and applies its value
    pub fn input_blur(&mut self) -> Result<(), DateInputError> {
        let text = self.surface.input_value();
        self.apply_input(&text)
    }

    /// Handles a key being released in the text field.  Enter commits the
    /// field like a blur; other keys are left to the field itself.
    pub fn input_key_up(&mut self, key: KeyCode) -> Result<(), DateInputError> {
        if key == KeyCode::Enter {
            self.input_blur()
        } else {
            Ok(())
        }
    }

    fn select(&mut self, date: Date) {
        self.surface
            .set_cell_selected(self.selected.cell_index(), false);
        self.selected = SelectedDate::new(date);
        self.surface
            .set_cell_selected(self.selected.cell_index(), true);
        let text = self.selected.to_string();
        log::debug!("Selected {text}");
        self.surface.set_input_value(&text);
    }

    fn update_heading(&mut self) {
        let heading = self.options.locale.heading(self.display);
        self.surface.set_heading(&heading);
    }

    fn relayout(&mut self) {
        let layout = compute_layout(self.display, self.shown_day_count);
        self.surface.set_leading_margin(layout.leading_margin());
        for i in layout.cells_to_hide() {
            self.surface.set_cell_visible(i, false);
        }
        for i in layout.cells_to_show() {
            self.surface.set_cell_visible(i, true);
        }
        self.shown_day_count = Some(layout.day_count);
    }
}
