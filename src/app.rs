use crate::help::Help;
use crossterm::event::{
    poll, read, Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use monthpick::{theme::BASE_STYLE, CalendarWidget, PageSurface, PickerView, Surface, Target};
use ratatui::{
    backend::Backend,
    buffer::Buffer,
    layout::Rect,
    widgets::{StatefulWidget, Widget},
    Terminal,
};
use std::io::{self, Write};
use std::time::Instant;

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct App {
    widget: CalendarWidget<PageSurface>,
    state: AppState,
    // Where the last frame was drawn, for mapping mouse clicks
    area: Rect,
}

impl App {
    pub(crate) fn new(widget: CalendarWidget<PageSurface>) -> App {
        App {
            widget,
            state: AppState::Calendar,
            area: Rect::default(),
        }
    }

    /// Runs until the user quits and returns the selected date
    pub(crate) fn run<B: Backend>(mut self, terminal: &mut Terminal<B>) -> io::Result<String> {
        while !self.quitting() {
            self.draw(terminal)?;
            self.handle_input()?;
        }
        Ok(self.widget.get_date())
    }

    fn draw<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        terminal.draw(|frame| frame.render_widget(self, frame.area()))?;
        Ok(())
    }

    fn handle_input(&mut self) -> io::Result<()> {
        // Wake up in time to clear the input effect
        let ready = match self.widget.effect_deadline() {
            Some(deadline) => poll(deadline.saturating_duration_since(Instant::now()))?,
            None => true,
        };
        if ready && !self.handle_event(&read()?) {
            self.beep()?;
        }
        self.widget.tick(Instant::now());
        Ok(())
    }

    // Returns `false` if the event was rejected and deserves a beep
    fn handle_event(&mut self, event: &Event) -> bool {
        if let Some(KeyEvent {
            code, modifiers, ..
        }) = event.as_key_press_event()
        {
            self.handle_key_event(code, modifiers)
        } else if let Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            ..
        }) = *event
        {
            self.handle_click(column, row)
        } else {
            // Redraw on resize and anything else
            true
        }
    }

    fn handle_key_event(&mut self, code: KeyCode, modifiers: KeyModifiers) -> bool {
        let normal_modifiers = KeyModifiers::NONE | KeyModifiers::SHIFT;
        if modifiers == KeyModifiers::CONTROL && code == KeyCode::Char('c') {
            self.state = AppState::Quitting;
            true
        } else {
            normal_modifiers.contains(modifiers) && self.handle_key(code)
        }
    }

    // Returns `false` if the user pressed an invalid key or the key's action
    // was rejected
    fn handle_key(&mut self, key: KeyCode) -> bool {
        match self.state {
            AppState::Calendar => match key {
                KeyCode::Char('h') | KeyCode::Left | KeyCode::PageUp => {
                    self.widget.previous_month().is_ok()
                }
                KeyCode::Char('l') | KeyCode::Right | KeyCode::PageDown => {
                    self.widget.next_month().is_ok()
                }
                KeyCode::Char('k') | KeyCode::Up => self.step_day(-1),
                KeyCode::Char('j') | KeyCode::Down => self.step_day(1),
                KeyCode::Char('i' | '/') => {
                    self.state = AppState::Editing;
                    true
                }
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.state = AppState::Quitting;
                    true
                }
                KeyCode::Char('?') => {
                    self.state = AppState::Helping;
                    true
                }
                _ => false,
            },
            AppState::Editing => match key {
                KeyCode::Char(c) => {
                    let mut value = self.widget.surface().input_value();
                    value.push(c);
                    self.widget.surface_mut().set_input_value(&value);
                    true
                }
                KeyCode::Backspace => {
                    let mut value = self.widget.surface().input_value();
                    let ok = value.pop().is_some();
                    self.widget.surface_mut().set_input_value(&value);
                    ok
                }
                KeyCode::Enter => {
                    // A rejected date stays in the field for correction
                    let ok = self.widget.input_key_up(key).is_ok();
                    if ok {
                        self.state = AppState::Calendar;
                    }
                    ok
                }
                KeyCode::Esc => self.blur(),
                _ => false,
            },
            AppState::Helping => {
                self.state = AppState::Calendar;
                true
            }
            AppState::Quitting => false,
        }
    }

    fn handle_click(&mut self, column: u16, row: u16) -> bool {
        if self.state == AppState::Helping {
            self.state = AppState::Calendar;
            return true;
        }
        let target = PickerView::hit_test(self.area, self.widget.surface(), column, row);
        let blurred = (self.state == AppState::Editing && target != Some(Target::Input))
            .then(|| self.blur());
        // A clicked control decides the outcome; a rejected blur only beeps
        // when the click hit nothing else
        match target {
            Some(Target::Input) => {
                self.state = AppState::Editing;
                true
            }
            Some(Target::Prev) => self.widget.previous_month().is_ok(),
            Some(Target::Next) => self.widget.next_month().is_ok(),
            Some(Target::Day(day)) => self.widget.click_day(day).is_ok(),
            None => blurred.unwrap_or(true),
        }
    }

    fn blur(&mut self) -> bool {
        self.state = AppState::Calendar;
        self.widget.input_blur().is_ok()
    }

    /// Moves the selection by `delta` days within the displayed month.  If
    /// the selection lies in another month, starts from the displayed
    /// month's first or last day instead.
    fn step_day(&mut self, delta: i16) -> bool {
        let display = self.widget.display();
        let selected = self.widget.selected_date();
        let day = if selected.year_month() == display {
            i16::from(selected.day()) + delta
        } else if delta > 0 {
            1
        } else {
            i16::from(display.day_count())
        };
        match u8::try_from(day) {
            Ok(day) if (1..=display.day_count()).contains(&day) => {
                self.widget.select_day(day).is_ok()
            }
            _ => false,
        }
    }

    fn beep(&self) -> io::Result<()> {
        io::stdout().write_all(b"\x07")?;
        io::stdout().flush()
    }

    fn quitting(&self) -> bool {
        self.state == AppState::Quitting
    }
}

impl Widget for &mut App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.area = area;
        buf.set_style(area, BASE_STYLE);
        PickerView::new()
            .input_focused(self.state == AppState::Editing)
            .render(area, buf, self.widget.surface_mut());
        if self.state == AppState::Helping {
            Help(BASE_STYLE).render(area, buf);
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum AppState {
    Calendar,
    Editing,
    Helping,
    Quitting,
}
