//! A month-grid date picker.
//!
//! [`CalendarWidget`] keeps the displayed month and the selected day, lays
//! out the grid, and keeps a free-text date field in sync with the
//! selection.  It draws itself through the [`Surface`] trait;
//! [`PageSurface`] is a retained element tree that [`PickerView`] paints
//! into a ratatui buffer.
pub mod config;
pub mod date;
pub mod input;
pub mod layout;
pub mod locale;
pub mod page;
pub mod surface;
pub mod theme;
pub mod view;
pub mod widget;
pub use crate::config::{ConfigError, ControlHooks, Options, Overrides};
pub use crate::date::{OutOfTimeError, SelectedDate, YearMonth};
pub use crate::input::DateInputError;
pub use crate::locale::Locale;
pub use crate::surface::{MountError, PageSurface, Surface};
pub use crate::view::{PickerView, Target};
pub use crate::widget::{CalendarWidget, HiddenDayError, Mount};
