use crate::date::YearMonth;
use crate::locale::Locale;
use serde::Deserialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use time::Date;

/// Class names the widget builds its elements with and looks them up by
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ControlHooks {
    pub calendar_root: String,
    pub input_wrapper: String,
    pub input_field: InputFieldHooks,
    pub content_wrapper: String,
    pub controls: String,
    pub buttons: String,
    pub prev: String,
    pub heading: String,
    pub next: String,
    pub content: String,
    pub cell: String,
    pub day_caption: String,
    pub item: String,
    pub clear: String,
}

impl Default for ControlHooks {
    fn default() -> ControlHooks {
        ControlHooks {
            calendar_root: "sa-calendar".into(),
            input_wrapper: "sa-cal-input-wrapper".into(),
            input_field: InputFieldHooks::default(),
            content_wrapper: "sa-cal-wrapper".into(),
            controls: "sa-cal-controls".into(),
            buttons: "sa-cal-change".into(),
            prev: "sa-cal-prev-month".into(),
            heading: "sa-cal-current".into(),
            next: "sa-cal-next-month".into(),
            content: "sa-cal-content".into(),
            cell: "sa-cal-cell".into(),
            day_caption: "sa-cal-day".into(),
            item: "sa-cal-day-no".into(),
            clear: "sa-clr".into(),
        }
    }
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct InputFieldHooks {
    pub class: String,
    /// Value of the field's `name` attribute
    pub name: String,
    /// Class of the element placed right after the field that carries the
    /// selection effect
    pub effect: String,
}

impl Default for InputFieldHooks {
    fn default() -> InputFieldHooks {
        InputFieldHooks {
            class: "sa-cal-field".into(),
            name: "cal-date".into(),
            effect: "sa-cal-effect-line".into(),
        }
    }
}

/// Complete settings for one widget instance
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Options {
    pub controls: ControlHooks,
    /// Briefly mark the text field after a day is clicked
    pub input_effect: bool,
    pub locale: Locale,
    /// Month shown when the widget is mounted
    pub start: YearMonth,
}

impl Options {
    /// Default options, starting on the month of `today`
    pub fn new(today: Date) -> Options {
        Options {
            controls: ControlHooks::default(),
            input_effect: true,
            locale: Locale::default(),
            start: YearMonth::of(today),
        }
    }

    /// Applies `overrides` on top of these options.  Only the keys present
    /// in `overrides` change; `controls` is replaced as a whole.
    pub fn merge(mut self, overrides: Overrides) -> Result<Options, ConfigError> {
        let Overrides {
            controls,
            input_effect,
            locale,
            year,
            month,
        } = overrides;
        if let Some(controls) = controls {
            self.controls = controls;
        }
        if let Some(input_effect) = input_effect {
            self.input_effect = input_effect;
        }
        if let Some(locale) = locale {
            self.locale = locale;
        }
        if year.is_some() || month.is_some() {
            let year = year.unwrap_or_else(|| self.start.year());
            let month = month.unwrap_or_else(|| self.start.index0());
            if month > 11 {
                return Err(ConfigError::Month(month));
            }
            self.start = YearMonth::from_index0(year, month).ok_or(ConfigError::Year(year))?;
        }
        Ok(self)
    }
}

/// A partial set of options, as read from a config file or the command line
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Overrides {
    pub controls: Option<ControlHooks>,
    pub input_effect: Option<bool>,
    pub locale: Option<Locale>,
    pub year: Option<i32>,
    /// Zero-based month (0 = January)
    pub month: Option<u8>,
}

impl Overrides {
    pub fn from_toml_str(s: &str) -> Result<Overrides, ConfigError> {
        toml::from_str(s).map_err(ConfigError::Parse)
    }

    pub fn load(path: &Path) -> Result<Overrides, ConfigError> {
        let src = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_owned(),
            source,
        })?;
        Overrides::from_toml_str(&src)
    }

    /// Layers `other` on top of `self`, with `other` winning for every key
    /// it sets
    pub fn then(self, other: Overrides) -> Overrides {
        Overrides {
            controls: other.controls.or(self.controls),
            input_effect: other.input_effect.or(self.input_effect),
            locale: other.locale.or(self.locale),
            year: other.year.or(self.year),
            month: other.month.or(self.month),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid configuration")]
    Parse(#[source] toml::de::Error),
    #[error("month index {0} is out of range (expected 0 through 11)")]
    Month(u8),
    #[error("year {0} is out of range")]
    Year(i32),
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;
    use time::Month;

    fn defaults() -> Options {
        Options::new(date!(2024 - 06 - 15))
    }

    #[test]
    fn test_defaults() {
        let opts = defaults();
        assert_eq!(opts.controls.calendar_root, "sa-calendar");
        assert_eq!(opts.controls.input_field.class, "sa-cal-field");
        assert_eq!(opts.controls.item, "sa-cal-day-no");
        assert!(opts.input_effect);
        assert_eq!(opts.locale, Locale::CsCz);
        assert_eq!(opts.start, YearMonth::new(2024, Month::June).unwrap());
    }

    #[test]
    fn test_merge_is_shallow() {
        let opts = defaults()
            .merge(Overrides {
                locale: Some(Locale::EnUs),
                ..Overrides::default()
            })
            .unwrap();
        assert_eq!(opts.locale, Locale::EnUs);
        assert!(opts.input_effect);
        assert_eq!(opts.controls, ControlHooks::default());
        assert_eq!(opts.start, defaults().start);
    }

    #[test]
    fn test_merge_month_only() {
        let opts = defaults()
            .merge(Overrides {
                month: Some(0),
                ..Overrides::default()
            })
            .unwrap();
        assert_eq!(opts.start, YearMonth::new(2024, Month::January).unwrap());
    }

    #[test]
    fn test_merge_bad_month() {
        let r = defaults().merge(Overrides {
            month: Some(12),
            ..Overrides::default()
        });
        assert!(matches!(r, Err(ConfigError::Month(12))));
    }

    #[test]
    fn test_merge_bad_year() {
        let r = defaults().merge(Overrides {
            year: Some(20000),
            ..Overrides::default()
        });
        assert!(matches!(r, Err(ConfigError::Year(20000))));
    }

    #[test]
    fn test_from_toml() {
        let overrides = Overrides::from_toml_str(
            "locale = \"en-US\"\n\
             input_effect = false\n\
             year = 2017\n\
             month = 6\n\
             \n\
             [controls]\n\
             prev = \"back\"\n\
             \n\
             [controls.input_field]\n\
             class = \"date-box\"\n",
        )
        .unwrap();
        assert_eq!(overrides.locale, Some(Locale::EnUs));
        assert_eq!(overrides.input_effect, Some(false));
        let opts = defaults().merge(overrides).unwrap();
        assert_eq!(opts.start, YearMonth::new(2017, Month::July).unwrap());
        assert_eq!(opts.controls.prev, "back");
        assert_eq!(opts.controls.next, "sa-cal-next-month");
        assert_eq!(opts.controls.input_field.class, "date-box");
        assert_eq!(opts.controls.input_field.name, "cal-date");
    }

    #[test]
    fn test_from_toml_unknown_locale() {
        assert!(Overrides::from_toml_str("locale = \"fr-FR\"\n").is_err());
    }

    #[test]
    fn test_from_toml_unknown_key() {
        assert!(Overrides::from_toml_str("colour = \"blue\"\n").is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let path = Path::new("/nonexistent/monthpick.toml");
        let r = Overrides::load(path);
        assert!(matches!(r, Err(ConfigError::Read { path: ref p, .. }) if p == path));
    }

    #[test]
    fn test_then() {
        let file = Overrides {
            locale: Some(Locale::EnUs),
            year: Some(2020),
            ..Overrides::default()
        };
        let cli = Overrides {
            year: Some(2021),
            input_effect: Some(false),
            ..Overrides::default()
        };
        assert_eq!(
            file.then(cli),
            Overrides {
                controls: None,
                input_effect: Some(false),
                locale: Some(Locale::EnUs),
                year: Some(2021),
                month: None,
            }
        );
    }
}
