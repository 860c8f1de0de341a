use crate::date::YearMonth;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use time::Month;

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq)]
pub enum Locale {
    #[default]
    #[serde(rename = "cs-CZ")]
    CsCz,
    #[serde(rename = "en-US")]
    EnUs,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct LocaleTable {
    pub months: [&'static str; 12],
    /// Day abbreviations, Monday first
    pub days: [&'static str; 7],
}

static CS_CZ: LocaleTable = LocaleTable {
    months: [
        "Leden", "Únor", "Březen", "Duben", "Květen", "Červen", "Červenec", "Srpen", "Září",
        "Říjen", "Listopad", "Prosinec",
    ],
    days: ["Po", "Út", "St", "Čt", "Pá", "So", "Ne"],
};

static EN_US: LocaleTable = LocaleTable {
    months: [
        "January",
        "February",
        "March",
        "April",
        "May",
        "June",
        "July",
        "August",
        "September",
        "October",
        "November",
        "December",
    ],
    days: ["Mo", "Tu", "We", "Th", "Fr", "Sa", "Su"],
};

impl Locale {
    pub const ALL: [Locale; 2] = [Locale::CsCz, Locale::EnUs];

    pub fn id(self) -> &'static str {
        match self {
            Locale::CsCz => "cs-CZ",
            Locale::EnUs => "en-US",
        }
    }

    pub fn table(self) -> &'static LocaleTable {
        match self {
            Locale::CsCz => &CS_CZ,
            Locale::EnUs => &EN_US,
        }
    }

    pub fn month_name(self, month: Month) -> &'static str {
        let i = usize::from(u8::from(month) - 1);
        self.table().months[i]
    }

    pub fn day_abbrevs(self) -> &'static [&'static str; 7] {
        &self.table().days
    }

    /// The grid heading: localized month name followed by the year
    pub fn heading(self, ym: YearMonth) -> String {
        format!("{} {}", self.month_name(ym.month()), ym.year())
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Locale {
    type Err = UnknownLocaleError;

    fn from_str(s: &str) -> Result<Locale, UnknownLocaleError> {
        Locale::ALL
            .into_iter()
            .find(|loc| loc.id() == s)
            .ok_or_else(|| UnknownLocaleError(s.to_owned()))
    }
}

#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[error("unknown locale {0:?} (supported: cs-CZ, en-US)")]
pub struct UnknownLocaleError(pub String);
