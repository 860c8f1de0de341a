use std::fmt;
use thiserror::Error;
use time::{
    util::days_in_month,
    Date,
    Month::{self, December, January},
};

/// The month currently shown in the grid, independent of the selection.
///
/// Stored as the first day of the month so that every value is a valid
/// calendar month by construction.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct YearMonth {
    first: Date,
}

impl YearMonth {
    pub fn new(year: i32, month: Month) -> Result<YearMonth, OutOfTimeError> {
        Date::from_calendar_date(year, month, 1)
            .map(|first| YearMonth { first })
            .map_err(|_| OutOfTimeError)
    }

    /// Constructs a `YearMonth` from a zero-based month index (0 = January)
    pub fn from_index0(year: i32, index0: u8) -> Option<YearMonth> {
        let month = Month::try_from(index0.checked_add(1)?).ok()?;
        YearMonth::new(year, month).ok()
    }

    pub fn of(date: Date) -> YearMonth {
        YearMonth {
            first: date.replace_day(1).unwrap_or(date),
        }
    }

    pub fn year(self) -> i32 {
        self.first.year()
    }

    pub fn month(self) -> Month {
        self.first.month()
    }

    /// Zero-based month number, 0 through 11
    pub fn index0(self) -> u8 {
        u8::from(self.month()) - 1
    }

    pub fn day_count(self) -> u8 {
        days_in_month(self.month(), self.year())
    }

    /// Weekday of the 1st, counted from Monday = 0 to Sunday = 6
    pub fn leading_offset(self) -> u8 {
        self.first.weekday().number_days_from_monday()
    }

    /// Returns the given day of this month, or `None` if the month has no
    /// such day
    pub fn date(self, day: u8) -> Option<Date> {
        self.first.replace_day(day).ok()
    }

    // Used where the day comes from outside the month (e.g., "today" while a
    // different month is configured).
    pub(crate) fn clamped_date(self, day: u8) -> Date {
        self.date(day.clamp(1, self.day_count()))
            .unwrap_or(self.first)
    }

    pub fn next(self) -> Result<YearMonth, OutOfTimeError> {
        match self.month() {
            December => YearMonth::new(self.year() + 1, January),
            m => YearMonth::new(self.year(), m.next()),
        }
    }

    pub fn previous(self) -> Result<YearMonth, OutOfTimeError> {
        match self.month() {
            January => YearMonth::new(self.year() - 1, December),
            m => YearMonth::new(self.year(), m.previous()),
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, Error, PartialEq)]
#[error("reached the end of time")]
pub struct OutOfTimeError;

/// The single day currently highlighted and reflected in the text field.
///
/// Year, month, and day are only ever replaced together.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct SelectedDate(Date);

impl SelectedDate {
    pub fn new(date: Date) -> SelectedDate {
        SelectedDate(date)
    }

    pub fn date(self) -> Date {
        self.0
    }

    pub fn day(self) -> u8 {
        self.0.day()
    }

    pub fn year_month(self) -> YearMonth {
        YearMonth::of(self.0)
    }

    /// Index of the grid cell showing this day
    pub fn cell_index(self) -> usize {
        usize::from(self.0.day() - 1)
    }
}

impl fmt::Display for SelectedDate {
    /// Formats as `D/M/Y` with a one-based month and no padding
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{}",
            self.0.day(),
            u8::from(self.0.month()),
            self.0.year()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;
    use time::Month::*;

    fn ym(year: i32, month: Month) -> YearMonth {
        YearMonth::new(year, month).unwrap()
    }

    #[test]
    fn test_day_count() {
        assert_eq!(ym(2024, February).day_count(), 29);
        assert_eq!(ym(2023, February).day_count(), 28);
        assert_eq!(ym(1900, February).day_count(), 28);
        assert_eq!(ym(2000, February).day_count(), 29);
        assert_eq!(ym(2024, April).day_count(), 30);
        assert_eq!(ym(2024, January).day_count(), 31);
        assert_eq!(ym(2024, December).day_count(), 31);
    }

    #[test]
    fn test_day_count_agrees_with_calendar() {
        let mut ymo = ym(2023, January);
        for _ in 0..48 {
            let count = ymo.day_count();
            assert!(ymo.date(count).is_some());
            assert!(ymo.date(count + 1).is_none());
            ymo = ymo.next().unwrap();
        }
    }

    #[test]
    fn test_leading_offset() {
        // 2024-04-01 is a Monday
        assert_eq!(ym(2024, April).leading_offset(), 0);
        // 2024-09-01 is a Sunday
        assert_eq!(ym(2024, September).leading_offset(), 6);
        // 2024-06-01 is a Saturday
        assert_eq!(ym(2024, June).leading_offset(), 5);
        // 2024-03-01 is a Friday
        assert_eq!(ym(2024, March).leading_offset(), 4);
    }

    #[test]
    fn test_twelve_steps_forwards() {
        let start = ym(2024, March);
        let mut cur = start;
        for _ in 0..12 {
            cur = cur.next().unwrap();
        }
        assert_eq!(cur, ym(2025, March));
    }

    #[test]
    fn test_twelve_steps_backwards() {
        let start = ym(2024, March);
        let mut cur = start;
        for _ in 0..12 {
            cur = cur.previous().unwrap();
        }
        assert_eq!(cur, ym(2023, March));
    }

    #[test]
    fn test_wrap_at_year_boundary() {
        assert_eq!(ym(2024, December).next().unwrap(), ym(2025, January));
        assert_eq!(ym(2025, January).previous().unwrap(), ym(2024, December));
    }

    #[test]
    fn test_end_of_time() {
        assert_eq!(ym(9999, December).next(), Err(OutOfTimeError));
        assert_eq!(ym(-9999, January).previous(), Err(OutOfTimeError));
    }

    #[test]
    fn test_index0() {
        assert_eq!(ym(2024, January).index0(), 0);
        assert_eq!(ym(2024, December).index0(), 11);
        assert_eq!(YearMonth::from_index0(2024, 5), Some(ym(2024, June)));
        assert_eq!(YearMonth::from_index0(2024, 12), None);
    }

    #[test]
    fn test_clamped_date() {
        assert_eq!(ym(2024, February).clamped_date(31), date!(2024 - 02 - 29));
        assert_eq!(ym(2024, February).clamped_date(0), date!(2024 - 02 - 01));
        assert_eq!(ym(2024, February).clamped_date(12), date!(2024 - 02 - 12));
    }

    #[test]
    fn test_selected_date_display() {
        let sel = SelectedDate::new(date!(2024 - 06 - 15));
        assert_eq!(sel.to_string(), "15/6/2024");
        assert_eq!(sel.cell_index(), 14);
        assert_eq!(sel.year_month(), ym(2024, June));
        let sel = SelectedDate::new(date!(2021 - 01 - 01));
        assert_eq!(sel.to_string(), "1/1/2021");
    }
}
