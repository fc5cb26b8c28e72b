use std::time::Duration;

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, TimeZone, Weekday};

/// When a job fires.
#[derive(Debug, Clone)]
pub enum Trigger {
    /// Fixed interval, anchored to the previous due time.
    Every(Duration),
    /// Specific wall-clock time gated by optional date fields, in the
    /// market time zone.
    Calendar(CalendarTrigger),
}

impl Trigger {
    /// First due time strictly after `after`. `None` means the trigger can
    /// never fire (an impossible month/day combination), which registration
    /// treats as an error.
    pub fn next_after(&self, after: DateTime<FixedOffset>) -> Option<DateTime<FixedOffset>> {
        match self {
            Trigger::Every(every) => {
                let every = chrono::Duration::from_std(*every).ok()?;
                after.checked_add_signed(every)
            }
            Trigger::Calendar(calendar) => calendar.next_after(after),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CalendarTrigger {
    pub hour: u32,
    pub minute: u32,
    pub weekday: Option<Weekday>,
    pub day: Option<u32>,
    pub month: Option<u32>,
}

impl CalendarTrigger {
    pub fn daily_at(hour: u32, minute: u32) -> Self {
        Self {
            hour,
            minute,
            weekday: None,
            day: None,
            month: None,
        }
    }

    pub fn weekly_on(weekday: Weekday, hour: u32, minute: u32) -> Self {
        Self {
            weekday: Some(weekday),
            ..Self::daily_at(hour, minute)
        }
    }

    pub fn monthly_on(day: u32, hour: u32, minute: u32) -> Self {
        Self {
            day: Some(day),
            ..Self::daily_at(hour, minute)
        }
    }

    pub fn yearly_on(month: u32, day: u32, hour: u32, minute: u32) -> Self {
        Self {
            month: Some(month),
            day: Some(day),
            ..Self::daily_at(hour, minute)
        }
    }

    fn matches_date(&self, date: NaiveDate) -> bool {
        self.weekday.map_or(true, |w| date.weekday() == w)
            && self.day.map_or(true, |d| date.day() == d)
            && self.month.map_or(true, |m| date.month() == m)
    }

    /// Walk forward day by day to the first matching date whose hh:mm lies
    /// strictly after `after`. Two years is enough for any satisfiable
    /// weekday/day/month combination.
    fn next_after(&self, after: DateTime<FixedOffset>) -> Option<DateTime<FixedOffset>> {
        let tz = *after.offset();
        let mut date = after.date_naive();
        for _ in 0..=(2 * 366) {
            if self.matches_date(date) {
                let naive = date.and_hms_opt(self.hour, self.minute, 0)?;
                let candidate = tz.from_local_datetime(&naive).single()?;
                if candidate > after {
                    return Some(candidate);
                }
            }
            date = date.succ_opt()?;
        }
        None
    }
}
