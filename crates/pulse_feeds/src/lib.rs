//! News and economic-calendar providers behind the `NewsSource` and
//! `CalendarSource` capabilities.

pub mod calendar;
pub mod dummy;
pub mod newsdata;

pub use calendar::WeeklyCalendarClient;
pub use dummy::{StaticCalendar, StaticNews};
pub use newsdata::NewsDataClient;

pub mod prelude {
    pub use pulse_core::{CalendarSource, NewsSource, Result};
}
