//! Seven weekday flags.

use chrono::Weekday;
use serde::{Deserialize, Serialize};

/// Check-in flags for Monday through Sunday.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[expect(
    clippy::struct_excessive_bools,
    reason = "one flag per weekday mirrors the stored columns"
)]
pub struct WeekDays {
    /// Monday.
    pub mon: bool,
    /// Tuesday.
    pub tue: bool,
    /// Wednesday.
    pub wed: bool,
    /// Thursday.
    pub thu: bool,
    /// Friday.
    pub fri: bool,
    /// Saturday.
    pub sat: bool,
    /// Sunday.
    pub sun: bool,
}

impl WeekDays {
    /// Returns whether `day` is checked.
    #[must_use]
    pub const fn is_checked(&self, day: Weekday) -> bool {
        match day {
            Weekday::Mon => self.mon,
            Weekday::Tue => self.tue,
            Weekday::Wed => self.wed,
            Weekday::Thu => self.thu,
            Weekday::Fri => self.fri,
            Weekday::Sat => self.sat,
            Weekday::Sun => self.sun,
        }
    }

    /// Marks `day` as checked.
    pub const fn check(&mut self, day: Weekday) {
        let flag = match day {
            Weekday::Mon => &mut self.mon,
            Weekday::Tue => &mut self.tue,
            Weekday::Wed => &mut self.wed,
            Weekday::Thu => &mut self.thu,
            Weekday::Fri => &mut self.fri,
            Weekday::Sat => &mut self.sat,
            Weekday::Sun => &mut self.sun,
        };
        *flag = true;
    }

    /// Returns the number of checked days.
    #[must_use]
    pub fn count(&self) -> u8 {
        [
            self.mon, self.tue, self.wed, self.thu, self.fri, self.sat, self.sun,
        ]
        .into_iter()
        .map(u8::from)
        .sum()
    }
}
