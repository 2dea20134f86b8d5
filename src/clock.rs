use chrono::{Datelike, Local, NaiveDateTime};

use crate::years::{be_year, classify, YearBuckets};

/// Source of the current date and time.
pub(crate) trait Clock {
    fn now(&self) -> NaiveDateTime;

    /// Current year in the Buddhist Era.
    fn buddhist_year(&self) -> i32 {
        be_year(self.now().year())
    }

    /// Fiscal, academic and calendar year of today.
    fn today_buckets(&self) -> YearBuckets {
        classify(self.buddhist_year(), self.now().month())
    }
}

pub(crate) struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

#[cfg(test)]
pub(crate) struct FixedClock(pub(crate) NaiveDateTime);

#[cfg(test)]
impl FixedClock {
    /// Clock frozen at 10:30 on the given Gregorian date.
    #[allow(clippy::unwrap_used)]
    pub(crate) fn at(year: i32, month: u32, day: u32) -> Self {
        let dt = chrono::NaiveDate::from_ymd_opt(year, month, day)
            .unwrap()
            .and_hms_opt(10, 30, 0)
            .unwrap();
        Self(dt)
    }
}

#[cfg(test)]
impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}
