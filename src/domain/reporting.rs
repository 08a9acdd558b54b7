//! Revenue aggregation and chart bucketing.
//!
//! Pure functions over a caller-supplied service list and date range. A
//! record whose stored date does not parse is skipped everywhere in this
//! module; it stays in the collection but never reaches a chart or summary.

use crate::domain::models::Service;
use chrono::{Datelike, Duration, Months, NaiveDate, Weekday};
use std::collections::BTreeMap;

/// Revenue totals for a set of services. `total == cash + online` always
/// holds.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RevenueSummary {
    pub total: f64,
    pub cash: f64,
    pub online: f64,
    pub count: usize,
}

/// One calendar day of a chart series.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyBucket {
    pub date: NaiveDate,
    pub total: f64,
    pub count: usize,
}

/// One calendar month of a chart series. `month` is the first day of the
/// month.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyBucket {
    pub month: NaiveDate,
    pub total: f64,
    pub count: usize,
}

/// Single linear reduction of a service list into revenue totals.
pub fn summarize(services: &[Service]) -> RevenueSummary {
    services.iter().fold(RevenueSummary::default(), |mut acc, service| {
        acc.total += service.price;
        if service.payment_method.is_cash() {
            acc.cash += service.price;
        } else {
            acc.online += service.price;
        }
        acc.count += 1;
        acc
    })
}

/// Filter to the services whose date parses and falls in `[start, end]`
/// inclusive.
pub fn services_in_range(services: &[Service], start: NaiveDate, end: NaiveDate) -> Vec<Service> {
    services
        .iter()
        .filter(|s| matches!(s.parsed_date(), Some(d) if d >= start && d <= end))
        .cloned()
        .collect()
}

/// One entry per calendar day in `[start, end]` inclusive, zero-filled for
/// days without services, chronologically ascending.
pub fn bucket_by_day(services: &[Service], start: NaiveDate, end: NaiveDate) -> Vec<DailyBucket> {
    let mut by_day: BTreeMap<NaiveDate, (f64, usize)> = BTreeMap::new();
    let mut day = start;
    while day <= end {
        by_day.insert(day, (0.0, 0));
        match day.succ_opt() {
            Some(next) => day = next,
            None => break,
        }
    }
    for service in services {
        if let Some(date) = service.parsed_date() {
            if let Some(entry) = by_day.get_mut(&date) {
                entry.0 += service.price;
                entry.1 += 1;
            }
        }
    }
    by_day
        .into_iter()
        .map(|(date, (total, count))| DailyBucket { date, total, count })
        .collect()
}

/// One entry per calendar month present in the data (no zero fill),
/// chronologically ascending. Used for the long ranges where a daily series
/// would be unreadable.
pub fn bucket_by_month(services: &[Service]) -> Vec<MonthlyBucket> {
    let mut by_month: BTreeMap<NaiveDate, (f64, usize)> = BTreeMap::new();
    for service in services {
        if let Some(date) = service.parsed_date() {
            let month_start = date.with_day(1).unwrap_or(date);
            let entry = by_month.entry(month_start).or_insert((0.0, 0));
            entry.0 += service.price;
            entry.1 += 1;
        }
    }
    by_month
        .into_iter()
        .map(|(month, (total, count))| MonthlyBucket { month, total, count })
        .collect()
}

/// Named analytics ranges offered by the period selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportRange {
    /// Monday through Sunday of the current week.
    ThisWeek,
    /// The trailing 15 days, today included.
    Fortnight,
    ThisMonth,
    /// The trailing six calendar months, current month included.
    Semester,
    ThisYear,
    /// From the oldest to the newest record in the collection.
    AllTime,
}

impl ReportRange {
    /// Concrete `[start, end]` boundaries for this range. `services` is only
    /// consulted for `AllTime`, which degenerates to `(today, today)` when
    /// the collection is empty or no date parses.
    pub fn resolve(&self, today: NaiveDate, services: &[Service]) -> (NaiveDate, NaiveDate) {
        match self {
            ReportRange::ThisWeek => {
                let week = today.week(Weekday::Mon);
                (week.first_day(), week.last_day())
            }
            ReportRange::Fortnight => (today - Duration::days(14), today),
            ReportRange::ThisMonth => (month_start(today), month_end(today)),
            ReportRange::Semester => {
                let start = month_start(today)
                    .checked_sub_months(Months::new(5))
                    .unwrap_or_else(|| month_start(today));
                (start, month_end(today))
            }
            ReportRange::ThisYear => {
                let start = NaiveDate::from_ymd_opt(today.year(), 1, 1).unwrap_or(today);
                let end = NaiveDate::from_ymd_opt(today.year(), 12, 31).unwrap_or(today);
                (start, end)
            }
            ReportRange::AllTime => {
                let mut dates = services.iter().filter_map(|s| s.parsed_date());
                match dates.next() {
                    Some(first) => {
                        let (min, max) = dates.fold((first, first), |(min, max), d| {
                            (min.min(d), max.max(d))
                        });
                        (min, max)
                    }
                    None => (today, today),
                }
            }
        }
    }
}

fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

fn month_end(date: NaiveDate) -> NaiveDate {
    month_start(date)
        .checked_add_months(Months::new(1))
        .map(|next| next - Duration::days(1))
        .unwrap_or(date)
}
