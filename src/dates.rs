//! Date formatting for printed documents and service-duration arithmetic.

use chrono::{Datelike, Months, NaiveDate};

const MONTHS_FR: [&str; 12] = [
    "janvier",
    "février",
    "mars",
    "avril",
    "mai",
    "juin",
    "juillet",
    "août",
    "septembre",
    "octobre",
    "novembre",
    "décembre",
];

/// Long French date: `12 mars 2024`, `1er janvier 2020`.
pub fn format_date_long(date: NaiveDate) -> String {
    let day = match date.day() {
        1 => "1er".to_string(),
        d => d.to_string(),
    };
    let month = MONTHS_FR[date.month0() as usize];
    format!("{day} {month} {year}", year = date.year())
}

/// Short numeric date: `05/03/2024`.
pub fn format_date_short(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Short date for optional values, `-` when absent.
pub fn format_opt_date(date: Option<NaiveDate>) -> String {
    date.map(format_date_short).unwrap_or_else(|| "-".to_string())
}

/// Elapsed calendar time between two dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ServiceDuration {
    pub years: u32,
    pub months: u32,
    pub days: u32,
}

impl ServiceDuration {
    pub fn is_zero(&self) -> bool {
        self.years == 0 && self.months == 0 && self.days == 0
    }

    /// French wording: `3 ans, 2 mois et 5 jours`. Zero parts are omitted.
    pub fn to_french(&self) -> String {
        let mut parts = Vec::new();
        if self.years > 0 {
            parts.push(format!("{} {}", self.years, if self.years == 1 { "an" } else { "ans" }));
        }
        if self.months > 0 {
            parts.push(format!("{} mois", self.months));
        }
        if self.days > 0 {
            parts.push(format!("{} {}", self.days, if self.days == 1 { "jour" } else { "jours" }));
        }

        match parts.len() {
            0 => "0 jour".to_string(),
            1 => parts.remove(0),
            _ => {
                let last = parts.pop().unwrap_or_default();
                format!("{} et {last}", parts.join(", "))
            }
        }
    }

    /// Compact form for table cells: `3y 2m 5d`.
    pub fn to_short(&self) -> String {
        format!("{}y {}m {}d", self.years, self.months, self.days)
    }
}

/// Years, months and days from `from` to `to`.
///
/// Month steps clamp to the end of shorter months, so 31 January plus one
/// month is 28/29 February. Returns zero when `to` is before `from`.
pub fn service_duration(from: NaiveDate, to: NaiveDate) -> ServiceDuration {
    if to <= from {
        return ServiceDuration::default();
    }

    let mut total_months = ((to.year() - from.year()) * 12 + to.month() as i32 - from.month() as i32).max(0) as u32;

    let anchor = loop {
        match from.checked_add_months(Months::new(total_months)) {
            Some(anchor) if anchor <= to => break anchor,
            _ if total_months == 0 => break from,
            _ => total_months -= 1,
        }
    };

    ServiceDuration {
        years: total_months / 12,
        months: total_months % 12,
        days: (to - anchor).num_days() as u32,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_format_date_long() {
        assert_eq!(format_date_long(d(2024, 3, 12)), "12 mars 2024");
        assert_eq!(format_date_long(d(2020, 1, 1)), "1er janvier 2020");
        assert_eq!(format_date_long(d(2019, 8, 31)), "31 août 2019");
    }

    #[test]
    fn test_format_date_short() {
        assert_eq!(format_date_short(d(2024, 3, 5)), "05/03/2024");
        assert_eq!(format_opt_date(None), "-");
    }

    #[test]
    fn test_duration_exact_years() {
        let dur = service_duration(d(2010, 6, 15), d(2020, 6, 15));
        assert_eq!(dur, ServiceDuration { years: 10, months: 0, days: 0 });
    }

    #[test]
    fn test_duration_mixed() {
        let dur = service_duration(d(2015, 1, 10), d(2018, 3, 15));
        assert_eq!(dur, ServiceDuration { years: 3, months: 2, days: 5 });
    }

    #[test]
    fn test_duration_month_end_clamp() {
        let dur = service_duration(d(2023, 1, 31), d(2023, 3, 1));
        assert_eq!(dur, ServiceDuration { years: 0, months: 1, days: 1 });
    }

    #[test]
    fn test_duration_day_borrow() {
        let dur = service_duration(d(2020, 5, 20), d(2021, 5, 10));
        assert_eq!(dur, ServiceDuration { years: 0, months: 11, days: 20 });
    }

    #[test]
    fn test_duration_reversed_is_zero() {
        assert!(service_duration(d(2021, 1, 1), d(2020, 1, 1)).is_zero());
    }

    #[test]
    fn test_french_wording() {
        let full = ServiceDuration { years: 3, months: 2, days: 5 };
        assert_eq!(full.to_french(), "3 ans, 2 mois et 5 jours");

        let singular = ServiceDuration { years: 1, months: 0, days: 1 };
        assert_eq!(singular.to_french(), "1 an et 1 jour");

        let months_only = ServiceDuration { years: 0, months: 7, days: 0 };
        assert_eq!(months_only.to_french(), "7 mois");

        assert_eq!(ServiceDuration::default().to_french(), "0 jour");
    }
}
