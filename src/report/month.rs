use chrono::{Datelike, Local, NaiveDate};

use crate::error::ApiError;
use crate::model::dashboard::DashboardQuery;

const NAMA_BULAN: [&str; 12] = [
    "Januari", "Februari", "Maret", "April", "Mei", "Juni", "Juli", "Agustus", "September",
    "Oktober", "November", "Desember",
];

/// A calendar month that dashboard queries are scoped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportMonth {
    first_day: NaiveDate,
}

impl ReportMonth {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|first_day| Self { first_day })
    }

    pub fn containing(date: NaiveDate) -> Self {
        Self {
            first_day: date.with_day(1).unwrap_or(date),
        }
    }

    pub fn current() -> Self {
        Self::containing(Local::now().date_naive())
    }

    pub fn from_query(query: &DashboardQuery) -> Result<Self, ApiError> {
        match (query.tahun, query.bulan) {
            (None, None) => Ok(Self::current()),
            (Some(year), Some(month)) => Self::new(year, month).ok_or_else(|| {
                ApiError::Validation(format!("Bulan tidak valid: {year}-{month:02}"))
            }),
            _ => Err(ApiError::Validation(
                "Tahun dan bulan harus diisi bersamaan".to_string(),
            )),
        }
    }

    pub fn year(&self) -> i32 {
        self.first_day.year()
    }

    pub fn month(&self) -> u32 {
        self.first_day.month()
    }

    pub fn first_day(&self) -> NaiveDate {
        self.first_day
    }

    /// Exclusive upper bound for `tanggal` range predicates.
    pub fn next_first_day(&self) -> NaiveDate {
        let (year, month) = if self.month() == 12 {
            (self.year() + 1, 1)
        } else {
            (self.year(), self.month() + 1)
        };
        NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(NaiveDate::MAX)
    }

    pub fn days(&self) -> u32 {
        self.next_first_day()
            .signed_duration_since(self.first_day)
            .num_days() as u32
    }

    /// e.g. "Maret 2024"
    pub fn label(&self) -> String {
        format!("{} {}", NAMA_BULAN[self.first_day.month0() as usize], self.year())
    }
}

/// e.g. "1 Maret 2024"
pub fn tanggal_label(date: NaiveDate) -> String {
    format!("{} {} {}", date.day(), NAMA_BULAN[date.month0() as usize], date.year())
}
