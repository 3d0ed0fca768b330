//! In-memory merge passes that turn grouped query rows into dashboard rows.
//!
//! The daily series is dense: every day of the month appears, zero-filled.
//! The per-guard outputs are sparse: a guard only appears when at least one
//! grouped row mentions them, in the order the rows arrive.

use std::collections::HashMap;

use crate::model::daftar_hadir::Shift;
use crate::model::dashboard::{
    DailyReport, DayShiftCount, MonthlyRecap, NamaStatusCount, NamaStatusShiftCount,
    SatpamAttendance, StatusCount, StatusTally,
};
use crate::report::month::ReportMonth;

pub fn status_totals(rows: &[StatusCount]) -> StatusTally {
    let mut tally = StatusTally::default();
    for row in rows {
        tally.add(&row.status, row.count);
    }
    tally
}

pub fn daily_reports(month: ReportMonth, rows: &[DayShiftCount]) -> Vec<DailyReport> {
    let mut days: Vec<DailyReport> = (1..=month.days())
        .map(|day| DailyReport {
            day,
            ..Default::default()
        })
        .collect();

    for row in rows {
        let Some(slot) = usize::try_from(row.day - 1).ok().and_then(|i| days.get_mut(i)) else {
            continue;
        };
        match row.shift.parse::<Shift>() {
            Ok(Shift::Morning) => slot.pagi += row.count,
            Ok(Shift::Night) => slot.malam += row.count,
            Err(_) => {}
        }
    }

    days
}

/// Keeps first-seen order of names while merging repeated keys.
struct ByName<T> {
    index: HashMap<String, usize>,
    rows: Vec<T>,
}

impl<T> ByName<T> {
    fn new() -> Self {
        Self {
            index: HashMap::new(),
            rows: Vec::new(),
        }
    }

    fn entry(&mut self, nama: &str, init: impl FnOnce() -> T) -> &mut T {
        let idx = match self.index.get(nama) {
            Some(&idx) => idx,
            None => {
                self.rows.push(init());
                self.index.insert(nama.to_string(), self.rows.len() - 1);
                self.rows.len() - 1
            }
        };
        &mut self.rows[idx]
    }
}

pub fn attendance_per_satpam(rows: &[NamaStatusCount]) -> Vec<SatpamAttendance> {
    let mut merged = ByName::new();
    for row in rows {
        merged
            .entry(&row.nama, || SatpamAttendance {
                nama: row.nama.clone(),
                tally: StatusTally::default(),
            })
            .tally
            .add(&row.status, row.count);
    }
    merged.rows
}

pub fn monthly_recap(rows: &[NamaStatusShiftCount]) -> Vec<MonthlyRecap> {
    let mut merged = ByName::new();
    for row in rows {
        let recap = merged.entry(&row.nama, || MonthlyRecap {
            nama: row.nama.clone(),
            tally: StatusTally::default(),
            shift_pagi: 0,
            shift_malam: 0,
        });
        recap.tally.add(&row.status, row.count);
        match row.shift.parse::<Shift>() {
            Ok(Shift::Morning) => recap.shift_pagi += row.count,
            Ok(Shift::Night) => recap.shift_malam += row.count,
            Err(_) => {}
        }
    }
    merged.rows
}
