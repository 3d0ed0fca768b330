use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use super::daftar_hadir::Status;

/// Optional month override for the dashboard. Both or neither.
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct DashboardQuery {
    #[schema(example = 2024)]
    pub tahun: Option<i32>,
    /// 1..=12
    #[schema(example = 3)]
    pub bulan: Option<u32>,
}

/// Per-status counters. Statuses outside the four known labels are ignored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct StatusTally {
    pub hadir: i64,
    pub izin: i64,
    pub sakit: i64,
    pub alpha: i64,
}

impl StatusTally {
    pub fn add(&mut self, status: &str, count: i64) {
        match status.parse::<Status>() {
            Ok(Status::Present) => self.hadir += count,
            Ok(Status::Leave) => self.izin += count,
            Ok(Status::Sick) => self.sakit += count,
            Ok(Status::Absent) => self.alpha += count,
            Err(_) => {}
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    /// Distinct guard names across all time
    pub total_satpam: i64,
    #[serde(flatten)]
    pub tally: StatusTally,
    /// Activity-log entries in the selected month
    pub laporan_bulan_ini: i64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DailyReport {
    pub day: u32,
    pub pagi: i64,
    pub malam: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SatpamAttendance {
    pub nama: String,
    #[serde(flatten)]
    pub tally: StatusTally,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyRecap {
    pub nama: String,
    #[serde(flatten)]
    pub tally: StatusTally,
    pub shift_pagi: i64,
    pub shift_malam: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    pub stats: DashboardStats,
    pub daily_reports: Vec<DailyReport>,
    pub attendance_data: Vec<SatpamAttendance>,
    pub monthly_recap: Vec<MonthlyRecap>,
}

// Grouped-query rows. COUNT(*) comes back as BIGINT.

#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct StatusCount {
    pub status: String,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct DayShiftCount {
    pub day: i64,
    pub shift: String,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct NamaStatusCount {
    pub nama: String,
    pub status: String,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct NamaStatusShiftCount {
    pub nama: String,
    pub status: String,
    pub shift: String,
    pub count: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn stats_serialize_flat_in_camel_case() {
        let stats = DashboardStats {
            total_satpam: 4,
            tally: StatusTally {
                hadir: 10,
                izin: 1,
                sakit: 2,
                alpha: 0,
            },
            laporan_bulan_ini: 7,
        };
        assert_eq!(
            serde_json::to_value(stats).unwrap(),
            json!({
                "totalSatpam": 4,
                "hadir": 10,
                "izin": 1,
                "sakit": 2,
                "alpha": 0,
                "laporanBulanIni": 7
            })
        );
    }

    #[test]
    fn recap_row_uses_frontend_keys() {
        let row = MonthlyRecap {
            nama: "Agus".into(),
            tally: StatusTally::default(),
            shift_pagi: 3,
            shift_malam: 1,
        };
        let value = serde_json::to_value(row).unwrap();
        assert_eq!(value["shiftPagi"], 3);
        assert_eq!(value["shiftMalam"], 1);
        assert_eq!(value["hadir"], 0);
    }

    #[test]
    fn unknown_status_label_is_ignored() {
        let mut tally = StatusTally::default();
        tally.add("Hadir", 2);
        tally.add("Cuti", 5);
        tally.add("Alpha", 1);
        assert_eq!(
            tally,
            StatusTally {
                hadir: 2,
                izin: 0,
                sakit: 0,
                alpha: 1
            }
        );
    }
}
