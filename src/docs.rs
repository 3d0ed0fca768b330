use crate::model::daftar_hadir::{CreateDaftarHadir, DaftarHadir, DaftarHadirQuery, Shift, Status};
use crate::model::dashboard::{
    DailyReport, DashboardQuery, DashboardResponse, DashboardStats, MonthlyRecap, SatpamAttendance,
    StatusTally,
};
use crate::model::kegiatan::{CreateKegiatan, Kegiatan, LaporanQuery, LaporanResponse};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Satpam Attendance API",
        version = "0.1.0",
        description = r#"
## Daftar Hadir & Laporan Kegiatan Satpam

Attendance and activity-report tracker for the security-guard roster of
**BPS Kabupaten Tuban**.

### Features
- **Daftar Hadir**: guard self check-in per shift (Pagi / Malam), one per guard per shift
- **Laporan Kegiatan**: timestamped activity-log entries per shift
- **Dashboard**: monthly status totals, daily activity series, per-guard recap
- **PDF**: printable shift report and monthly recap

### Response Format
JSON everywhere except the PDF endpoints. Errors are `{"message": "..."}`;
store failures add an `error` field with the underlying cause.
"#,
    ),
    paths(
        crate::api::daftar_hadir::create_daftar_hadir,
        crate::api::daftar_hadir::list_daftar_hadir,

        crate::api::laporan::get_laporan,
        crate::api::laporan::create_kegiatan,
        crate::api::laporan::get_dashboard,
        crate::api::laporan::laporan_pdf,
        crate::api::laporan::dashboard_pdf,
    ),
    components(
        schemas(
            Shift,
            Status,
            DaftarHadir,
            CreateDaftarHadir,
            DaftarHadirQuery,
            Kegiatan,
            CreateKegiatan,
            LaporanQuery,
            LaporanResponse,
            DashboardQuery,
            StatusTally,
            DashboardStats,
            DailyReport,
            SatpamAttendance,
            MonthlyRecap,
            DashboardResponse
        )
    ),
    tags(
        (name = "Daftar Hadir", description = "Attendance check-in APIs"),
        (name = "Laporan", description = "Activity log, dashboard and report APIs"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_route_is_documented() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&str> = doc.paths.paths.keys().map(String::as_str).collect();
        for expected in [
            "/daftar-hadir/create",
            "/daftar-hadir",
            "/laporan",
            "/laporan/create",
            "/laporan/dashboard",
            "/laporan/pdf",
            "/laporan/dashboard/pdf",
        ] {
            assert!(paths.contains(&expected), "missing {expected}");
        }
    }
}
