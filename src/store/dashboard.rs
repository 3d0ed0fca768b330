//! Grouped queries behind the dashboard. Every month-scoped query uses the
//! half-open range `[first day, first day of next month)` on `tanggal`.

use sqlx::MySqlPool;

use crate::model::dashboard::{DayShiftCount, NamaStatusCount, NamaStatusShiftCount, StatusCount};
use crate::report::month::ReportMonth;

/// Distinct guard names ever recorded, not limited to one month.
pub async fn count_satpam(pool: &MySqlPool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(DISTINCT nama) FROM daftar_hadir")
        .fetch_one(pool)
        .await
}

pub async fn count_kegiatan(pool: &MySqlPool, month: ReportMonth) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM input_kegiatan WHERE tanggal >= ? AND tanggal < ?",
    )
    .bind(month.first_day())
    .bind(month.next_first_day())
    .fetch_one(pool)
    .await
}

pub async fn status_counts(
    pool: &MySqlPool,
    month: ReportMonth,
) -> Result<Vec<StatusCount>, sqlx::Error> {
    sqlx::query_as::<_, StatusCount>(
        r#"
        SELECT status, COUNT(*) AS `count`
        FROM daftar_hadir
        WHERE tanggal >= ? AND tanggal < ?
        GROUP BY status
        "#,
    )
    .bind(month.first_day())
    .bind(month.next_first_day())
    .fetch_all(pool)
    .await
}

pub async fn daily_counts(
    pool: &MySqlPool,
    month: ReportMonth,
) -> Result<Vec<DayShiftCount>, sqlx::Error> {
    sqlx::query_as::<_, DayShiftCount>(
        r#"
        SELECT CAST(DAY(tanggal) AS SIGNED) AS `day`, shift, COUNT(*) AS `count`
        FROM input_kegiatan
        WHERE tanggal >= ? AND tanggal < ?
        GROUP BY `day`, shift
        ORDER BY `day`, shift
        "#,
    )
    .bind(month.first_day())
    .bind(month.next_first_day())
    .fetch_all(pool)
    .await
}

pub async fn nama_status_counts(
    pool: &MySqlPool,
    month: ReportMonth,
) -> Result<Vec<NamaStatusCount>, sqlx::Error> {
    sqlx::query_as::<_, NamaStatusCount>(
        r#"
        SELECT nama, status, COUNT(*) AS `count`
        FROM daftar_hadir
        WHERE tanggal >= ? AND tanggal < ?
        GROUP BY nama, status
        ORDER BY nama
        "#,
    )
    .bind(month.first_day())
    .bind(month.next_first_day())
    .fetch_all(pool)
    .await
}

pub async fn nama_status_shift_counts(
    pool: &MySqlPool,
    month: ReportMonth,
) -> Result<Vec<NamaStatusShiftCount>, sqlx::Error> {
    sqlx::query_as::<_, NamaStatusShiftCount>(
        r#"
        SELECT nama, status, shift, COUNT(*) AS `count`
        FROM daftar_hadir
        WHERE tanggal >= ? AND tanggal < ?
        GROUP BY nama, status, shift
        ORDER BY nama
        "#,
    )
    .bind(month.first_day())
    .bind(month.next_first_day())
    .fetch_all(pool)
    .await
}
