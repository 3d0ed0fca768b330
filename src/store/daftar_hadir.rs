use chrono::NaiveDate;
use sqlx::MySqlPool;
use sqlx::mysql::MySqlArguments;
use sqlx::query::QueryAs;
use tracing::debug;

use crate::model::daftar_hadir::{AttendanceFilter, DaftarHadir, NewDaftarHadir};

// Helper enum for typed SQLx binding
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue<'a> {
    Date(NaiveDate),
    Str(&'a str),
}

/// `WHERE` clause for the populated fields of `filter`, in tanggal, shift, nama order.
pub fn where_clause(filter: &AttendanceFilter) -> (String, Vec<FilterValue<'_>>) {
    let mut where_sql = String::from(" WHERE 1=1");
    let mut args = Vec::new();

    if let Some(tanggal) = filter.tanggal {
        where_sql.push_str(" AND tanggal = ?");
        args.push(FilterValue::Date(tanggal));
    }
    if let Some(shift) = filter.shift {
        where_sql.push_str(" AND shift = ?");
        args.push(FilterValue::Str(shift.as_str()));
    }
    if let Some(nama) = filter.nama.as_deref() {
        where_sql.push_str(" AND nama = ?");
        args.push(FilterValue::Str(nama));
    }

    (where_sql, args)
}

/// Listing query for `filter`, ordered by tanggal then shift.
pub fn select_sql(filter: &AttendanceFilter) -> (String, Vec<FilterValue<'_>>) {
    let (where_sql, args) = where_clause(filter);
    let sql = format!(
        "SELECT id, tanggal, shift, nama, status FROM daftar_hadir{} ORDER BY tanggal ASC, shift ASC",
        where_sql
    );
    (sql, args)
}

pub fn bind_all<'q, O>(
    mut query: QueryAs<'q, sqlx::MySql, O, MySqlArguments>,
    args: Vec<FilterValue<'q>>,
) -> QueryAs<'q, sqlx::MySql, O, MySqlArguments> {
    for arg in args {
        query = match arg {
            FilterValue::Date(d) => query.bind(d),
            FilterValue::Str(s) => query.bind(s),
        };
    }
    query
}

/// Inserts one check-in. The `(tanggal, shift, nama)` unique key rejects a
/// second row for the same guard and shift with SQLSTATE 23000.
pub async fn create(pool: &MySqlPool, new: &NewDaftarHadir) -> Result<DaftarHadir, sqlx::Error> {
    let result = sqlx::query(
        r#"
        INSERT INTO daftar_hadir (tanggal, shift, nama, status)
        VALUES (?, ?, ?, ?)
        "#,
    )
    .bind(new.tanggal)
    .bind(new.shift.as_str())
    .bind(&new.nama)
    .bind(new.status.as_str())
    .execute(pool)
    .await?;

    Ok(DaftarHadir {
        id: result.last_insert_id(),
        tanggal: new.tanggal,
        shift: new.shift.to_string(),
        nama: new.nama.clone(),
        status: new.status.to_string(),
    })
}

pub async fn find_all(
    pool: &MySqlPool,
    filter: &AttendanceFilter,
) -> Result<Vec<DaftarHadir>, sqlx::Error> {
    let (sql, args) = select_sql(filter);
    debug!(sql = %sql, args = ?args, "Fetching daftar hadir");

    bind_all(sqlx::query_as::<_, DaftarHadir>(&sql), args)
        .fetch_all(pool)
        .await
}
