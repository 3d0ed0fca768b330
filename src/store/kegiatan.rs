use sqlx::MySqlPool;
use tracing::debug;

use super::daftar_hadir::{bind_all, where_clause};
use crate::model::daftar_hadir::AttendanceFilter;
use crate::model::kegiatan::{Kegiatan, NewKegiatan};

pub async fn create(pool: &MySqlPool, new: &NewKegiatan) -> Result<Kegiatan, sqlx::Error> {
    let result = sqlx::query(
        r#"
        INSERT INTO input_kegiatan (tanggal, shift, jam, kegiatan)
        VALUES (?, ?, ?, ?)
        "#,
    )
    .bind(new.tanggal)
    .bind(new.shift.as_str())
    .bind(&new.jam)
    .bind(&new.kegiatan)
    .execute(pool)
    .await?;

    Ok(Kegiatan {
        id: result.last_insert_id(),
        tanggal: new.tanggal,
        shift: new.shift.to_string(),
        jam: new.jam.clone(),
        kegiatan: new.kegiatan.clone(),
    })
}

/// Log entries of a shift in the order they were written down. Only the
/// `tanggal` and `shift` parts of the filter apply to this table.
pub async fn find_all(
    pool: &MySqlPool,
    filter: &AttendanceFilter,
) -> Result<Vec<Kegiatan>, sqlx::Error> {
    let scoped = AttendanceFilter {
        nama: None,
        ..filter.clone()
    };
    let (where_sql, args) = where_clause(&scoped);
    let sql = format!(
        "SELECT id, tanggal, shift, jam, kegiatan FROM input_kegiatan{} ORDER BY tanggal ASC, jam ASC, id ASC",
        where_sql
    );
    debug!(sql = %sql, args = ?args, "Fetching kegiatan");

    bind_all(sqlx::query_as::<_, Kegiatan>(&sql), args)
        .fetch_all(pool)
        .await
}
