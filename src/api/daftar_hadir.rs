use actix_web::{HttpResponse, web};
use sqlx::MySqlPool;
use tracing::{debug, info, warn};

use crate::error::{ApiError, DUPLICATE_ATTENDANCE, is_unique_violation};
use crate::model::daftar_hadir::{CreateDaftarHadir, DaftarHadir, DaftarHadirQuery};
use crate::store;

/// Guard self check-in
#[utoipa::path(
    post,
    path = "/daftar-hadir/create",
    request_body(
        content = CreateDaftarHadir,
        description = "Check-in payload",
        content_type = "application/json"
    ),
    responses(
        (status = 201, description = "Check-in stored", body = DaftarHadir),
        (status = 400, description = "Missing field, invalid value or already checked in", body = Object, example = json!({
            "message": "Anda sudah mengisi daftar hadir untuk shift ini!"
        })),
        (status = 500, description = "Store error", body = Object, example = json!({
            "message": "Gagal menyimpan daftar hadir",
            "error": "pool timed out while waiting for an open connection"
        }))
    ),
    tag = "Daftar Hadir"
)]
pub async fn create_daftar_hadir(
    pool: web::Data<MySqlPool>,
    payload: web::Json<CreateDaftarHadir>,
) -> Result<HttpResponse, ApiError> {
    debug!(payload = ?payload, "Daftar hadir diterima");
    let new = payload.validate()?;

    match store::daftar_hadir::create(pool.get_ref(), &new).await {
        Ok(record) => {
            info!(id = record.id, nama = %record.nama, tanggal = %record.tanggal, shift = %record.shift, "Daftar hadir disimpan");
            Ok(HttpResponse::Created().json(record))
        }
        Err(e) if is_unique_violation(&e) => {
            warn!(nama = %new.nama, tanggal = %new.tanggal, shift = %new.shift, "Duplicate check-in rejected");
            Err(ApiError::Conflict(DUPLICATE_ATTENDANCE.to_string()))
        }
        Err(e) => Err(ApiError::store("Gagal menyimpan daftar hadir")(e)),
    }
}

/// List attendance, optionally filtered, ordered by tanggal then shift
#[utoipa::path(
    get,
    path = "/daftar-hadir",
    params(DaftarHadirQuery),
    responses(
        (status = 200, description = "Matching records", body = [DaftarHadir]),
        (status = 400, description = "Invalid filter value"),
        (status = 500, description = "Store error")
    ),
    tag = "Daftar Hadir"
)]
pub async fn list_daftar_hadir(
    pool: web::Data<MySqlPool>,
    query: web::Query<DaftarHadirQuery>,
) -> Result<HttpResponse, ApiError> {
    debug!(query = ?query, "Daftar hadir diminta");
    let filter = query.to_filter()?;

    let records = store::daftar_hadir::find_all(pool.get_ref(), &filter)
        .await
        .map_err(ApiError::store("Gagal mengambil daftar hadir"))?;

    Ok(HttpResponse::Ok().json(records))
}
