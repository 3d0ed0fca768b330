use actix_web::http::header::{ContentDisposition, DispositionParam, DispositionType};
use actix_web::{HttpResponse, web};
use sqlx::MySqlPool;
use tracing::{debug, info};

use crate::error::ApiError;
use crate::model::daftar_hadir::AttendanceFilter;
use crate::model::dashboard::{DashboardQuery, DashboardResponse, DashboardStats};
use crate::model::kegiatan::{CreateKegiatan, Kegiatan, LaporanQuery, LaporanResponse};
use crate::report::month::ReportMonth;
use crate::report::{pdf, recap};
use crate::store;

async fn load_laporan(pool: &MySqlPool, filter: &AttendanceFilter) -> Result<LaporanResponse, ApiError> {
    let (kegiatan, attendance) = futures::try_join!(
        store::kegiatan::find_all(pool, filter),
        store::daftar_hadir::find_all(pool, filter),
    )
    .map_err(ApiError::store("Gagal ambil laporan"))?;

    Ok(LaporanResponse {
        kegiatan,
        attendance,
    })
}

/// Each figure is a separate grouped query, merged afterwards.
async fn load_dashboard(pool: &MySqlPool, month: ReportMonth) -> Result<DashboardResponse, ApiError> {
    let (total_satpam, laporan_bulan_ini, status_rows, daily_rows, per_satpam_rows, recap_rows) =
        futures::try_join!(
            store::dashboard::count_satpam(pool),
            store::dashboard::count_kegiatan(pool, month),
            store::dashboard::status_counts(pool, month),
            store::dashboard::daily_counts(pool, month),
            store::dashboard::nama_status_counts(pool, month),
            store::dashboard::nama_status_shift_counts(pool, month),
        )
        .map_err(ApiError::store("Gagal ambil data dashboard"))?;

    Ok(DashboardResponse {
        stats: DashboardStats {
            total_satpam,
            tally: recap::status_totals(&status_rows),
            laporan_bulan_ini,
        },
        daily_reports: recap::daily_reports(month, &daily_rows),
        attendance_data: recap::attendance_per_satpam(&per_satpam_rows),
        monthly_recap: recap::monthly_recap(&recap_rows),
    })
}

fn pdf_attachment(filename: String, bytes: Vec<u8>) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("application/pdf")
        .insert_header(ContentDisposition {
            disposition: DispositionType::Attachment,
            parameters: vec![DispositionParam::Filename(filename)],
        })
        .body(bytes)
}

/// Activity log and attendance roster of one shift
#[utoipa::path(
    get,
    path = "/laporan",
    params(LaporanQuery),
    responses(
        (status = 200, description = "Log entries and roster; both empty when no filter is given", body = LaporanResponse),
        (status = 400, description = "Invalid filter value"),
        (status = 500, description = "Store error", body = Object, example = json!({
            "message": "Gagal ambil laporan",
            "error": "pool timed out while waiting for an open connection"
        }))
    ),
    tag = "Laporan"
)]
pub async fn get_laporan(
    pool: web::Data<MySqlPool>,
    query: web::Query<LaporanQuery>,
) -> Result<HttpResponse, ApiError> {
    debug!(tanggal = ?query.tanggal, shift = ?query.shift, "Laporan diminta");

    let Some(filter) = query.to_filter()? else {
        return Ok(HttpResponse::Ok().json(LaporanResponse::default()));
    };

    let laporan = load_laporan(pool.get_ref(), &filter).await?;
    Ok(HttpResponse::Ok().json(laporan))
}

/// Submit one activity-log entry for a shift
#[utoipa::path(
    post,
    path = "/laporan/create",
    request_body(
        content = CreateKegiatan,
        description = "Activity-log entry",
        content_type = "application/json"
    ),
    responses(
        (status = 201, description = "Entry stored", body = Kegiatan),
        (status = 400, description = "Missing or invalid field", body = Object, example = json!({
            "message": "Jam wajib diisi!"
        })),
        (status = 500, description = "Store error")
    ),
    tag = "Laporan"
)]
pub async fn create_kegiatan(
    pool: web::Data<MySqlPool>,
    payload: web::Json<CreateKegiatan>,
) -> Result<HttpResponse, ApiError> {
    debug!(payload = ?payload, "Kegiatan diterima");
    let new = payload.validate()?;

    let entry = store::kegiatan::create(pool.get_ref(), &new)
        .await
        .map_err(ApiError::store("Gagal menyimpan kegiatan"))?;

    info!(id = entry.id, tanggal = %entry.tanggal, shift = %entry.shift, jam = %entry.jam, "Kegiatan disimpan");
    Ok(HttpResponse::Created().json(entry))
}

/// Monthly dashboard statistics
#[utoipa::path(
    get,
    path = "/laporan/dashboard",
    params(DashboardQuery),
    responses(
        (status = 200, description = "Statistics for the selected month (default: current month)", body = DashboardResponse),
        (status = 400, description = "Invalid month"),
        (status = 500, description = "Store error", body = Object, example = json!({
            "message": "Gagal ambil data dashboard",
            "error": "pool timed out while waiting for an open connection"
        }))
    ),
    tag = "Laporan"
)]
pub async fn get_dashboard(
    pool: web::Data<MySqlPool>,
    query: web::Query<DashboardQuery>,
) -> Result<HttpResponse, ApiError> {
    let month = ReportMonth::from_query(&query)?;
    debug!(tahun = month.year(), bulan = month.month(), "Dashboard diminta");

    let dashboard = load_dashboard(pool.get_ref(), month).await?;
    Ok(HttpResponse::Ok().json(dashboard))
}

/// Printable shift report
#[utoipa::path(
    get,
    path = "/laporan/pdf",
    params(LaporanQuery),
    responses(
        (status = 200, description = "PDF document (application/pdf), served as attachment"),
        (status = 400, description = "tanggal and shift are both required"),
        (status = 500, description = "Store error")
    ),
    tag = "Laporan"
)]
pub async fn laporan_pdf(
    pool: web::Data<MySqlPool>,
    query: web::Query<LaporanQuery>,
) -> Result<HttpResponse, ApiError> {
    let (tanggal, shift) = query.require_both()?;
    let filter = AttendanceFilter {
        tanggal: Some(tanggal),
        shift: Some(shift),
        nama: None,
    };

    let laporan = load_laporan(pool.get_ref(), &filter).await?;
    let bytes = pdf::shift_report(tanggal, shift, &laporan);

    info!(%tanggal, %shift, size = bytes.len(), "Laporan PDF dibuat");
    Ok(pdf_attachment(format!("laporan_{tanggal}_{shift}.pdf"), bytes))
}

/// Printable monthly recap
#[utoipa::path(
    get,
    path = "/laporan/dashboard/pdf",
    params(DashboardQuery),
    responses(
        (status = 200, description = "PDF document (application/pdf), served as attachment"),
        (status = 400, description = "Invalid month"),
        (status = 500, description = "Store error")
    ),
    tag = "Laporan"
)]
pub async fn dashboard_pdf(
    pool: web::Data<MySqlPool>,
    query: web::Query<DashboardQuery>,
) -> Result<HttpResponse, ApiError> {
    let month = ReportMonth::from_query(&query)?;

    let rows = store::dashboard::nama_status_shift_counts(pool.get_ref(), month)
        .await
        .map_err(ApiError::store("Gagal ambil rekap bulanan"))?;
    let bytes = pdf::monthly_recap_report(month, &recap::monthly_recap(&rows));

    info!(tahun = month.year(), bulan = month.month(), size = bytes.len(), "Rekap PDF dibuat");
    Ok(pdf_attachment(
        format!("rekap_bulanan_{}_{:02}.pdf", month.year(), month.month()),
        bytes,
    ))
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use serde_json::{Value, json};

    use crate::testing;

    #[actix_web::test]
    async fn laporan_without_filters_answers_empty_without_the_store() {
        let app = test::init_service(App::new().configure(testing::configure)).await;

        // The pool behind this app cannot connect, so any store access would be a 500.
        let req = test::TestRequest::get().uri("/laporan").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({ "kegiatan": [], "attendance": [] }));
    }

    #[actix_web::test]
    async fn blank_filters_count_as_absent() {
        let app = test::init_service(App::new().configure(testing::configure)).await;

        let req = test::TestRequest::get()
            .uri("/laporan?tanggal=&shift=")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({ "kegiatan": [], "attendance": [] }));
    }

    #[actix_web::test]
    async fn laporan_with_filter_reaches_the_store() {
        let app = test::init_service(App::new().configure(testing::configure)).await;

        let req = test::TestRequest::get()
            .uri("/laporan?tanggal=2024-03-01&shift=Malam")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "Gagal ambil laporan");
    }

    #[actix_web::test]
    async fn kegiatan_requires_jam() {
        let app = test::init_service(App::new().configure(testing::configure)).await;

        let req = test::TestRequest::post()
            .uri("/laporan/create")
            .peer_addr(testing::peer())
            .set_json(json!({
                "tanggal": "2024-03-01",
                "shift": "Pagi",
                "kegiatan": "Patroli area parkir"
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({ "message": "Jam wajib diisi!" }));
    }

    #[actix_web::test]
    async fn dashboard_rejects_half_a_month() {
        let app = test::init_service(App::new().configure(testing::configure)).await;

        let req = test::TestRequest::get()
            .uri("/laporan/dashboard?tahun=2024")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let req = test::TestRequest::get()
            .uri("/laporan/dashboard?tahun=2024&bulan=abc")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn dashboard_store_failure_is_reported() {
        let app = test::init_service(App::new().configure(testing::configure)).await;

        let req = test::TestRequest::get().uri("/laporan/dashboard").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "Gagal ambil data dashboard");
    }

    #[actix_web::test]
    async fn shift_pdf_needs_both_filters() {
        let app = test::init_service(App::new().configure(testing::configure)).await;

        let req = test::TestRequest::get()
            .uri("/laporan/pdf?tanggal=2024-03-01")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({ "message": "Shift wajib diisi!" }));
    }
}
