use crate::{
    api::{daftar_hadir, laporan},
    config::Config,
    error::ApiError,
};
use actix_governor::{
    Governor, GovernorConfigBuilder, PeerIpKeyExtractor, governor::middleware::NoOpMiddleware,
};
use actix_web::{HttpResponse, Responder, get, web};
use serde_json::json;
use sqlx::MySqlPool;
use std::sync::Arc;

#[get("/health")]
async fn health() -> impl Responder {
    HttpResponse::Ok().json(json!({ "status": "ok" }))
}

fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        ApiError::BadRequest(format!("Body tidak valid: {err}")).into()
    })
}

fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| {
        ApiError::BadRequest(format!("Parameter tidak valid: {err}")).into()
    })
}

pub fn configure(cfg: &mut web::ServiceConfig, pool: MySqlPool, config: Config) {
    // Helper to build per-route limiter
    fn build_limiter(requests_per_min: u32) -> Governor<PeerIpKeyExtractor, NoOpMiddleware> {
        let requests_per_min = requests_per_min.max(1);
        let per_ms = (60_000 / requests_per_min as u64).max(1);
        let cfg = GovernorConfigBuilder::default()
            .per_millisecond(per_ms)
            .burst_size(requests_per_min)
            .key_extractor(PeerIpKeyExtractor)
            .finish()
            .expect("per_millisecond and burst_size are never zero");
        Governor::new(&cfg)
    }

    let create_limiter = Arc::new(build_limiter(config.rate_create_per_min));

    cfg.app_data(web::Data::new(pool))
        .app_data(json_config())
        .app_data(query_config())
        .service(health);

    cfg.service(
        web::scope(&config.api_prefix)
            .service(
                web::scope("/daftar-hadir")
                    // /daftar-hadir/create
                    .service(
                        web::resource("/create")
                            .wrap(create_limiter.clone())
                            .route(web::post().to(daftar_hadir::create_daftar_hadir)),
                    )
                    // /daftar-hadir
                    .service(
                        web::resource("").route(web::get().to(daftar_hadir::list_daftar_hadir)),
                    ),
            )
            .service(
                web::scope("/laporan")
                    // /laporan/create
                    .service(
                        web::resource("/create")
                            .wrap(create_limiter)
                            .route(web::post().to(laporan::create_kegiatan)),
                    )
                    // /laporan/dashboard
                    .service(
                        web::resource("/dashboard").route(web::get().to(laporan::get_dashboard)),
                    )
                    // /laporan/dashboard/pdf
                    .service(
                        web::resource("/dashboard/pdf").route(web::get().to(laporan::dashboard_pdf)),
                    )
                    // /laporan/pdf
                    .service(web::resource("/pdf").route(web::get().to(laporan::laporan_pdf)))
                    // /laporan
                    .service(web::resource("").route(web::get().to(laporan::get_laporan))),
            ),
    );
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use serde_json::{Value, json};

    use crate::testing;

    #[actix_web::test]
    async fn health_does_not_need_the_store() {
        let app = test::init_service(App::new().configure(testing::configure)).await;

        let req = test::TestRequest::get().uri("/health").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({ "status": "ok" }));
    }

    #[actix_web::test]
    async fn create_endpoints_reject_get() {
        let app = test::init_service(App::new().configure(testing::configure)).await;

        let req = test::TestRequest::get()
            .uri("/daftar-hadir/create")
            .peer_addr(testing::peer())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[actix_web::test]
    async fn api_prefix_scopes_the_api_but_not_health() {
        let mut config = testing::config();
        config.api_prefix = "/api".to_string();
        let app = test::init_service(
            App::new().configure(|cfg| crate::routes::configure(cfg, testing::pool(), config)),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/laporan").to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

        let req = test::TestRequest::get().uri("/laporan").to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

        let req = test::TestRequest::get().uri("/health").to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn check_ins_are_rate_limited_per_peer() {
        let mut config = testing::config();
        config.rate_create_per_min = 1;
        let app = test::init_service(
            App::new().configure(|cfg| crate::routes::configure(cfg, testing::pool(), config)),
        )
        .await;

        let send = || {
            test::TestRequest::post()
                .uri("/daftar-hadir/create")
                .peer_addr(testing::peer())
                .set_json(json!({}))
                .to_request()
        };

        let first = test::call_service(&app, send()).await;
        assert_eq!(first.status(), StatusCode::BAD_REQUEST);

        // The limiter answers from middleware, so its rejection arrives as an error.
        let second = match test::try_call_service(&app, send()).await {
            Ok(resp) => resp.status(),
            Err(err) => err.as_response_error().status_code(),
        };
        assert_eq!(second, StatusCode::TOO_MANY_REQUESTS);
    }
}
