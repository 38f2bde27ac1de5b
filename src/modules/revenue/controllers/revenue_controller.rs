use actix_web::http::header::{self, HeaderValue};
use actix_web::{web, HttpRequest, HttpResponse, ResponseError};

use crate::core::{AppError, Result};
use crate::modules::revenue::models::RevenueRequest;
use crate::modules::revenue::services::RevenueService;

/// POST /revenue
///
/// Body: `{"startDate": "YYYY-MM-DD", "endDate": "YYYY-MM-DD"}`
pub async fn post_revenue(
    service: web::Data<RevenueService>,
    body: web::Json<RevenueRequest>,
) -> Result<HttpResponse> {
    let report = service.generate_report(&body).await?;
    Ok(HttpResponse::Ok().json(report))
}

/// GET /revenue?startDate=YYYY-MM-DD&endDate=YYYY-MM-DD
pub async fn get_revenue(
    service: web::Data<RevenueService>,
    query: web::Query<RevenueRequest>,
) -> Result<HttpResponse> {
    let report = service.generate_report(&query).await?;
    Ok(HttpResponse::Ok().json(report))
}

/// Any other method on /revenue: 405 in the usual error envelope
pub async fn revenue_method_not_allowed(req: HttpRequest) -> HttpResponse {
    let mut response = AppError::MethodNotAllowed(format!(
        "{} is not supported on {}, use POST or GET",
        req.method(),
        req.path()
    ))
    .error_response();
    response
        .headers_mut()
        .insert(header::ALLOW, HeaderValue::from_static("GET, POST, OPTIONS"));
    response
}

/// Configure routes for the revenue module
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/revenue")
            .route(web::post().to(post_revenue))
            .route(web::get().to(get_revenue))
            .default_service(web::to(revenue_method_not_allowed)),
    );
}
