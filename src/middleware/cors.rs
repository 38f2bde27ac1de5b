use actix_cors::Cors;
use actix_web::http::{header, Method};

/// Permissive CORS for browser dashboards: any origin, JSON bodies,
/// `GET`/`POST` plus preflight
pub fn cors() -> Cors {
    Cors::default()
        .allow_any_origin()
        .allowed_methods(vec![Method::GET, Method::POST, Method::OPTIONS])
        .allowed_header(header::CONTENT_TYPE)
        .max_age(3600)
}
