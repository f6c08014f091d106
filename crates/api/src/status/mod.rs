use actix_web::{web, HttpResponse};
use gather_notifier_api_structs::get_service_health::*;

async fn get_service_health() -> HttpResponse {
    HttpResponse::Ok().json(APIResponse {
        message: "Notifications are up and running".into(),
    })
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(get_service_health));
}
