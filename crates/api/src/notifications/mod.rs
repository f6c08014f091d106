mod deliver_notification;
mod get_subscriber_hash;
mod identify_subscriber;

use actix_web::web;
use deliver_notification::deliver_notification_controller;
use get_subscriber_hash::get_subscriber_hash_controller;
use identify_subscriber::identify_subscriber_controller;

pub use identify_subscriber::IdentifySubscriberUseCase;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/notifications", web::post().to(deliver_notification_controller));
    cfg.route(
        "/notifications/subscriber",
        web::get().to(get_subscriber_hash_controller),
    );
    cfg.route("/subscribers", web::post().to(identify_subscriber_controller));
}
