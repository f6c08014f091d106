mod subscribe_push;
mod unsubscribe_push;

use actix_web::web;
use subscribe_push::subscribe_push_controller;
use unsubscribe_push::unsubscribe_push_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/push/subscribe", web::post().to(subscribe_push_controller));
    cfg.route("/push/subscribe", web::delete().to(unsubscribe_push_controller));
}
