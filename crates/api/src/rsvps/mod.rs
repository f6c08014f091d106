mod rsvp_created;
mod subscribers;

use actix_web::web;
use rsvp_created::rsvp_created_controller;

pub use rsvp_created::{RsvpCreated, RsvpCreatedUseCase};

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/rsvps", web::post().to(rsvp_created_controller));
}
