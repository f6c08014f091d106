mod get_invite_quota;
mod quota_guard;
mod send_invitations;

use actix_web::web;
use get_invite_quota::get_invite_quota_controller;
use send_invitations::send_invitations_controller;

pub use quota_guard::{check_quota, release_quota, reserve_quota};
pub use send_invitations::SendInvitationsUseCase;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/invitations/quota", web::get().to(get_invite_quota_controller));
    cfg.route("/invitations", web::post().to(send_invitations_controller));
}
