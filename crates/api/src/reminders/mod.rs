mod cancel_event_reminders;
mod schedule_event_reminders;

use actix_web::web;
use cancel_event_reminders::cancel_event_reminders_controller;
use schedule_event_reminders::schedule_event_reminders_controller;

pub use cancel_event_reminders::CancelEventRemindersUseCase;
pub use schedule_event_reminders::ScheduleEventRemindersUseCase;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/events/{event_id}/reminders",
        web::post().to(schedule_event_reminders_controller),
    );
    cfg.route(
        "/events/{event_id}/reminders",
        web::delete().to(cancel_event_reminders_controller),
    );
}
