mod orchestrator;
mod send_push_to_user;

pub use orchestrator::*;
pub use send_push_to_user::{send_push_to_user, PushDeliveryResult};
