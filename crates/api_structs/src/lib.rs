mod invitations;
mod notifications;
mod push;
mod reminders;
mod rsvps;
mod status;

pub mod dtos {
    pub use crate::push::dtos::*;
}

pub use crate::invitations::api::*;
pub use crate::notifications::api::*;
pub use crate::push::api::*;
pub use crate::reminders::api::*;
pub use crate::rsvps::api::*;
pub use crate::status::api::*;
