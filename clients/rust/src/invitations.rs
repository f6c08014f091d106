use crate::{APIResponse, BaseClient};
use gather_notifier_api_structs::{get_invite_quota, send_invitations};
use reqwest::StatusCode;
use std::sync::Arc;

/// Invitations sent on behalf of the signed in user
#[derive(Clone)]
pub struct InvitationClient {
    base: Arc<BaseClient>,
}

pub type SendInvitationsInput = send_invitations::RequestBody;

impl InvitationClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn get_quota(&self) -> APIResponse<get_invite_quota::APIResponse> {
        self.base
            .get("invitations/quota".into(), StatusCode::OK)
            .await
    }

    pub async fn send(
        &self,
        input: SendInvitationsInput,
    ) -> APIResponse<send_invitations::APIResponse> {
        self.base
            .post(input, "invitations".into(), StatusCode::OK)
            .await
    }
}
