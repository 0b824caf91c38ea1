//! Auto-reply entity <-> model mapper

use ticket_core::AutoReply;

use crate::models::AutoReplyModel;

impl From<AutoReplyModel> for AutoReply {
    fn from(model: AutoReplyModel) -> Self {
        AutoReply {
            id: model.id,
            content: model.content,
        }
    }
}
