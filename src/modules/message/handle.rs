use actix_web::{get, post, web};

use crate::{
    api::{error, success},
    modules::{
        message::{
            model::{ChatMessageResponse, HistoryQuery, SendMessageBody, SentMessageResponse},
            repository_pg::MessageRepositoryPg,
            service::MessageService,
        },
        user::repository_pg::UserRepositoryPg,
    },
    utils::{ValidatedJson, ValidatedQuery},
};

pub type MessageSvc = MessageService<MessageRepositoryPg, UserRepositoryPg>;

#[post("")]
pub async fn send_message(
    message_service: web::Data<MessageSvc>,
    body: ValidatedJson<SendMessageBody>,
) -> Result<success::Success<SentMessageResponse>, error::Error> {
    let body = body.0;
    let message = message_service
        .send_message(&body.sender_email, &body.receiver_email, body.content)
        .await?;

    Ok(success::Success::created(Some(SentMessageResponse::from(&message)))
        .message("Message sent successfully"))
}

#[get("/history")]
pub async fn chat_history(
    message_service: web::Data<MessageSvc>,
    query: ValidatedQuery<HistoryQuery>,
) -> Result<success::Success<Vec<ChatMessageResponse>>, error::Error> {
    let messages = message_service.history(&query.0.user_email, &query.0.friend_email).await?;

    Ok(success::Success::ok(Some(messages)).message("Chat history retrieved successfully"))
}
