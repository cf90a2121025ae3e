/// Message Service
///
/// Direct messages between friends. The HTTP path stores and returns; the
/// socket path stores and then publishes the new message to both parties'
/// channels.
use std::sync::Arc;

use crate::api::error;
use crate::modules::message::model::{ChatMessageResponse, InsertMessage};
use crate::modules::message::repository::MessageRepository;
use crate::modules::message::schema::MessageEntity;
use crate::modules::user::{repository::UserRepository, schema::UserEntity};
use crate::modules::websocket::channel::{ChannelPublisher, PushSender};
use crate::modules::websocket::message::{ChatEvent, ServerMessage};

#[derive(Clone)]
pub struct MessageService<M, U>
where
    M: MessageRepository + Send + Sync,
    U: UserRepository + Send + Sync,
{
    message_repo: Arc<M>,
    user_repo: Arc<U>,
    channel: Arc<dyn ChannelPublisher>,
}

impl<M, U> MessageService<M, U>
where
    M: MessageRepository + Send + Sync,
    U: UserRepository + Send + Sync,
{
    pub fn with_dependencies(
        message_repo: Arc<M>,
        user_repo: Arc<U>,
        channel: Arc<dyn ChannelPublisher>,
    ) -> Self {
        MessageService { message_repo, user_repo, channel }
    }

    async fn find_user(&self, email: &str) -> Result<UserEntity, error::SystemError> {
        self.user_repo
            .find_by_email(email)
            .await?
            .ok_or_else(|| error::SystemError::not_found("User not found"))
    }

    /// Checks content and friendship, then appends the message. Nothing is
    /// written when any check fails.
    async fn store(
        &self,
        sender_email: &str,
        receiver_email: &str,
        content: String,
    ) -> Result<(MessageEntity, UserEntity, UserEntity), error::SystemError> {
        if content.trim().is_empty() {
            return Err(error::SystemError::invalid_input("Message content cannot be empty"));
        }

        let (sender, receiver) =
            tokio::try_join!(self.find_user(sender_email), self.find_user(receiver_email))?;

        if !sender.is_friend_of(&receiver.id) {
            return Err(error::SystemError::not_friends("You can only send messages to friends"));
        }

        let message = self
            .message_repo
            .create(&InsertMessage { sender_id: sender.id, receiver_id: receiver.id, content })
            .await?;

        Ok((message, sender, receiver))
    }

    pub async fn send_message(
        &self,
        sender_email: &str,
        receiver_email: &str,
        content: String,
    ) -> Result<MessageEntity, error::SystemError> {
        let (message, sender, receiver) = self.store(sender_email, receiver_email, content).await?;

        tracing::info!("Message {} stored {} -> {}", message.id, sender.id, receiver.id);
        Ok(message)
    }

    /// Stores the message, then publishes it to the sender's channel as
    /// outgoing and to the receiver's channel as incoming.
    pub async fn send_push(
        &self,
        sender_email: &str,
        receiver_email: &str,
        content: String,
    ) -> Result<MessageEntity, error::SystemError> {
        let (message, sender, receiver) = self.store(sender_email, receiver_email, content).await?;

        let event = |is_from_user| {
            ServerMessage::NewMessage(ChatEvent {
                id: message.id,
                content: message.content.clone(),
                is_from_user,
                sender_email: sender.email.clone(),
                receiver_email: receiver.email.clone(),
                created_at: message.created_at,
            })
        };

        self.channel.publish(&sender.email, event(true));
        self.channel.publish(&receiver.email, event(false));

        tracing::info!("Message {} pushed {} -> {}", message.id, sender.email, receiver.email);
        Ok(message)
    }

    pub async fn history(
        &self,
        user_email: &str,
        friend_email: &str,
    ) -> Result<Vec<ChatMessageResponse>, error::SystemError> {
        let (user, friend) =
            tokio::try_join!(self.find_user(user_email), self.find_user(friend_email))?;

        let messages = self.message_repo.find_between(&user.id, &friend.id).await?;

        Ok(messages.into_iter().map(|m| ChatMessageResponse::for_viewer(m, &user.id)).collect())
    }
}

#[async_trait::async_trait]
impl<M, U> PushSender for MessageService<M, U>
where
    M: MessageRepository + Send + Sync,
    U: UserRepository + Send + Sync,
{
    async fn push(
        &self,
        sender_email: &str,
        receiver_email: &str,
        content: String,
    ) -> Result<(), error::SystemError> {
        self.send_push(sender_email, receiver_email, content).await.map(|_| ())
    }
}
