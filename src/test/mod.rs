//! In-memory doubles for every repository trait plus a recording channel.
//! Services run against these in unit tests exactly as they run against
//! Postgres.

use std::sync::Mutex;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::api::error::{self, DbErrorMeta};
use crate::modules::friend::{
    model::PendingRequestRow,
    repository::FriendRequestRepository,
    schema::{FriendRequestEntity, FriendRequestStatus},
};
use crate::modules::membership::{
    model::VisitorRow, repository::VisitRepository, schema::ProfileVisitEntity,
};
use crate::modules::message::{
    model::InsertMessage, repository::MessageRepository, schema::MessageEntity,
};
use crate::modules::post::{
    model::{InsertComment, InsertPost},
    repository::PostRepository,
    schema::{CommentEntity, PostEntity},
};
use crate::modules::user::{
    model::{InsertUser, UpdateUser},
    repository::UserRepository,
    schema::{Gender, UserEntity},
};
use crate::modules::websocket::{channel::ChannelPublisher, message::ServerMessage};


#[derive(Default)]
struct State {
    users: Vec<UserEntity>,
    requests: Vec<FriendRequestEntity>,
    messages: Vec<MessageEntity>,
    visits: Vec<ProfileVisitEntity>,
    posts: Vec<PostEntity>,
    comments: Vec<CommentEntity>,
    membership_writes: usize,
}

#[derive(Default)]
pub struct InMemoryStore {
    state: Mutex<State>,
}

impl InMemoryStore {
    fn with<T>(&self, f: impl FnOnce(&mut State) -> T) -> T {
        let mut state = self.state.lock().unwrap();
        f(&mut state)
    }
}

/// Shortcuts for arranging and inspecting store contents in tests.
pub trait Seed {
    /// Creates a user whose name is the local part of `email`.
    fn seed_user(&self, email: &str) -> Uuid;
    /// Writes the edge on both sides.
    fn link(&self, a: Uuid, b: Uuid);
    /// Removes `other` from `owner`'s friend set only.
    fn unlink_one_side(&self, owner: Uuid, other: Uuid);
    fn user(&self, id: Uuid) -> Option<UserEntity>;
    fn request(&self, id: Uuid) -> Option<FriendRequestEntity>;
    fn backdate_expiry(&self, email: &str, at: DateTime<Utc>);
    fn membership_writes(&self) -> usize;
    fn message_count(&self) -> usize;
}

impl Seed for InMemoryStore {
    fn seed_user(&self, email: &str) -> Uuid {
        let id = Uuid::now_v7();
        let name = email.split('@').next().unwrap_or(email).to_string();
        self.with(|s| {
            s.users.push(UserEntity {
                id,
                email: email.to_string(),
                name,
                gender: Gender::Other,
                date_of_birth: chrono::NaiveDate::from_ymd_opt(2000, 1, 1).unwrap(),
                profile_picture: None,
                friends: vec![],
                is_gold_member: false,
                gold_membership_expiry: None,
                is_banned: false,
                created_at: Utc::now(),
            })
        });
        id
    }

    fn link(&self, a: Uuid, b: Uuid) {
        self.with(|s| {
            for (owner, other) in [(a, b), (b, a)] {
                let user = s.users.iter_mut().find(|u| u.id == owner).unwrap();
                if !user.friends.contains(&other) {
                    user.friends.push(other);
                }
            }
        });
    }

    fn unlink_one_side(&self, owner: Uuid, other: Uuid) {
        self.with(|s| {
            let user = s.users.iter_mut().find(|u| u.id == owner).unwrap();
            user.friends.retain(|id| *id != other);
        });
    }

    fn user(&self, id: Uuid) -> Option<UserEntity> {
        self.with(|s| s.users.iter().find(|u| u.id == id).cloned())
    }

    fn request(&self, id: Uuid) -> Option<FriendRequestEntity> {
        self.with(|s| s.requests.iter().find(|r| r.id == id).cloned())
    }

    fn backdate_expiry(&self, email: &str, at: DateTime<Utc>) {
        self.with(|s| {
            let user = s.users.iter_mut().find(|u| u.email == email).unwrap();
            user.gold_membership_expiry = Some(at);
        });
    }

    fn membership_writes(&self) -> usize {
        self.with(|s| s.membership_writes)
    }

    fn message_count(&self) -> usize {
        self.with(|s| s.messages.len())
    }
}

#[async_trait::async_trait]
impl UserRepository for InMemoryStore {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<UserEntity>, error::SystemError> {
        Ok(self.with(|s| s.users.iter().find(|u| u.id == *id).cloned()))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserEntity>, error::SystemError> {
        Ok(self.with(|s| s.users.iter().find(|u| u.email == email).cloned()))
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<UserEntity>, error::SystemError> {
        Ok(self.with(|s| s.users.iter().filter(|u| ids.contains(&u.id)).cloned().collect()))
    }

    async fn create(&self, user: &InsertUser) -> Result<Uuid, error::SystemError> {
        self.with(|s| {
            if s.users.iter().any(|u| u.email == user.email) {
                return Err(error::SystemError::Conflict(Some(DbErrorMeta {
                    code: Some("23505".into()),
                    constraint: Some("users_email_key".into()),
                    message: "duplicate key value violates unique constraint".into(),
                })));
            }

            let id = Uuid::now_v7();
            s.users.push(UserEntity {
                id,
                email: user.email.clone(),
                name: user.name.clone(),
                gender: user.gender,
                date_of_birth: user.date_of_birth,
                profile_picture: None,
                friends: vec![],
                is_gold_member: false,
                gold_membership_expiry: None,
                is_banned: false,
                created_at: Utc::now(),
            });
            Ok(id)
        })
    }

    async fn update_profile(
        &self,
        email: &str,
        update: &UpdateUser,
    ) -> Result<Option<UserEntity>, error::SystemError> {
        Ok(self.with(|s| {
            let user = s.users.iter_mut().find(|u| u.email == email)?;
            user.name = update.name.clone();
            user.gender = update.gender;
            user.date_of_birth = update.date_of_birth;
            Some(user.clone())
        }))
    }

    async fn delete_account(&self, id: &Uuid) -> Result<(), error::SystemError> {
        self.with(|s| {
            s.requests.retain(|r| r.sender_id != *id && r.receiver_id != *id);
            for user in s.users.iter_mut() {
                user.friends.retain(|f| f != id);
            }
            s.messages.retain(|m| m.sender_id != *id && m.receiver_id != *id);
            s.visits.retain(|v| v.visitor_id != *id && v.visited_id != *id);
            s.posts.retain(|p| p.user_id != *id);
            let posts = &s.posts;
            s.comments.retain(|c| c.user_id != *id && posts.iter().any(|p| p.id == c.post_id));
            s.users.retain(|u| u.id != *id);
        });
        Ok(())
    }

    async fn search(
        &self,
        query: &str,
        exclude_id: &Uuid,
    ) -> Result<Vec<UserEntity>, error::SystemError> {
        let needle = query.to_lowercase();
        let mut users: Vec<UserEntity> = self.with(|s| {
            s.users
                .iter()
                .filter(|u| u.id != *exclude_id)
                .filter(|u| {
                    u.name.to_lowercase().contains(&needle)
                        || u.email.to_lowercase().contains(&needle)
                })
                .cloned()
                .collect()
        });
        users.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(users)
    }

    async fn add_friend(&self, user_id: &Uuid, friend_id: &Uuid) -> Result<(), error::SystemError> {
        self.with(|s| {
            if let Some(user) = s.users.iter_mut().find(|u| u.id == *user_id) {
                if !user.friends.contains(friend_id) {
                    user.friends.push(*friend_id);
                }
            }
        });
        Ok(())
    }

    async fn remove_friend(
        &self,
        user_id: &Uuid,
        friend_id: &Uuid,
    ) -> Result<(), error::SystemError> {
        self.with(|s| {
            if let Some(user) = s.users.iter_mut().find(|u| u.id == *user_id) {
                user.friends.retain(|f| f != friend_id);
            }
        });
        Ok(())
    }

    async fn find_friends_of_friends(
        &self,
        user_id: &Uuid,
        friend_ids: &[Uuid],
    ) -> Result<Vec<UserEntity>, error::SystemError> {
        Ok(self.with(|s| {
            s.users
                .iter()
                .filter(|u| u.id != *user_id && !friend_ids.contains(&u.id))
                .filter(|u| u.friends.iter().any(|f| friend_ids.contains(f)))
                .cloned()
                .collect()
        }))
    }

    async fn find_sample_excluding(
        &self,
        user_id: &Uuid,
        limit: i64,
    ) -> Result<Vec<UserEntity>, error::SystemError> {
        Ok(self.with(|s| {
            s.users.iter().filter(|u| u.id != *user_id).take(limit as usize).cloned().collect()
        }))
    }

    async fn update_membership(
        &self,
        id: &Uuid,
        is_gold_member: bool,
        expiry: Option<DateTime<Utc>>,
    ) -> Result<(), error::SystemError> {
        self.with(|s| {
            if let Some(user) = s.users.iter_mut().find(|u| u.id == *id) {
                user.is_gold_member = is_gold_member;
                user.gold_membership_expiry = expiry;
                s.membership_writes += 1;
            }
        });
        Ok(())
    }
}

#[async_trait::async_trait]
impl FriendRequestRepository for InMemoryStore {
    async fn find_by_id(
        &self,
        request_id: &Uuid,
    ) -> Result<Option<FriendRequestEntity>, error::SystemError> {
        Ok(self.with(|s| s.requests.iter().find(|r| r.id == *request_id).cloned()))
    }

    async fn find_between(
        &self,
        user_a: &Uuid,
        user_b: &Uuid,
    ) -> Result<Vec<FriendRequestEntity>, error::SystemError> {
        Ok(self.with(|s| {
            s.requests
                .iter()
                .filter(|r| {
                    (r.sender_id == *user_a && r.receiver_id == *user_b)
                        || (r.sender_id == *user_b && r.receiver_id == *user_a)
                })
                .cloned()
                .collect()
        }))
    }

    async fn create_or_revive(
        &self,
        sender_id: &Uuid,
        receiver_id: &Uuid,
    ) -> Result<Option<FriendRequestEntity>, error::SystemError> {
        Ok(self.with(|s| {
            let existing = s
                .requests
                .iter_mut()
                .find(|r| r.sender_id == *sender_id && r.receiver_id == *receiver_id);

            match existing {
                Some(r) if r.status == FriendRequestStatus::Rejected => {
                    r.status = FriendRequestStatus::Pending;
                    r.created_at = Utc::now();
                    Some(r.clone())
                }
                Some(_) => None,
                None => {
                    let request = FriendRequestEntity {
                        id: Uuid::now_v7(),
                        sender_id: *sender_id,
                        receiver_id: *receiver_id,
                        status: FriendRequestStatus::Pending,
                        created_at: Utc::now(),
                    };
                    s.requests.push(request.clone());
                    Some(request)
                }
            }
        }))
    }

    async fn update_status(
        &self,
        request_id: &Uuid,
        status: FriendRequestStatus,
    ) -> Result<(), error::SystemError> {
        self.with(|s| {
            if let Some(r) = s.requests.iter_mut().find(|r| r.id == *request_id) {
                r.status = status;
            }
        });
        Ok(())
    }

    async fn reject_accepted_between(
        &self,
        user_a: &Uuid,
        user_b: &Uuid,
    ) -> Result<u64, error::SystemError> {
        Ok(self.with(|s| {
            let mut count = 0;
            for r in s.requests.iter_mut() {
                let pair = (r.sender_id == *user_a && r.receiver_id == *user_b)
                    || (r.sender_id == *user_b && r.receiver_id == *user_a);
                if pair && r.status == FriendRequestStatus::Accepted {
                    r.status = FriendRequestStatus::Rejected;
                    count += 1;
                }
            }
            count
        }))
    }

    async fn find_pending_to_user(
        &self,
        user_id: &Uuid,
    ) -> Result<Vec<PendingRequestRow>, error::SystemError> {
        Ok(self.with(|s| {
            s.requests
                .iter()
                .filter(|r| r.receiver_id == *user_id && r.status == FriendRequestStatus::Pending)
                .filter_map(|r| {
                    let sender = s.users.iter().find(|u| u.id == r.sender_id)?;
                    Some(PendingRequestRow {
                        req_id: r.id,
                        user_id: sender.id,
                        name: sender.name.clone(),
                        email: sender.email.clone(),
                        profile_picture: sender.profile_picture.clone(),
                        created_at: r.created_at,
                    })
                })
                .collect()
        }))
    }
}

#[async_trait::async_trait]
impl MessageRepository for InMemoryStore {
    async fn create(&self, message: &InsertMessage) -> Result<MessageEntity, error::SystemError> {
        let entity = MessageEntity {
            id: Uuid::now_v7(),
            sender_id: message.sender_id,
            receiver_id: message.receiver_id,
            content: message.content.clone(),
            created_at: Utc::now(),
        };
        self.with(|s| s.messages.push(entity.clone()));
        Ok(entity)
    }

    async fn find_between(
        &self,
        user_a: &Uuid,
        user_b: &Uuid,
    ) -> Result<Vec<MessageEntity>, error::SystemError> {
        Ok(self.with(|s| {
            s.messages
                .iter()
                .filter(|m| {
                    (m.sender_id == *user_a && m.receiver_id == *user_b)
                        || (m.sender_id == *user_b && m.receiver_id == *user_a)
                })
                .cloned()
                .collect()
        }))
    }
}

#[async_trait::async_trait]
impl VisitRepository for InMemoryStore {
    async fn create(
        &self,
        visitor_id: &Uuid,
        visited_id: &Uuid,
    ) -> Result<ProfileVisitEntity, error::SystemError> {
        let visit = ProfileVisitEntity {
            id: Uuid::now_v7(),
            visitor_id: *visitor_id,
            visited_id: *visited_id,
            visited_at: Utc::now(),
        };
        self.with(|s| s.visits.push(visit.clone()));
        Ok(visit)
    }

    async fn find_visitors(&self, visited_id: &Uuid) -> Result<Vec<VisitorRow>, error::SystemError> {
        Ok(self.with(|s| {
            s.visits
                .iter()
                .rev()
                .filter(|v| v.visited_id == *visited_id)
                .filter_map(|v| {
                    let visitor = s.users.iter().find(|u| u.id == v.visitor_id)?;
                    Some(VisitorRow {
                        visit_id: v.id,
                        visited_at: v.visited_at,
                        user_id: visitor.id,
                        name: visitor.name.clone(),
                        email: visitor.email.clone(),
                        profile_picture: visitor.profile_picture.clone(),
                    })
                })
                .collect()
        }))
    }
}

#[async_trait::async_trait]
impl PostRepository for InMemoryStore {
    async fn create(&self, post: &InsertPost) -> Result<PostEntity, error::SystemError> {
        let entity = PostEntity {
            id: Uuid::now_v7(),
            user_id: post.user_id,
            user_name: post.user_name.clone(),
            text: post.text.clone(),
            likes: vec![],
            created_at: Utc::now(),
        };
        self.with(|s| s.posts.push(entity.clone()));
        Ok(entity)
    }

    async fn find_by_id(&self, post_id: &Uuid) -> Result<Option<PostEntity>, error::SystemError> {
        Ok(self.with(|s| s.posts.iter().find(|p| p.id == *post_id).cloned()))
    }

    async fn find_by_authors(
        &self,
        author_ids: &[Uuid],
    ) -> Result<Vec<PostEntity>, error::SystemError> {
        Ok(self.with(|s| {
            s.posts.iter().rev().filter(|p| author_ids.contains(&p.user_id)).cloned().collect()
        }))
    }

    async fn add_like(
        &self,
        post_id: &Uuid,
        email: &str,
    ) -> Result<Option<Vec<String>>, error::SystemError> {
        Ok(self.with(|s| {
            let post = s.posts.iter_mut().find(|p| p.id == *post_id)?;
            if !post.likes.iter().any(|l| l == email) {
                post.likes.push(email.to_string());
            }
            Some(post.likes.clone())
        }))
    }

    async fn remove_like(
        &self,
        post_id: &Uuid,
        email: &str,
    ) -> Result<Option<Vec<String>>, error::SystemError> {
        Ok(self.with(|s| {
            let post = s.posts.iter_mut().find(|p| p.id == *post_id)?;
            post.likes.retain(|l| l != email);
            Some(post.likes.clone())
        }))
    }

    async fn add_comment(
        &self,
        comment: &InsertComment,
    ) -> Result<CommentEntity, error::SystemError> {
        let entity = CommentEntity {
            id: Uuid::now_v7(),
            post_id: comment.post_id,
            user_id: comment.user_id,
            comment_text: comment.comment_text.clone(),
            created_at: Utc::now(),
        };
        self.with(|s| s.comments.push(entity.clone()));
        Ok(entity)
    }

    async fn find_comments(
        &self,
        post_ids: &[Uuid],
    ) -> Result<Vec<CommentEntity>, error::SystemError> {
        Ok(self.with(|s| {
            s.comments.iter().filter(|c| post_ids.contains(&c.post_id)).cloned().collect()
        }))
    }

    async fn delete(&self, post_id: &Uuid) -> Result<u64, error::SystemError> {
        Ok(self.with(|s| {
            let before = s.posts.len();
            s.posts.retain(|p| p.id != *post_id);
            s.comments.retain(|c| c.post_id != *post_id);
            (before - s.posts.len()) as u64
        }))
    }
}

/// Keeps every published event in order instead of delivering it.
#[derive(Default)]
pub struct RecordingPublisher {
    events: Mutex<Vec<(String, ServerMessage)>>,
}

impl RecordingPublisher {
    pub fn published(&self) -> Vec<(String, ServerMessage)> {
        self.events.lock().unwrap().clone()
    }
}

impl ChannelPublisher for RecordingPublisher {
    fn publish(&self, channel: &str, event: ServerMessage) {
        self.events.lock().unwrap().push((channel.to_string(), event));
    }
}
