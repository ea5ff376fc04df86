//! Direct and group messages between staff members.

use std::path::Path;

use cc_common::{User, UserStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use super::{load_snapshot, save_snapshot, ContentError};
use crate::permissions::{Permission, StaffContext};

/// Recipient id used for the shared staff channel.
pub const GROUP_CHANNEL: &str = "group";

const MAX_MESSAGE_LEN: usize = 2000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: String,
    pub from_user_id: String,
    /// A user id, or [`GROUP_CHANNEL`].
    pub to_user_id: String,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    pub is_read: bool,
}

impl Message {
    #[must_use]
    pub fn is_group(&self) -> bool {
        self.to_user_id == GROUP_CHANNEL
    }

    fn between(&self, a: &str, b: &str) -> bool {
        (self.from_user_id == a && self.to_user_id == b)
            || (self.from_user_id == b && self.to_user_id == a)
    }
}

fn message_body(content: &str) -> Result<String, ContentError> {
    let content = content.trim();
    if content.is_empty() {
        return Err(ContentError::Validation("Message cannot be empty".into()));
    }
    if content.chars().count() > MAX_MESSAGE_LEN {
        return Err(ContentError::Validation(format!(
            "Message must be at most {MAX_MESSAGE_LEN} characters"
        )));
    }
    Ok(content.to_string())
}

/// All messages in send order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageStore {
    messages: Vec<Message>,
}

impl MessageStore {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            messages: Vec::new(),
        }
    }

    #[must_use]
    pub fn from_messages(mut messages: Vec<Message>) -> Self {
        messages.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));
        Self { messages }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn load(path: &Path) -> Result<Self, ContentError> {
        Ok(Self::from_messages(load_snapshot(path)?))
    }

    pub fn save(&self, path: &Path) -> Result<(), ContentError> {
        save_snapshot(path, &self.messages)
    }

    fn push(&mut self, from: &User, to: &str, content: &str) -> Result<&Message, ContentError> {
        let message = Message {
            id: Uuid::now_v7().to_string(),
            from_user_id: from.id.clone(),
            to_user_id: to.to_string(),
            content: message_body(content)?,
            timestamp: Utc::now(),
            is_read: false,
        };
        info!(message_id = %message.id, from = %from.id, to, "Sent message");
        self.messages.push(message);
        let last = self.messages.len() - 1;
        Ok(&self.messages[last])
    }

    /// Send a direct message. Needs `send_messages`; the recipient must be
    /// another active account.
    pub fn send_direct(
        &mut self,
        sender: &User,
        recipient: &User,
        content: &str,
    ) -> Result<&Message, ContentError> {
        StaffContext::for_active_user(sender)?.require_permission(Permission::SendMessages)?;
        if recipient.id == sender.id
            || recipient.is_banned
            || recipient.status != UserStatus::Approved
        {
            return Err(ContentError::InvalidRecipient(recipient.id.clone()));
        }
        self.push(sender, &recipient.id, content)
    }

    /// Post to the staff group channel. Needs `send_messages`.
    pub fn send_group(&mut self, sender: &User, content: &str) -> Result<&Message, ContentError> {
        StaffContext::for_active_user(sender)?.require_permission(Permission::SendMessages)?;
        self.push(sender, GROUP_CHANNEL, content)
    }

    /// Direct messages between `reader` and `other_id`, oldest first. Needs
    /// `read_messages`.
    pub fn conversation(&self, reader: &User, other_id: &str) -> Result<Vec<&Message>, ContentError> {
        StaffContext::for_active_user(reader)?.require_permission(Permission::ReadMessages)?;
        Ok(self
            .messages
            .iter()
            .filter(|m| m.between(&reader.id, other_id))
            .collect())
    }

    /// Group channel messages, oldest first. Needs `read_messages`.
    pub fn group_feed(&self, reader: &User) -> Result<Vec<&Message>, ContentError> {
        StaffContext::for_active_user(reader)?.require_permission(Permission::ReadMessages)?;
        Ok(self.messages.iter().filter(|m| m.is_group()).collect())
    }

    /// Unread direct messages sent by `from_id` to `user_id`.
    #[must_use]
    pub fn unread_count(&self, user_id: &str, from_id: &str) -> usize {
        self.messages
            .iter()
            .filter(|m| !m.is_read && m.from_user_id == from_id && m.to_user_id == user_id)
            .count()
    }

    /// Unread direct messages addressed to `user_id` from anyone.
    #[must_use]
    pub fn total_unread(&self, user_id: &str) -> usize {
        self.messages
            .iter()
            .filter(|m| !m.is_read && m.to_user_id == user_id)
            .count()
    }

    /// Mark everything `from_id` sent to `reader` as read. Returns how many
    /// messages changed.
    pub fn mark_read(&mut self, reader: &User, from_id: &str) -> Result<usize, ContentError> {
        StaffContext::for_active_user(reader)?.require_permission(Permission::ReadMessages)?;
        let mut changed = 0;
        for message in self
            .messages
            .iter_mut()
            .filter(|m| !m.is_read && m.from_user_id == from_id && m.to_user_id == reader.id)
        {
            message.is_read = true;
            changed += 1;
        }
        debug!(reader = %reader.id, from = from_id, changed, "Marked messages read");
        Ok(changed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::testing::member;
    use crate::permissions::PermissionError;
    use cc_common::Rank;

    #[test]
    fn test_direct_conversation() {
        let alice = member("alice", Rank::Guide);
        let bob = member("bob", Rank::Moderator);
        let carol = member("carol", Rank::Admin);
        let mut store = MessageStore::new();

        store.send_direct(&alice, &bob, " hi bob ").unwrap();
        store.send_direct(&bob, &alice, "hey").unwrap();
        store.send_direct(&carol, &bob, "meeting at 8").unwrap();

        let convo = store.conversation(&alice, &bob.id).unwrap();
        assert_eq!(convo.len(), 2);
        assert_eq!(convo[0].content, "hi bob");
        assert_eq!(convo[1].from_user_id, bob.id);
        assert_eq!(store.conversation(&bob, &carol.id).unwrap().len(), 1);
    }

    #[test]
    fn test_invalid_recipients() {
        let alice = member("alice", Rank::Guide);
        let mut banned = member("griefer", Rank::Moderator);
        banned.is_banned = true;
        let mut pending = member("new", Rank::Pending);
        pending.status = UserStatus::Pending;
        let mut store = MessageStore::new();

        for recipient in [&alice, &banned, &pending] {
            assert!(matches!(
                store.send_direct(&alice, recipient, "hello"),
                Err(ContentError::InvalidRecipient(_))
            ));
        }
        assert!(store.is_empty());
    }

    #[test]
    fn test_pending_rank_cannot_send() {
        let mut waiting = member("waiting", Rank::Pending);
        waiting.status = UserStatus::Approved;
        let mut store = MessageStore::new();

        assert!(matches!(
            store.send_group(&waiting, "hello"),
            Err(ContentError::Permission(PermissionError::MissingPermission(
                Permission::SendMessages
            )))
        ));
        assert!(matches!(
            store.group_feed(&waiting),
            Err(ContentError::Permission(_))
        ));
    }

    #[test]
    fn test_message_body_limits() {
        let alice = member("alice", Rank::Guide);
        let mut store = MessageStore::new();

        assert!(matches!(
            store.send_group(&alice, "   "),
            Err(ContentError::Validation(_))
        ));
        assert!(store.send_group(&alice, &"a".repeat(MAX_MESSAGE_LEN)).is_ok());
        assert!(store
            .send_group(&alice, &"a".repeat(MAX_MESSAGE_LEN + 1))
            .is_err());
    }

    #[test]
    fn test_group_feed_excludes_direct() {
        let alice = member("alice", Rank::Guide);
        let bob = member("bob", Rank::Guide);
        let mut store = MessageStore::new();

        store.send_group(&alice, "morning all").unwrap();
        store.send_direct(&alice, &bob, "psst").unwrap();

        let feed = store.group_feed(&bob).unwrap();
        assert_eq!(feed.len(), 1);
        assert_eq!(feed[0].to_user_id, GROUP_CHANNEL);
        assert_eq!(store.total_unread(&bob.id), 1);
    }

    #[test]
    fn test_unread_and_mark_read() {
        let alice = member("alice", Rank::Guide);
        let bob = member("bob", Rank::Guide);
        let carol = member("carol", Rank::Guide);
        let mut store = MessageStore::new();

        store.send_direct(&alice, &bob, "one").unwrap();
        store.send_direct(&alice, &bob, "two").unwrap();
        store.send_direct(&carol, &bob, "three").unwrap();

        assert_eq!(store.unread_count(&bob.id, &alice.id), 2);
        assert_eq!(store.total_unread(&bob.id), 3);

        assert_eq!(store.mark_read(&bob, &alice.id).unwrap(), 2);
        assert_eq!(store.mark_read(&bob, &alice.id).unwrap(), 0);
        assert_eq!(store.unread_count(&bob.id, &alice.id), 0);
        assert_eq!(store.total_unread(&bob.id), 1);
        // Sender's copy is the same record; alice has nothing unread.
        assert_eq!(store.total_unread(&alice.id), 0);
    }

    #[test]
    fn test_snapshot_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("messages.json");
        let alice = member("alice", Rank::Guide);
        let mut store = MessageStore::new();
        store.send_group(&alice, "hello").unwrap();
        store.save(&path).unwrap();

        let loaded = MessageStore::load(&path).unwrap();
        assert_eq!(loaded, store);
        assert_eq!(loaded.len(), 1);
    }
}
