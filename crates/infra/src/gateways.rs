//! Recording channel and directory implementations for tests/dev.
//!
//! Each implementation records every attempt so tests can assert on the
//! exact fan-out, and can be told to fail specific addresses to exercise
//! partial-failure paths.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use fieldops_auth::{ContactInfo, DirectoryError, IdentityInviter, Invitation, UserProfiles};
use fieldops_core::UserId;
use fieldops_notify::{ChannelError, EmailSender, PushGateway, SmsSender};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentEmail {
    pub to: String,
    pub subject: String,
    pub body: String,
}

#[derive(Default)]
pub struct RecordingEmailSender {
    attempts: Mutex<Vec<SentEmail>>,
    failing: Mutex<HashSet<String>>,
}

impl RecordingEmailSender {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every send to `address` fail (the attempt is still recorded).
    pub fn fail_address(&self, address: impl Into<String>) {
        self.failing.lock().unwrap().insert(address.into());
    }

    pub fn attempts(&self) -> Vec<SentEmail> {
        self.attempts.lock().unwrap().clone()
    }
}

#[async_trait]
impl EmailSender for RecordingEmailSender {
    async fn send_email(&self, to: &str, subject: &str, body: &str) -> Result<(), ChannelError> {
        self.attempts.lock().unwrap().push(SentEmail {
            to: to.to_string(),
            subject: subject.to_string(),
            body: body.to_string(),
        });
        if self.failing.lock().unwrap().contains(to) {
            return Err(ChannelError::Rejected("mailbox unavailable".to_string()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentSms {
    pub to: String,
    pub text: String,
}

#[derive(Default)]
pub struct RecordingSmsSender {
    attempts: Mutex<Vec<SentSms>>,
}

impl RecordingSmsSender {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attempts(&self) -> Vec<SentSms> {
        self.attempts.lock().unwrap().clone()
    }
}

#[async_trait]
impl SmsSender for RecordingSmsSender {
    async fn send_sms(&self, to: &str, text: &str) -> Result<(), ChannelError> {
        self.attempts.lock().unwrap().push(SentSms {
            to: to.to_string(),
            text: text.to_string(),
        });
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentPush {
    pub user_id: UserId,
    pub event: String,
    pub payload: Value,
}

#[derive(Default)]
pub struct RecordingPushGateway {
    pushes: Mutex<Vec<SentPush>>,
}

impl RecordingPushGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pushes(&self) -> Vec<SentPush> {
        self.pushes.lock().unwrap().clone()
    }
}

#[async_trait]
impl PushGateway for RecordingPushGateway {
    async fn push_to_user(
        &self,
        user_id: &UserId,
        event: &str,
        payload: Value,
    ) -> Result<(), ChannelError> {
        self.pushes.lock().unwrap().push(SentPush {
            user_id: user_id.clone(),
            event: event.to_string(),
            payload,
        });
        Ok(())
    }
}

/// Fixed user → contact mapping.
#[derive(Default)]
pub struct StaticUserProfiles {
    contacts: Mutex<HashMap<UserId, ContactInfo>>,
}

impl StaticUserProfiles {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, user_id: UserId, contact: ContactInfo) {
        self.contacts.lock().unwrap().insert(user_id, contact);
    }
}

#[async_trait]
impl UserProfiles for StaticUserProfiles {
    async fn contact(&self, user_id: &UserId) -> Result<ContactInfo, DirectoryError> {
        self.contacts
            .lock()
            .unwrap()
            .get(user_id)
            .cloned()
            .ok_or(DirectoryError::ProfileNotFound)
    }
}

/// Inviter that fabricates a deterministic redeem URL.
#[derive(Default)]
pub struct StaticInviter;

impl StaticInviter {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl IdentityInviter for StaticInviter {
    async fn invite(&self, email: &str, _redirect_url: &str) -> Result<Invitation, DirectoryError> {
        Ok(Invitation {
            redeem_url: format!("https://invite.example/redeem/{email}"),
        })
    }
}
