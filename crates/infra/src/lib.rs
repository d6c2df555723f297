//! `fieldops-infra` — in-memory collaborator implementations for tests/dev.
//!
//! Production deployments implement the same ports against real storage and
//! providers; these implementations exist so the domain and service crates
//! can be exercised end-to-end without IO.

pub mod gateways;
pub mod memory;

pub use gateways::{
    RecordingEmailSender, RecordingPushGateway, RecordingSmsSender, SentEmail, SentPush, SentSms,
    StaticInviter, StaticUserProfiles,
};
pub use memory::InMemoryStore;
