//! Core domain entities representing the business data model.
//!
//! Entities are plain data structures without business logic. Creation and
//! partial-update inputs get their own structs (`NewCampaign`,
//! `CampaignPatch`, ...) so repository signatures stay explicit about what a
//! caller may set.
//!
//! Soft deletion is represented by a nullable `deleted_at` timestamp on every
//! entity; repositories filter deleted rows centrally in their SQL, so no
//! call site ever re-implements the check.

pub mod campaign;
pub mod interaction;

pub use campaign::{Campaign, CampaignPatch, NewCampaign};
pub use interaction::{Interaction, InteractionPatch, NewInteraction};
