//! User domain types.
//!
//! Users are an external collaborator: order logic reads them for
//! enrichment but never mutates them. They are created out of band (CLI
//! seeding, upstream user service).

use chrono::{DateTime, Utc};
use serde::Serialize;

use stockroom_core::{Email, UserId};

/// A user referenced by orders.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: Email,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}
