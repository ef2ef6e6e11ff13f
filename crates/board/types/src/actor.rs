//! Actors: the resolved caller identity every transition is gated on
//!
//! Auth/session mechanics live outside the engine. Whatever resolves a
//! session is expected to hand the coordinator an `Actor`; an absent
//! identity is rejected as `Unauthenticated` before any other processing.

use crate::entity::PartyId;
use serde::{Deserialize, Serialize};

/// The role a caller acts under
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActorRole {
    /// A client: may respond to proposals awaiting their answer
    Client,
    /// A contractor (admin-equivalent): may drive owned items forward
    Contractor,
}

impl std::fmt::Display for ActorRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Client => write!(f, "client"),
            Self::Contractor => write!(f, "contractor"),
        }
    }
}

/// A resolved caller identity
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub id: PartyId,
    pub role: ActorRole,
}

impl Actor {
    pub fn new(id: impl Into<String>, role: ActorRole) -> Self {
        Self {
            id: PartyId::new(id),
            role,
        }
    }

    pub fn client(id: impl Into<String>) -> Self {
        Self::new(id, ActorRole::Client)
    }

    pub fn contractor(id: impl Into<String>) -> Self {
        Self::new(id, ActorRole::Contractor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors() {
        let c = Actor::client("c-1");
        assert_eq!(c.role, ActorRole::Client);
        assert_eq!(c.id, PartyId::new("c-1"));

        let k = Actor::contractor("k-1");
        assert_eq!(k.role, ActorRole::Contractor);
    }
}
