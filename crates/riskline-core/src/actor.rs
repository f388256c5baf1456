//! Actor attribution and free-form metadata.
//!
//! Every field of [`Actor`] is optional: anonymous, system and IP-only
//! actions are valid audit subjects. Absent fields stay `None`, they are
//! never replaced with placeholder strings.

use serde::{Deserialize, Serialize};

/// Open key-value mapping attached to audit events and risk profiles.
pub type Metadata = serde_json::Map<String, serde_json::Value>;

/// Identity attributed to an action.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Actor {
    /// Gateway user id (JWT subject), if authenticated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actor_id: Option<String>,
    /// Email of the authenticated user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actor_email: Option<String>,
    /// Client IP address as seen by the gateway.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
}

impl Actor {
    /// Actor with no attribution at all (system action).
    #[must_use]
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Actor identified only by user id.
    #[must_use]
    pub fn with_id(actor_id: impl Into<String>) -> Self {
        Self {
            actor_id: Some(actor_id.into()),
            ..Self::default()
        }
    }

    /// Sets the actor email.
    #[must_use]
    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.actor_email = Some(email.into());
        self
    }

    /// Sets the client IP address.
    #[must_use]
    pub fn ip(mut self, ip_address: impl Into<String>) -> Self {
        self.ip_address = Some(ip_address.into());
        self
    }

    /// True when no attribution field is set.
    #[must_use]
    pub fn is_anonymous(&self) -> bool {
        self.actor_id.is_none() && self.actor_email.is_none() && self.ip_address.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_anonymous_actor() {
        let actor = Actor::anonymous();
        assert!(actor.is_anonymous());
        assert_eq!(serde_json::to_value(&actor).unwrap(), json!({}));
    }

    #[test]
    fn test_builder_sets_fields() {
        let actor = Actor::with_id("u1").email("ops@example.com").ip("10.0.0.7");
        assert_eq!(actor.actor_id.as_deref(), Some("u1"));
        assert_eq!(actor.actor_email.as_deref(), Some("ops@example.com"));
        assert_eq!(actor.ip_address.as_deref(), Some("10.0.0.7"));
        assert!(!actor.is_anonymous());
    }

    #[test]
    fn test_ip_only_actor_serializes_camel_case() {
        let actor = Actor::anonymous().ip("192.168.1.4");
        assert_eq!(
            serde_json::to_value(&actor).unwrap(),
            json!({ "ipAddress": "192.168.1.4" })
        );
    }

    #[test]
    fn test_deserialize_missing_fields() {
        let actor: Actor = serde_json::from_value(json!({ "actorEmail": "a@b.c" })).unwrap();
        assert!(actor.actor_id.is_none());
        assert_eq!(actor.actor_email.as_deref(), Some("a@b.c"));
    }
}
