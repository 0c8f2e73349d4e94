use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// Customer Value Objects
// ============================================================================

/// Customer email address
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Email(pub String);

impl Email {
    pub fn new(email: impl Into<String>) -> Self {
        Self(email.into())
    }

    #[allow(dead_code)]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: Uuid,
    pub name: String,
    pub email: Email,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Customer {
    /// Build a customer that has not been stored yet
    #[allow(dead_code)]
    pub fn new(name: impl Into<String>, email: Email) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            email,
            created_at: now,
            updated_at: now,
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_customer_timestamps_match() {
        let customer = Customer::new("Ada Lovelace", Email::new("ada@example.com"));

        assert_eq!(customer.name, "Ada Lovelace");
        assert_eq!(customer.email.as_str(), "ada@example.com");
        assert_eq!(customer.created_at, customer.updated_at);
    }

    #[test]
    fn test_email_serializes_as_plain_string() {
        let customer = Customer::new("Ada Lovelace", Email::new("ada@example.com"));

        let json = serde_json::to_value(&customer).unwrap();
        assert_eq!(json["email"], "ada@example.com");
    }
}
