//! Caller identity, injected into operations that depend on who is asking.
//!
//! Token decoding and session storage belong to the host application; the
//! calculator only ever sees this capability.

use serde::{Deserialize, Serialize};

use crate::error::{ProjectionError, Result};

/// Portal role of the current user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Admin,
    Mediator,
    Client,
}

impl Role {
    /// Admins and mediators record payouts; clients only request withdrawals
    pub fn can_record_payouts(&self) -> bool {
        matches!(self, Role::Admin | Role::Mediator)
    }
}

/// Capability exposing the authenticated user
pub trait AuthContext {
    fn current_user_role(&self) -> Role;
    fn current_user_id(&self) -> Option<&str>;
}

/// Fixed identity, for CLIs and tests
#[derive(Debug, Clone)]
pub struct StaticAuth {
    pub role: Role,
    pub user_id: Option<String>,
}

impl StaticAuth {
    pub fn new(role: Role, user_id: impl Into<String>) -> Self {
        Self {
            role,
            user_id: Some(user_id.into()),
        }
    }
}

impl AuthContext for StaticAuth {
    fn current_user_role(&self) -> Role {
        self.role
    }

    fn current_user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }
}

/// Fail with `Unauthorized` unless the caller may record payouts
pub fn require_payout_role(auth: &dyn AuthContext) -> Result<()> {
    let role = auth.current_user_role();
    if role.can_record_payouts() {
        Ok(())
    } else {
        Err(ProjectionError::Unauthorized { role })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payout_roles() {
        assert!(require_payout_role(&StaticAuth::new(Role::Admin, "A1")).is_ok());
        assert!(require_payout_role(&StaticAuth::new(Role::Mediator, "M1")).is_ok());

        let err = require_payout_role(&StaticAuth::new(Role::Client, "C1")).unwrap_err();
        assert!(matches!(err, ProjectionError::Unauthorized { role: Role::Client }));
    }

    #[test]
    fn test_static_auth_user_id() {
        let auth = StaticAuth { role: Role::Client, user_id: None };
        assert_eq!(auth.current_user_id(), None);
        assert_eq!(StaticAuth::new(Role::Admin, "MVK001").current_user_id(), Some("MVK001"));
    }
}
