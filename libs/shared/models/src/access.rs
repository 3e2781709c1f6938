use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::User;

/// Staff roles. The wire values are the Spanish strings the hosted store
/// keeps in `users.role`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "SUPER_ADMIN")]
    SuperAdmin,
    #[serde(rename = "ADMINISTRADOR")]
    Admin,
    #[serde(rename = "RECEPCIONISTA")]
    Receptionist,
    #[serde(rename = "ESPECIALISTA")]
    Specialist,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::SuperAdmin => write!(f, "SUPER_ADMIN"),
            Role::Admin => write!(f, "ADMINISTRADOR"),
            Role::Receptionist => write!(f, "RECEPCIONISTA"),
            Role::Specialist => write!(f, "ESPECIALISTA"),
        }
    }
}

/// What the authenticated caller is allowed to see. Built once per request
/// from the token claims; every list endpoint runs its rows through this
/// scope instead of sprinkling role conditionals around.
#[derive(Debug, Clone)]
pub struct AccessScope {
    pub role: Role,
    pub sede_ids: Vec<Uuid>,
}

impl AccessScope {
    pub fn new(role: Role, sede_ids: Vec<Uuid>) -> Self {
        Self { role, sede_ids }
    }

    pub fn for_user(user: &User) -> Self {
        Self {
            role: user.role,
            sede_ids: user.sede_ids.clone(),
        }
    }

    /// Admin tiers see the whole clinic; everyone else only their sedes.
    pub fn sees_every_sede(&self) -> bool {
        matches!(self.role, Role::SuperAdmin | Role::Admin)
    }

    pub fn can_access_sede(&self, sede_id: Uuid) -> bool {
        self.sees_every_sede() || self.sede_ids.contains(&sede_id)
    }

    pub fn can_manage_staff(&self) -> bool {
        matches!(self.role, Role::SuperAdmin | Role::Admin)
    }
}

/// Implemented by every entity that belongs to one or more sedes.
pub trait SedeScoped {
    fn visible_to(&self, scope: &AccessScope) -> bool;
}

/// Pure read-only projection of a row set under a scope.
pub fn scoped<T: SedeScoped>(scope: &AccessScope, items: Vec<T>) -> Vec<T> {
    items
        .into_iter()
        .filter(|item| item.visible_to(scope))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Row {
        sede_id: Uuid,
    }

    impl SedeScoped for Row {
        fn visible_to(&self, scope: &AccessScope) -> bool {
            scope.can_access_sede(self.sede_id)
        }
    }

    #[test]
    fn admin_tiers_see_everything() {
        let sede = Uuid::new_v4();
        for role in [Role::SuperAdmin, Role::Admin] {
            let scope = AccessScope::new(role, vec![]);
            assert!(scope.can_access_sede(sede));
        }
    }

    #[test]
    fn restricted_roles_only_see_their_sedes() {
        let mine = Uuid::new_v4();
        let other = Uuid::new_v4();
        let scope = AccessScope::new(Role::Receptionist, vec![mine]);

        let rows = vec![Row { sede_id: mine }, Row { sede_id: other }];
        let visible = scoped(&scope, rows);

        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].sede_id, mine);
    }

    #[test]
    fn role_round_trips_spanish_wire_values() {
        let role: Role = serde_json::from_str("\"RECEPCIONISTA\"").unwrap();
        assert_eq!(role, Role::Receptionist);
        assert_eq!(serde_json::to_string(&role).unwrap(), "\"RECEPCIONISTA\"");
    }
}
