//! Authorization rules: ownership gates and listing scope.
//!
//! Kept as pure functions over the current user so the access rules are
//! testable without a database.

use uuid::Uuid;

use super::types::UserBody;

/// Ownership-or-role gate: the owner of a resource or any admin may act.
#[must_use]
pub fn can_modify(owner_id: Uuid, user: &UserBody) -> bool {
    owner_id == user.id || user.role.is_admin()
}

/// Owner scope for item listing.
///
/// Admins may filter by an arbitrary owner. Everyone else is scoped to
/// themselves; a USER-supplied owner filter is silently overridden rather
/// than rejected.
#[must_use]
pub fn list_scope(user: &UserBody, requested_owner: Option<Uuid>) -> Uuid {
    match requested_owner {
        Some(owner) if user.role.is_admin() => owner,
        _ => user.id,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::handlers::auth::types::Role;
    use chrono::Utc;

    fn user_with_role(role: Role) -> UserBody {
        UserBody {
            id: Uuid::new_v4(),
            full_name: "Test User".to_string(),
            email: "test@example.com".to_string(),
            role,
            avatar_url: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn owner_can_modify_own_resource() {
        let user = user_with_role(Role::User);
        assert!(can_modify(user.id, &user));
    }

    #[test]
    fn non_owner_user_cannot_modify() {
        let user = user_with_role(Role::User);
        assert!(!can_modify(Uuid::new_v4(), &user));
    }

    #[test]
    fn admin_can_modify_anything() {
        let admin = user_with_role(Role::Admin);
        assert!(can_modify(Uuid::new_v4(), &admin));
    }

    #[test]
    fn admin_list_scope_honors_owner_filter() {
        let admin = user_with_role(Role::Admin);
        let other = Uuid::new_v4();
        assert_eq!(list_scope(&admin, Some(other)), other);
        assert_eq!(list_scope(&admin, None), admin.id);
    }

    #[test]
    fn user_list_scope_overrides_owner_filter() {
        let user = user_with_role(Role::User);
        // The filter is silently overridden, not rejected.
        assert_eq!(list_scope(&user, Some(Uuid::new_v4())), user.id);
        assert_eq!(list_scope(&user, None), user.id);
    }
}
