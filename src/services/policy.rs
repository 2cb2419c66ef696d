use crate::models::{EntryStatus, UserRole};

/// Role gate consumed at the transition boundary.
///
/// Admins may set any status; regular users may only apply (PENDING) and
/// withdraw (WITHDRAWN). Whether the status change itself is legal is the
/// lifecycle service's call, not the policy's.
pub fn can_set_status(role: UserRole, target: EntryStatus) -> bool {
    match role {
        UserRole::Admin => true,
        UserRole::User => matches!(target, EntryStatus::Pending | EntryStatus::Withdrawn),
    }
}
