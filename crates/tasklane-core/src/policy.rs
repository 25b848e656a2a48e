//! Authorization policy
//!
//! Pure decision logic: given an intent kind, the resolved target (if any)
//! and the requesting identity (if any), decide allow/deny. The dispatcher
//! resolves records and supplies the bootstrap flag; this module holds no
//! state.
//!
//! Missing-credential (`Unauthorized`) and wrong-credential (`Forbidden`)
//! are distinct decisions with distinct outward status semantics and are
//! never collapsed.

use crate::types::{Todo, User};

/// Three-way authorization decision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Forbidden,
    Unauthorized,
}

/// The operation being authorized, stripped of its payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntentKind {
    Create,
    List,
    Update,
    Delete,
}

/// Authorize an operation.
///
/// Precedence:
/// 1. create: an identity always may; no identity may only while no user has
///    ever registered (bootstrap mode).
/// 2. list: always allowed; the dispatcher scopes results to the requester.
/// 3. update/delete: unowned targets are open to anyone; owned targets demand
///    the owning identity. Target existence is the dispatcher's concern and
///    short-circuits before this runs.
pub fn authorize(
    kind: IntentKind,
    target: Option<&Todo>,
    requester: Option<&User>,
    any_user_registered: bool,
) -> Decision {
    match kind {
        IntentKind::Create => match requester {
            Some(_) => Decision::Allow,
            None if !any_user_registered => Decision::Allow,
            None => Decision::Unauthorized,
        },
        IntentKind::List => Decision::Allow,
        IntentKind::Update | IntentKind::Delete => {
            let owner = target.and_then(|todo| todo.owner_id.as_deref());
            match (owner, requester) {
                (None, _) => Decision::Allow,
                (Some(_), None) => Decision::Unauthorized,
                (Some(owner), Some(user)) if owner == user.id => Decision::Allow,
                (Some(_), Some(_)) => Decision::Forbidden,
            }
        }
    }
}
