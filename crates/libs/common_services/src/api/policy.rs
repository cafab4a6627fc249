//! Owner-or-collaborator checks shared by every mutation.

use crate::database::event::event::EventAccess;

/// True when `user_id` owns the event.
#[must_use]
pub fn is_owner(access: &EventAccess, user_id: i32) -> bool {
    access.owner_id == user_id
}

/// An anonymous caller can never edit. A known caller can edit when they
/// own the event or are one of its collaborators.
#[must_use]
pub fn can_edit(access: &EventAccess, user_id: Option<i32>) -> bool {
    user_id.is_some_and(|id| is_owner(access, id) || access.collaborator_ids.contains(&id))
}

/// Request bodies may still carry `ownerId`, `requesterId` or `userId`.
/// They are optional, but when sent they have to name the authenticated caller.
#[must_use]
pub fn claimed_identity_matches(claimed: Option<i32>, user_id: i32) -> bool {
    claimed.is_none_or(|claimed| claimed == user_id)
}
