//! Service layer: access control plus the note, collaboration and user
//! orchestrators the API handlers call.
//!
//! Authorization stays with the caller: handlers run `verify_access` /
//! `verify_owner` before invoking a note operation. The services themselves
//! only enforce storage-level invariants.

mod access;
mod collaborations;
mod notes;
mod users;

pub use access::AccessControl;
pub use collaborations::CollaborationService;
pub use notes::NoteService;
pub use users::UserService;

#[cfg(test)]
pub(crate) mod test_support;
