//! Tenant share identity and vanity slug reservation.

pub(crate) mod backend;
pub(crate) mod identity;
pub(crate) mod slug;
