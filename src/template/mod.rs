pub(crate) mod applier;
pub(crate) mod card;
pub(crate) mod catalog;
