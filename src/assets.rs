pub(crate) mod logo;
