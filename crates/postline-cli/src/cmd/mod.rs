pub mod hydrate;
pub mod status;
