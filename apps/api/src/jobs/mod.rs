// Jobs: the two commands this service issues against the store, archiving a
// posting and applying to one, plus their handlers.

pub mod commands;
pub mod handlers;
