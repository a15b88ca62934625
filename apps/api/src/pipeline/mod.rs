// Pipeline: fixed four-stage hiring pipeline and the candidate-facing
// "what's next" affordances derived from an application.

pub mod actions;
pub mod stages;
