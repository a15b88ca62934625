// Access: per-request identity resolution and the single role gate every
// dashboard and command handler goes through before touching data.

pub mod gate;
pub mod session;
