// User preferences persisted through the store: assistant settings and
// conversation history.

pub mod handlers;
pub mod history;
pub mod settings;
