pub mod conversation;
pub mod settings;
