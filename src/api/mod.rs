pub mod client;
pub mod models;
pub mod response;

pub use client::{ChatModel, OpenAiChatClient};
pub use models::{ChatRequest, ResponseFormat};
