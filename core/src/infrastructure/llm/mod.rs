#[cfg(test)]
pub mod fake_client;
pub mod gemini_client;

pub use gemini_client::GeminiLLMClient;
