// Real-estate investment tools: deterministic metrics calculator, risk ladder,
// and the LLM-backed property analysis provider.

pub mod analysis;
pub mod handlers;
pub mod metrics;
pub mod prompts;
pub mod risk;
