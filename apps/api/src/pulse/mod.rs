// Pulse: customer health, simulated account events, news signals, intelligence briefs
// and architecture diagrams. LLM calls go through llm_client.

pub mod brief;
pub mod diagram;
pub mod events;
pub mod handlers;
pub mod news;
pub mod prompts;
pub mod seed;
pub mod store;
