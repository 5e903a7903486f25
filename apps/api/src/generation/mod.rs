// Generation: the generate-message endpoint.
// Implements: task dispatch (match / qa / theme), prompt templating, history handling, theme schema.
// All model calls go through llm_client.

pub mod conversation;
pub mod generator;
pub mod handlers;
pub mod models;
pub mod prompts;
pub mod theme;
