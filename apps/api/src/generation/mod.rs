// Resume and cover-letter generation.
// Prompt assembly, style options and the generation flow. All completion
// calls go through llm_client.

pub mod generator;
pub mod handlers;
pub mod prompts;
pub mod style;
