//! Query planner adapters.
//!
//! - [`LlmQueryPlanner`]: chat model over the OpenAI-compatible API
//! - [`TemplateQueryPlanner`]: fixed templates, no network

mod llm;
mod template;

pub use llm::{
    DEFAULT_API_BASE, DEFAULT_CONTACT_FOCUS, DEFAULT_MAX_QUERIES, DEFAULT_MODEL, LlmQueryPlanner,
    diversify_prompt, plan_prompt,
};
pub use template::TemplateQueryPlanner;
