//! Agent orchestration - LLM-powered intent extraction and response phrasing
//!
//! This crate is the "brain" of the wayfarer pipeline:
//! 1. **Intent Planning** (`planner`) - Parse NL → ordered `PlanStep` list
//! 2. **Plan Execution** (`executor`) - Dispatch steps over the `TravelProvider` port
//! 3. **Response Composition** (`composer`) - Phrase the outcome for the user
//!
//! # Key Types
//!
//! - `LlmClient` - Pluggable single-shot completion trait (see `llm` module)
//! - `IntentPlanner` - Prompt build + fenced-JSON parse with degrade-to-empty
//! - `ResponseComposer` - Three-branch prompt selection
//!
//! # Degradation Principle
//!
//! The LLM is strictly a translator. A malformed extraction never fails the
//! request; it routes to the generic conversational branch. Only the final
//! phrasing call, which has no fallback, propagates its error.

pub mod composer;
pub mod executor;
pub mod llm;
pub mod planner;
pub mod prompts;

pub use composer::ResponseComposer;
pub use executor::execute_plan;
pub use llm::LlmClient;
pub use planner::IntentPlanner;
