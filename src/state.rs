use crate::services::ai::LlmProvider;
use crate::services::catalog::EventCatalog;
use crate::services::matcher::EventMatcher;

pub struct AppState {
    pub llm: Box<dyn LlmProvider>,
    pub catalog: Box<dyn EventCatalog>,
    pub matcher: EventMatcher,
}
