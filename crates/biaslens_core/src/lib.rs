//! Bias Lens core: domain records, the pure search/analysis state machine,
//! view models and client-side rules.
mod analysis;
mod effect;
mod msg;
mod page;
pub mod route;
pub mod rules;
mod search;
mod state;
pub mod text;
mod types;
mod update;
pub mod verdict;
mod view_model;

pub use analysis::{AnalysisState, FactCheckState};
pub use effect::Effect;
pub use msg::Msg;
pub use page::{Cursor, Page};
pub use route::{build_analyze_link, Route};
pub use search::{SearchPhase, SearchState};
pub use state::{AppState, LoadError};
pub use types::{
    AnalyzeResult, ArticleStub, BiasLabel, BiasResult, ExtractResult, ExtractStatus,
    FactCheckItem, FactCheckRequest, FactCheckResult, FactCheckStatus, SummarizeRequest,
    SummaryResult,
};
pub use update::update;
pub use view_model::{AnalysisView, AppViewModel, SearchView};
