pub mod execution;
pub mod executor;
pub mod run_state;

pub use execution::{CommitCompletion, CommitInvocation, SearchCompletion, SearchInvocation};
pub use executor::TaskExecutor;
pub use run_state::TaskRunState;
