use crate::core::RawValue;
use crate::provider::MapOptions;
use crate::runtime::scheduler::SchedulerCommand;
use crate::task::{CommitInvocation, SearchInvocation};

/// Work the editor state asks the runtime to carry out.
#[derive(Debug)]
pub enum Effect {
    Schedule(SchedulerCommand),
    CreateMap(MapOptions),
    StartSearch(SearchInvocation),
    StartCommit(CommitInvocation),
    /// Report a new value to the host form.
    EmitValue(RawValue),
}
