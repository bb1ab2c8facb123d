/// Run bookkeeping for one kind of asynchronous request.
///
/// Every start takes a fresh, monotonically increasing run id. Only the most
/// recently started run is current; completions of older runs are stale.
#[derive(Debug, Clone, Default)]
pub struct TaskRunState {
    last_started_run_id: Option<u64>,
    last_finished_run_id: Option<u64>,
    sequence: u64,
}

impl TaskRunState {
    pub fn is_running(&self) -> bool {
        self.last_started_run_id.is_some() && self.last_started_run_id != self.last_finished_run_id
    }

    pub fn last_started_run_id(&self) -> Option<u64> {
        self.last_started_run_id
    }

    pub fn last_finished_run_id(&self) -> Option<u64> {
        self.last_finished_run_id
    }

    pub fn next_run_id(&mut self) -> u64 {
        self.sequence = self.sequence.saturating_add(1);
        self.sequence
    }

    pub fn on_started(&mut self, run_id: u64) {
        self.last_started_run_id = Some(run_id);
    }

    /// Records the completion of `run_id`. Returns false when the run is
    /// stale and its result must be discarded.
    pub fn on_finished(&mut self, run_id: u64) -> bool {
        if !self.is_current(run_id) {
            return false;
        }
        self.last_finished_run_id = Some(run_id);
        true
    }

    pub fn is_current(&self, run_id: u64) -> bool {
        self.last_started_run_id == Some(run_id)
    }

    /// Makes every run started so far stale.
    pub fn invalidate(&mut self) {
        self.last_started_run_id = None;
        self.last_finished_run_id = None;
    }
}
