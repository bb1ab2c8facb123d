use crate::runtime::event::EditorEvent;
use std::collections::HashMap;
use std::time::{Duration, Instant};

#[derive(Debug)]
pub enum SchedulerCommand {
    /// Emit `event` once `delay` has passed without another debounce under
    /// the same key. Each new debounce replaces the pending one.
    Debounce {
        key: String,
        delay: Duration,
        event: EditorEvent,
    },
    Cancel {
        key: String,
    },
}

#[derive(Debug, Clone)]
struct Guard {
    key: String,
    version: u64,
}

#[derive(Debug)]
struct DelayedTask {
    due_at: Instant,
    guard: Guard,
    event: EditorEvent,
}

#[derive(Debug, Default)]
pub struct Scheduler {
    delayed: Vec<DelayedTask>,
    key_versions: HashMap<String, u64>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, command: SchedulerCommand, now: Instant) {
        match command {
            SchedulerCommand::Debounce { key, delay, event } => {
                let version = self.bump_version(&key);
                self.delayed.retain(|task| task.guard.key != key);
                self.delayed.push(DelayedTask {
                    due_at: now + delay,
                    guard: Guard { key, version },
                    event,
                });
            }
            SchedulerCommand::Cancel { key } => {
                self.bump_version(&key);
                self.delayed.retain(|task| task.guard.key != key);
            }
        }
    }

    pub fn drain_ready(&mut self, now: Instant) -> Vec<EditorEvent> {
        let mut ready = Vec::new();
        let mut idx = 0usize;
        while idx < self.delayed.len() {
            if self.delayed[idx].due_at <= now {
                let task = self.delayed.swap_remove(idx);
                if self.task_is_valid(&task) {
                    ready.push(task.event);
                }
            } else {
                idx += 1;
            }
        }

        ready
    }

    /// Earliest instant at which a delayed event becomes ready.
    pub fn next_due(&self) -> Option<Instant> {
        self.delayed.iter().map(|task| task.due_at).min()
    }

    pub fn is_pending(&self, key: &str) -> bool {
        self.delayed.iter().any(|task| task.guard.key == key)
    }

    /// Drops every pending event. Used on teardown.
    pub fn clear(&mut self) {
        for task in self.delayed.drain(..) {
            let entry = self.key_versions.entry(task.guard.key).or_insert(0);
            *entry = entry.saturating_add(1);
        }
    }

    fn task_is_valid(&self, task: &DelayedTask) -> bool {
        let current = *self.key_versions.get(&task.guard.key).unwrap_or(&0);
        current == task.guard.version
    }

    fn bump_version(&mut self, key: &str) -> u64 {
        let entry = self.key_versions.entry(key.to_string()).or_insert(0);
        *entry = entry.saturating_add(1);
        *entry
    }
}
