//! Series action group
//!
//! Children run one after the other. Each child is started, run once per tick
//! until it reports finished, then done, and the next child is started on the
//! same tick. A child which is already finished straight after `start` is
//! never run.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use log::{log, Level};
use std::collections::VecDeque;

use super::{Action, ActionCtx, BoxedAction};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Runs a sequence of actions one at a time.
#[derive(Debug)]
pub struct SeriesAction {
    /// Actions not yet started.
    pending: VecDeque<BoxedAction>,

    /// The active action.
    current: Option<BoxedAction>,

    /// Level used to log each action starting and finishing.
    log_level: Level,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl SeriesAction {
    pub fn new(actions: Vec<BoxedAction>) -> Self {
        Self::with_log_level(actions, Level::Debug)
    }

    pub fn with_log_level(actions: Vec<BoxedAction>, log_level: Level) -> Self {
        Self {
            pending: actions.into(),
            current: None,
            log_level,
        }
    }

    /// Name of the active action, if any.
    pub fn current_name(&self) -> Option<String> {
        self.current.as_ref().map(|a| a.name())
    }

    /// Start pending actions until one is left active or none remain.
    fn start_next(&mut self, ctx: &mut ActionCtx<'_>) {
        while let Some(mut next) = self.pending.pop_front() {
            log!(self.log_level, "Starting action {}", next.name());
            next.start(ctx);

            if next.is_finished(ctx) {
                log!(self.log_level, "Action {} finished", next.name());
                next.done(ctx);
            } else {
                self.current = Some(next);
                return;
            }
        }
    }
}

impl Action for SeriesAction {
    fn start(&mut self, ctx: &mut ActionCtx<'_>) {
        self.start_next(ctx);
    }

    fn run(&mut self, ctx: &mut ActionCtx<'_>) {
        let finished = match self.current.as_mut() {
            Some(cur) => {
                cur.run(ctx);
                cur.is_finished(ctx)
            }
            None => false,
        };

        if finished {
            if let Some(mut cur) = self.current.take() {
                log!(self.log_level, "Action {} finished", cur.name());
                cur.done(ctx);
            }
            self.start_next(ctx);
        }
    }

    fn is_finished(&self, _ctx: &ActionCtx<'_>) -> bool {
        self.current.is_none() && self.pending.is_empty()
    }

    /// Finish the active action and discard the rest of the sequence.
    fn done(&mut self, ctx: &mut ActionCtx<'_>) {
        if let Some(mut cur) = self.current.take() {
            cur.done(ctx);
        }
        self.pending.clear();
    }

    fn name(&self) -> String {
        let mut names: Vec<String> = self.current.iter().map(|a| a.name()).collect();
        names.extend(self.pending.iter().map(|a| a.name()));
        format!("Series[{}]", names.join(", "))
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------
