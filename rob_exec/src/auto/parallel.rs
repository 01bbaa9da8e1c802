//! Parallel action group
//!
//! All children are started together and run each tick until every one of
//! them has finished. A child which finishes before its siblings is not run
//! again, but its `done` is only called when the whole group is done.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use log::trace;

use super::{Action, ActionCtx, BoxedAction};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Runs a set of actions at the same time.
///
/// No timeout is applied, a child that never finishes stalls the group.
#[derive(Debug)]
pub struct ParallelAction {
    children: Vec<Child>,
}

#[derive(Debug)]
struct Child {
    action: BoxedAction,

    /// Set once the child has reported finished, after which it is not run.
    finished: bool,

    /// Set once `done` has been called on the child.
    done: bool,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl ParallelAction {
    pub fn new(actions: Vec<BoxedAction>) -> Self {
        Self {
            children: actions
                .into_iter()
                .map(|action| Child {
                    action,
                    finished: false,
                    done: false,
                })
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

impl Action for ParallelAction {
    fn start(&mut self, ctx: &mut ActionCtx<'_>) {
        for child in self.children.iter_mut() {
            child.action.start(ctx);
            child.finished = false;
            child.done = false;
        }
    }

    fn run(&mut self, ctx: &mut ActionCtx<'_>) {
        for child in self.children.iter_mut().filter(|c| !c.finished) {
            if child.action.is_finished(ctx) {
                trace!("Parallel child {} finished", child.action.name());
                child.finished = true;
            } else {
                child.action.run(ctx);
            }
        }
    }

    fn is_finished(&self, ctx: &ActionCtx<'_>) -> bool {
        self.children
            .iter()
            .all(|c| c.finished || c.action.is_finished(ctx))
    }

    fn done(&mut self, ctx: &mut ActionCtx<'_>) {
        for child in self.children.iter_mut().filter(|c| !c.done) {
            child.action.done(ctx);
            child.done = true;
        }
    }

    fn name(&self) -> String {
        let names: Vec<String> = self.children.iter().map(|c| c.action.name()).collect();
        format!("Parallel[{}]", names.join(", "))
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------
