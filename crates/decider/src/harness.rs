//! Given-When-Then harness for testing aggregate behaviors.
//!
//! Works on event *drafts* rather than stamped events, so expected outcomes
//! can be written as plain payload literals without fabricating metadata.
//! Panics are fine here: this module is for test code only.

use crate::{
    behavior::Behavior,
    engine::{CommandFailure, Engine, Outcome},
};

pub struct TestHarness<B: Behavior> {
    engine: Engine<B>,
}

impl<B: Behavior> TestHarness<B> {
    pub fn new() -> Self {
        Self {
            engine: Engine::new(),
        }
    }

    /// Uses a preconfigured engine, e.g. one carrying extra routing tags.
    pub fn with_engine(engine: Engine<B>) -> Self {
        Self { engine }
    }

    /// Starts from the absent state: the command under test runs in the
    /// construction phase.
    pub fn given_no_prior_events(self) -> WhenStage<B> {
        WhenStage {
            engine: self.engine,
            state: None,
        }
    }

    /// Folds the given drafts into the prior state. The first draft must be
    /// a construction event.
    pub fn given(self, events: Vec<B::Event>) -> WhenStage<B> {
        let state = match B::fold_all(None, &events) {
            Ok(state) => state,
            Err(err) => panic!("given events do not fold: {err}"),
        };

        WhenStage {
            engine: self.engine,
            state,
        }
    }

    pub fn given_event(self, event: B::Event) -> WhenStage<B> {
        self.given(vec![event])
    }
}

impl<B: Behavior> Default for TestHarness<B> {
    fn default() -> Self {
        Self::new()
    }
}

pub struct WhenStage<B: Behavior> {
    engine: Engine<B>,
    state: Option<B>,
}

impl<B: Behavior> WhenStage<B> {
    pub fn when(self, command: B::Command) -> ThenStage<B> {
        let result = self.engine.handle(self.state.as_ref(), command);

        ThenStage {
            prior: self.state,
            result,
        }
    }
}

pub struct ThenStage<B: Behavior> {
    prior: Option<B>,
    result: Result<Outcome<B>, CommandFailure>,
}

impl<B: Behavior> ThenStage<B>
where
    B::Event: PartialEq,
{
    /// Asserts the produced event payloads, in order. Returns the stage so
    /// a state assertion can follow.
    pub fn then_expect_drafts(self, expected: Vec<B::Event>) -> Self {
        match &self.result {
            Ok(outcome) => {
                let actual: Vec<&B::Event> = outcome.events.iter().map(|e| e.payload()).collect();
                let expected_refs: Vec<&B::Event> = expected.iter().collect();
                assert_eq!(
                    actual, expected_refs,
                    "produced drafts do not match.\nexpected: {expected:?}"
                );
            }
            Err(failure) => panic!("expected events but command failed: {failure}"),
        }
        self
    }

    pub fn then_expect_draft(self, expected: B::Event) -> Self {
        self.then_expect_drafts(vec![expected])
    }
}

impl<B: Behavior> ThenStage<B> {
    pub fn then_expect_rejection(self, reason: &str) {
        match self.result {
            Ok(outcome) => panic!(
                "expected rejection {reason:?} but got {} event(s)",
                outcome.events.len()
            ),
            Err(CommandFailure::Rejected(actual)) => {
                assert_eq!(actual.as_str(), reason, "rejected for a different reason");
            }
            Err(failure) => panic!("expected rejection {reason:?} but got: {failure}"),
        }
    }

    pub fn then_expect_unhandled(self) {
        match self.result {
            Ok(outcome) => panic!(
                "expected unhandled command but got {} event(s)",
                outcome.events.len()
            ),
            Err(CommandFailure::Unhandled { .. }) => {}
            Err(failure) => panic!("expected unhandled command but got: {failure}"),
        }
    }

    /// Asserts on the state after the command, or on the untouched prior
    /// state when the command failed.
    pub fn then_state<F>(self, assertion: F)
    where
        F: FnOnce(Option<&B>),
    {
        match &self.result {
            Ok(outcome) => assertion(Some(&outcome.state)),
            Err(_) => assertion(self.prior.as_ref()),
        }
    }

    /// Full access to the result for custom assertions.
    pub fn then_verify<F>(self, verification: F)
    where
        F: FnOnce(Result<Outcome<B>, CommandFailure>),
    {
        verification(self.result);
    }
}
