/*!
    Decision and action points of the decode engine.

    A high-level operation customizes the engine by binding functions to a
    fixed set of named points. Decisions are predicates the engine consults
    to pick a branch, actions are side effects it fires at well-defined
    moments. Every bound function receives the live session and one shared
    state value owned by the caller for the duration of a single call.
*/

use crate::{backend::Backend, session::StreamSession};

/**
    Branch points of the decode engine.
*/
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Decision {
    /// Decode another frame, even if the current one is fresh
    DecodeFrame,
    /// Read a new packet from the container before feeding the decoder
    ReadPacket,
    /// Run the scaler after decoding
    Scale,
    /// Scale even if the scaled frame already matches the decoded frame
    IgnoreScaledPts,
}

impl Decision {
    pub const COUNT: usize = 4;

    pub const ALL: [Self; Self::COUNT] = [
        Self::DecodeFrame,
        Self::ReadPacket,
        Self::Scale,
        Self::IgnoreScaledPts,
    ];
}

/**
    Hook points of the decode engine, listed in the order they can fire.
*/
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    Enter,
    PreRead,
    PostRead,
    PreFeed,
    PostFeed,
    FeedWouldBlock,
    PreReceive,
    PostReceive,
    ReceiveWouldBlock,
    FrameDone,
    PreScale,
    PostScale,
}

impl Action {
    pub const COUNT: usize = 12;

    pub const ALL: [Self; Self::COUNT] = [
        Self::Enter,
        Self::PreRead,
        Self::PostRead,
        Self::PreFeed,
        Self::PostFeed,
        Self::FeedWouldBlock,
        Self::PreReceive,
        Self::PostReceive,
        Self::ReceiveWouldBlock,
        Self::FrameDone,
        Self::PreScale,
        Self::PostScale,
    ];
}

/**
    What a decision point evaluates to.
*/
pub enum Rule<B: Backend, S> {
    Always,
    Never,
    Call(fn(&StreamSession<B>, &mut S) -> bool),
}

/**
    What an action point does when fired.
*/
pub enum Hook<B: Backend, S> {
    Noop,
    Call(fn(&mut StreamSession<B>, &mut S)),
}

// Manual impls, deriving would require `B: Clone` and `S: Clone`

impl<B: Backend, S> Clone for Rule<B, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<B: Backend, S> Copy for Rule<B, S> {}

impl<B: Backend, S> Clone for Hook<B, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<B: Backend, S> Copy for Hook<B, S> {}

/**
    Table of [`Rule`]s, one per [`Decision`]. Unbound decisions are
    [`Rule::Never`].
*/
pub struct Decider<B: Backend, S> {
    rules: [Rule<B, S>; Decision::COUNT],
}

impl<B: Backend, S> Decider<B, S> {
    pub fn new() -> Self {
        Self {
            rules: [Rule::Never; Decision::COUNT],
        }
    }

    /**
        Bind a decision, replacing any previous rule.
    */
    #[must_use]
    pub fn bind(mut self, decision: Decision, rule: Rule<B, S>) -> Self {
        self.set(decision, rule);
        self
    }

    pub fn set(&mut self, decision: Decision, rule: Rule<B, S>) {
        self.rules[decision as usize] = rule;
    }

    pub fn rule(&self, decision: Decision) -> Rule<B, S> {
        self.rules[decision as usize]
    }

    /**
        Evaluate a decision against the session and shared state.
    */
    pub fn decide(&self, decision: Decision, session: &StreamSession<B>, state: &mut S) -> bool {
        match self.rules[decision as usize] {
            Rule::Always => true,
            Rule::Never => false,
            Rule::Call(f) => f(session, state),
        }
    }
}

impl<B: Backend, S> Default for Decider<B, S> {
    fn default() -> Self {
        Self::new()
    }
}

/**
    Table of [`Hook`]s, one per [`Action`]. Unbound actions are
    [`Hook::Noop`].
*/
pub struct Actor<B: Backend, S> {
    hooks: [Hook<B, S>; Action::COUNT],
}

impl<B: Backend, S> Actor<B, S> {
    pub fn new() -> Self {
        Self {
            hooks: [Hook::Noop; Action::COUNT],
        }
    }

    #[must_use]
    pub fn bind(mut self, action: Action, hook: Hook<B, S>) -> Self {
        self.set(action, hook);
        self
    }

    pub fn set(&mut self, action: Action, hook: Hook<B, S>) {
        self.hooks[action as usize] = hook;
    }

    pub fn hook(&self, action: Action) -> Hook<B, S> {
        self.hooks[action as usize]
    }

    /**
        Fire an action with the session and shared state.
    */
    pub fn act(&self, action: Action, session: &mut StreamSession<B>, state: &mut S) {
        if let Hook::Call(f) = self.hooks[action as usize] {
            f(session, state);
        }
    }
}

impl<B: Backend, S> Default for Actor<B, S> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{self, MockBackend};

    fn count_calls(_: &StreamSession<MockBackend>, calls: &mut u32) -> bool {
        *calls += 1;
        true
    }

    fn bump(_: &mut StreamSession<MockBackend>, calls: &mut u32) {
        *calls += 10;
    }

    #[test]
    fn enum_tables_match_discriminants() {
        for (i, decision) in Decision::ALL.iter().enumerate() {
            assert_eq!(*decision as usize, i);
        }
        for (i, action) in Action::ALL.iter().enumerate() {
            assert_eq!(*action as usize, i);
        }
    }

    #[test]
    fn unbound_slots_are_inert() {
        let mut session = mock::session();
        let decider = Decider::<MockBackend, u32>::new();
        let actor = Actor::<MockBackend, u32>::new();
        let mut calls = 0;

        for decision in Decision::ALL {
            assert!(!decider.decide(decision, &session, &mut calls));
        }
        for action in Action::ALL {
            actor.act(action, &mut session, &mut calls);
        }
        assert_eq!(calls, 0);
    }

    #[test]
    fn bound_slots_dispatch() {
        let mut session = mock::session();
        let decider = Decider::<MockBackend, u32>::new()
            .bind(Decision::Scale, Rule::Always)
            .bind(Decision::DecodeFrame, Rule::Call(count_calls));
        let actor = Actor::new().bind(Action::FrameDone, Hook::Call(bump));
        let mut calls = 0;

        assert!(decider.decide(Decision::Scale, &session, &mut calls));
        assert!(decider.decide(Decision::DecodeFrame, &session, &mut calls));
        assert!(!decider.decide(Decision::ReadPacket, &session, &mut calls));
        assert_eq!(calls, 1);

        actor.act(Action::FrameDone, &mut session, &mut calls);
        actor.act(Action::Enter, &mut session, &mut calls);
        assert_eq!(calls, 11);
    }

    #[test]
    fn rebinding_replaces() {
        let mut decider = Decider::<MockBackend, ()>::new().bind(Decision::Scale, Rule::Always);
        assert!(matches!(decider.rule(Decision::Scale), Rule::Always));
        decider.set(Decision::Scale, Rule::Never);
        assert!(matches!(decider.rule(Decision::Scale), Rule::Never));

        let actor = Actor::<MockBackend, ()>::default();
        assert!(matches!(actor.hook(Action::PostScale), Hook::Noop));
    }
}
