// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keyboard focus arbitration.
//!
//! ## Candidates and priorities
//!
//! Every scope resolves to one candidate: a tag and a priority. Within a scope
//! ops apply in order. A [`KeyInputOp`] names the scope's candidate, and a
//! [`FocusOp`] sets the priority of the scope as it stands at that point.
//! Priorities, lowest first:
//!
//! 1. `Default`: a declared listener that neither holds nor requests focus.
//! 2. `CurrentFocus`: the listener that held focus after the previous frame.
//! 3. `None`: a scope released focus with `FocusOp { focus: false }`.
//! 4. `NewFocus`: a scope requested focus with `FocusOp { focus: true }`.
//!
//! A nested scope's candidate replaces its parent's when its priority is
//! higher, or when both are `NewFocus`. Among defaults the earliest scope wins;
//! among requests the latest wins, in pre-order over nested scopes. A parent
//! with no listener yet adopts its first listening child. A request declared
//! before any listener carries no tag and clears focus when it wins.
//!
//! ## Soft keyboard
//!
//! Within one scope the last [`SoftKeyboardOp`] wins. When scopes merge, any
//! explicit directive beats silence and `Open` beats `Close`. Releasing focus
//! implies `Close`, and so does ending up with no focused listener.

use hashbrown::HashMap;
use understory_ops::{FocusOp, KeyInputOp, OpKind, Ops, Reader, SoftKeyboardOp, Tag};

use crate::event::{Event, FocusEvent};
use crate::handler_events::HandlerEvents;

/// Directive for the platform's on-screen keyboard, as resolved by the last frame.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TextInputState {
    /// Leave the keyboard as it is.
    #[default]
    Keep,
    /// Hide the keyboard.
    Close,
    /// Show the keyboard.
    Open,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
enum Priority {
    Default,
    CurrentFocus,
    None,
    NewFocus,
}

impl Priority {
    fn replaces(self, other: Self) -> bool {
        // Favor the earliest default focus or the latest requested focus.
        self > other || self == other && self == Self::NewFocus
    }
}

#[derive(Copy, Clone, Debug)]
struct Candidate {
    tag: Option<Tag>,
    priority: Priority,
}

impl Candidate {
    const EMPTY: Self = Self {
        tag: None,
        priority: Priority::Default,
    };

    /// Whether a nested scope's candidate takes over from `current`.
    ///
    /// An empty scope, one with neither a listener nor a request so far, adopts
    /// the first child that names a listener.
    fn wins_over(&self, current: &Self) -> bool {
        self.priority.replaces(current.priority) || current.is_empty() && self.tag.is_some()
    }

    fn is_empty(&self) -> bool {
        self.tag.is_none() && self.priority == Priority::Default
    }
}

#[derive(Debug, Default)]
struct KeyHandler {
    /// Declared by a [`KeyInputOp`] in the current frame.
    visible: bool,
}

/// Cross-frame keyboard routing state.
#[derive(Debug, Default)]
pub(crate) struct KeyQueue {
    focus: Option<Tag>,
    handlers: HashMap<Tag, KeyHandler>,
    state: TextInputState,
}

impl KeyQueue {
    /// The listener holding keyboard focus.
    pub(crate) fn focus(&self) -> Option<Tag> {
        self.focus
    }

    /// The text input state resolved by the last frame.
    pub(crate) fn input_state(&self) -> TextInputState {
        self.state
    }

    /// Resolve focus for a new frame, queueing focus changes into `events`.
    pub(crate) fn frame(&mut self, root: &Ops, events: &mut HandlerEvents) {
        for h in self.handlers.values_mut() {
            h.visible = false;
        }

        let mut reader = Reader::new(root);
        let (candidate, mut keyboard) = self.resolve_scope(&mut reader);
        let focus = candidate.tag;

        let held = self.focus;
        let mut vanished = None;
        self.handlers.retain(|tag, h| {
            if !h.visible && held == Some(*tag) {
                vanished = Some(*tag);
            }
            h.visible
        });
        if let Some(tag) = vanished {
            tracing::debug!(?tag, "focused key listener is no longer declared");
            events.add(tag, FocusEvent { focus: false }.into());
            self.focus = None;
            if focus.is_none() {
                keyboard = TextInputState::Close;
            }
        }

        if focus != self.focus {
            tracing::debug!(old = ?self.focus, new = ?focus, "keyboard focus changed");
            if let Some(old) = self.focus {
                events.add(old, FocusEvent { focus: false }.into());
            }
            self.focus = focus;
            match focus {
                Some(new) => events.add(new, FocusEvent { focus: true }.into()),
                None => keyboard = TextInputState::Close,
            }
        }

        tracing::trace!(?keyboard, listeners = self.handlers.len(), "key frame resolved");
        self.state = keyboard;
    }

    /// Route a keyboard event to the focused listener, if any.
    pub(crate) fn push(&self, event: Event, events: &mut HandlerEvents) {
        match self.focus {
            Some(tag) => events.add(tag, event),
            None => tracing::trace!(?event, "no keyboard focus, dropping event"),
        }
    }

    fn resolve_scope(&mut self, r: &mut Reader<'_>) -> (Candidate, TextInputState) {
        let mut scope = Candidate::EMPTY;
        let mut keyboard = TextInputState::Keep;
        while let Some(op) = r.decode() {
            match op.kind {
                OpKind::KeyFocus => {
                    if FocusOp::decode(&op).focus {
                        scope.priority = Priority::NewFocus;
                    } else {
                        scope.priority = Priority::None;
                        keyboard = TextInputState::Close;
                    }
                }
                OpKind::KeySoftKeyboard => {
                    keyboard = if SoftKeyboardOp::decode(&op).show {
                        TextInputState::Open
                    } else {
                        TextInputState::Close
                    };
                }
                OpKind::KeyInput => {
                    let tag = KeyInputOp::decode(&op).tag;
                    self.handlers.entry(tag).or_default().visible = true;
                    scope.tag = Some(tag);
                    if self.focus == Some(tag) {
                        scope.priority = Priority::CurrentFocus;
                    }
                }
                OpKind::Push => {
                    let (child, child_keyboard) = self.resolve_scope(r);
                    keyboard = keyboard.max(child_keyboard);
                    if child.wins_over(&scope) {
                        scope = child;
                    }
                }
                OpKind::Pop => break,
                _ => {}
            }
        }
        (scope, keyboard)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{EditEvent, KeyEvent, KeyState, Modifiers};
    use alloc::string::String;
    use alloc::vec;
    use alloc::vec::Vec;

    fn focus_events(events: &mut HandlerEvents, tag: Tag) -> Vec<bool> {
        events
            .take(tag)
            .into_iter()
            .filter_map(|e| match e {
                Event::Focus(f) => Some(f.focus),
                _ => None,
            })
            .collect()
    }

    fn setup() -> (KeyQueue, HandlerEvents, Ops) {
        (KeyQueue::default(), HandlerEvents::default(), Ops::new())
    }

    fn listener(ops: &mut Ops, tag: Tag, focus: Option<bool>) {
        ops.push();
        KeyInputOp { tag }.add(ops);
        if let Some(focus) = focus {
            FocusOp { focus }.add(ops);
        }
        ops.pop();
    }

    #[test]
    fn single_listener_gets_default_focus() {
        let a = Tag::new();
        let (mut q, mut events, mut ops) = setup();
        KeyInputOp { tag: a }.add(&mut ops);
        q.frame(&ops, &mut events);
        assert_eq!(q.focus(), Some(a));
        assert_eq!(focus_events(&mut events, a), vec![true]);
        assert_eq!(q.input_state(), TextInputState::Keep);
    }

    #[test]
    fn first_default_candidate_wins() {
        let (a, b) = (Tag::new(), Tag::new());
        let (mut q, mut events, mut ops) = setup();
        listener(&mut ops, a, None);
        listener(&mut ops, b, None);
        q.frame(&ops, &mut events);
        assert_eq!(q.focus(), Some(a));
        assert!(focus_events(&mut events, b).is_empty());

        // Within one scope the last declaration names the scope's listener.
        let (mut q, mut ops) = (KeyQueue::default(), Ops::new());
        KeyInputOp { tag: b }.add(&mut ops);
        KeyInputOp { tag: a }.add(&mut ops);
        q.frame(&ops, &mut events);
        assert_eq!(q.focus(), Some(a));
    }

    #[test]
    fn default_order_is_preorder_over_scopes() {
        let (a, b) = (Tag::new(), Tag::new());
        let (mut q, mut events, mut ops) = setup();
        ops.push();
        ops.push();
        KeyInputOp { tag: a }.add(&mut ops);
        ops.pop();
        ops.pop();
        listener(&mut ops, b, None);
        q.frame(&ops, &mut events);
        assert_eq!(q.focus(), Some(a));

        let (mut q, mut ops) = (KeyQueue::default(), Ops::new());
        listener(&mut ops, b, None);
        ops.push();
        listener(&mut ops, a, None);
        ops.pop();
        q.frame(&ops, &mut events);
        assert_eq!(q.focus(), Some(b));
    }

    #[test]
    fn last_focus_request_wins() {
        let (a, b, c) = (Tag::new(), Tag::new(), Tag::new());
        let (mut q, mut events, mut ops) = setup();
        listener(&mut ops, a, Some(true));
        listener(&mut ops, b, Some(true));
        listener(&mut ops, c, None);
        q.frame(&ops, &mut events);
        assert_eq!(q.focus(), Some(b));
        assert_eq!(focus_events(&mut events, b), vec![true]);
        assert!(focus_events(&mut events, a).is_empty());
    }

    #[test]
    fn nested_request_after_parent_request_wins() {
        let (a, b) = (Tag::new(), Tag::new());
        let (mut q, mut events, mut ops) = setup();
        KeyInputOp { tag: a }.add(&mut ops);
        FocusOp { focus: true }.add(&mut ops);
        listener(&mut ops, b, Some(true));
        q.frame(&ops, &mut events);
        assert_eq!(q.focus(), Some(b));
        assert!(focus_events(&mut events, a).is_empty());
        assert_eq!(focus_events(&mut events, b), vec![true]);
    }

    #[test]
    fn parent_request_after_nested_request_wins() {
        let (a, b) = (Tag::new(), Tag::new());
        let (mut q, mut events, mut ops) = setup();
        listener(&mut ops, b, Some(true));
        KeyInputOp { tag: a }.add(&mut ops);
        FocusOp { focus: true }.add(&mut ops);
        q.frame(&ops, &mut events);
        assert_eq!(q.focus(), Some(a));

        // A request applies to the scope's candidate at that point, which may
        // already come from a nested scope.
        ops.reset();
        KeyInputOp { tag: a }.add(&mut ops);
        listener(&mut ops, b, Some(true));
        FocusOp { focus: true }.add(&mut ops);
        q.frame(&ops, &mut events);
        assert_eq!(q.focus(), Some(b));
    }

    #[test]
    fn request_applies_to_the_scopes_own_listener() {
        let (a, b, c) = (Tag::new(), Tag::new(), Tag::new());
        let (mut q, mut events, mut ops) = setup();
        KeyInputOp { tag: a }.add(&mut ops);
        KeyInputOp { tag: b }.add(&mut ops);
        FocusOp { focus: true }.add(&mut ops);
        q.frame(&ops, &mut events);
        assert_eq!(q.focus(), Some(b));

        // A request in a parent does not steal focus for a nested listener.
        ops.reset();
        KeyInputOp { tag: a }.add(&mut ops);
        listener(&mut ops, c, None);
        FocusOp { focus: true }.add(&mut ops);
        q.frame(&ops, &mut events);
        assert_eq!(q.focus(), Some(a));
    }

    #[test]
    fn request_beats_current_focus() {
        let (a, b) = (Tag::new(), Tag::new());
        let (mut q, mut events, mut ops) = setup();
        listener(&mut ops, a, None);
        listener(&mut ops, b, None);
        q.frame(&ops, &mut events);
        assert_eq!(q.focus(), Some(a));
        events.clear();

        ops.reset();
        listener(&mut ops, a, None);
        listener(&mut ops, b, Some(true));
        q.frame(&ops, &mut events);
        assert_eq!(q.focus(), Some(b));
        assert_eq!(focus_events(&mut events, a), vec![false]);
        assert_eq!(focus_events(&mut events, b), vec![true]);

        // Without further requests the current holder keeps focus.
        ops.reset();
        listener(&mut ops, a, None);
        listener(&mut ops, b, None);
        q.frame(&ops, &mut events);
        assert_eq!(q.focus(), Some(b));
        assert!(focus_events(&mut events, a).is_empty());
        assert!(focus_events(&mut events, b).is_empty());
    }

    #[test]
    fn vanished_focus_holder_is_notified_once() {
        let (a, b) = (Tag::new(), Tag::new());
        let (mut q, mut events, mut ops) = setup();
        listener(&mut ops, a, None);
        listener(&mut ops, b, None);
        q.frame(&ops, &mut events);
        events.clear();

        ops.reset();
        listener(&mut ops, b, None);
        q.frame(&ops, &mut events);
        assert_eq!(focus_events(&mut events, a), vec![false]);
        assert_eq!(q.focus(), Some(b));
        assert_eq!(focus_events(&mut events, b), vec![true]);

        ops.reset();
        q.frame(&ops, &mut events);
        assert_eq!(q.focus(), None);
        assert_eq!(focus_events(&mut events, b), vec![false]);
        assert_eq!(q.input_state(), TextInputState::Close);
    }

    #[test]
    fn release_keeps_listener_and_closes_keyboard() {
        let a = Tag::new();
        let (mut q, mut events, mut ops) = setup();
        listener(&mut ops, a, Some(true));
        SoftKeyboardOp { show: true }.add(&mut ops);
        q.frame(&ops, &mut events);
        assert_eq!(q.focus(), Some(a));
        assert_eq!(q.input_state(), TextInputState::Open);
        events.clear();

        ops.reset();
        listener(&mut ops, a, Some(false));
        q.frame(&ops, &mut events);
        assert_eq!(q.focus(), Some(a));
        assert!(focus_events(&mut events, a).is_empty());
        assert_eq!(q.input_state(), TextInputState::Close);
    }

    #[test]
    fn release_outranks_default_listeners() {
        let (a, b) = (Tag::new(), Tag::new());
        let (mut q, mut events, mut ops) = setup();
        listener(&mut ops, a, None);
        listener(&mut ops, b, Some(false));
        q.frame(&ops, &mut events);
        assert_eq!(q.focus(), Some(b));
        assert!(focus_events(&mut events, a).is_empty());
        assert_eq!(focus_events(&mut events, b), vec![true]);
        assert_eq!(q.input_state(), TextInputState::Close);
    }

    #[test]
    fn request_without_listener_clears_focus() {
        let a = Tag::new();
        let (mut q, mut events, mut ops) = setup();
        listener(&mut ops, a, None);
        q.frame(&ops, &mut events);
        assert_eq!(q.focus(), Some(a));
        events.clear();

        ops.reset();
        listener(&mut ops, a, None);
        ops.push();
        FocusOp { focus: true }.add(&mut ops);
        ops.pop();
        q.frame(&ops, &mut events);
        assert_eq!(q.focus(), None);
        assert_eq!(focus_events(&mut events, a), vec![false]);
        assert_eq!(q.input_state(), TextInputState::Close);
    }

    #[test]
    fn soft_keyboard_merges_across_scopes() {
        let a = Tag::new();
        let (mut q, mut events, mut ops) = setup();
        KeyInputOp { tag: a }.add(&mut ops);
        ops.push();
        SoftKeyboardOp { show: true }.add(&mut ops);
        ops.pop();
        ops.push();
        SoftKeyboardOp { show: false }.add(&mut ops);
        ops.pop();
        q.frame(&ops, &mut events);
        assert_eq!(q.input_state(), TextInputState::Open);

        // Within one scope, the last directive wins.
        ops.reset();
        KeyInputOp { tag: a }.add(&mut ops);
        SoftKeyboardOp { show: true }.add(&mut ops);
        SoftKeyboardOp { show: false }.add(&mut ops);
        q.frame(&ops, &mut events);
        assert_eq!(q.input_state(), TextInputState::Close);

        // Silence keeps the keyboard as it is.
        ops.reset();
        KeyInputOp { tag: a }.add(&mut ops);
        q.frame(&ops, &mut events);
        assert_eq!(q.input_state(), TextInputState::Keep);
    }

    #[test]
    fn push_routes_to_focus_only() {
        let (a, b) = (Tag::new(), Tag::new());
        let (mut q, mut events, mut ops) = setup();
        let key = Event::Key(KeyEvent {
            name: String::from("A"),
            modifiers: Modifiers::SHIFT,
            state: KeyState::Press,
        });

        // Nobody focused: dropped.
        q.push(key.clone(), &mut events);
        assert!(events.pending(a).is_empty());

        listener(&mut ops, a, None);
        listener(&mut ops, b, None);
        q.frame(&ops, &mut events);
        events.clear();
        q.push(key.clone(), &mut events);
        q.push(
            Event::Edit(EditEvent {
                text: String::from("a"),
            }),
            &mut events,
        );
        assert_eq!(events.pending(a).len(), 2);
        assert_eq!(events.pending(a)[0], key);
        assert!(events.pending(b).is_empty());
    }

    #[test]
    fn at_most_one_listener_is_focused() {
        let tags = [Tag::new(), Tag::new(), Tag::new(), Tag::new()];
        let (mut q, mut events, mut ops) = setup();
        let requests = [
            [None, None, None, None],
            [None, Some(true), None, Some(true)],
            [Some(true), None, Some(false), None],
            [None, None, None, None],
        ];
        let mut focused: Option<Tag> = None;
        for frame in requests {
            ops.reset();
            for (tag, request) in tags.iter().zip(frame) {
                listener(&mut ops, *tag, request);
            }
            q.frame(&ops, &mut events);
            let changes: Vec<_> = tags
                .iter()
                .map(|tag| (*tag, focus_events(&mut events, *tag)))
                .collect();
            for (tag, focus) in &changes {
                if focus.contains(&false) {
                    assert_eq!(focused, Some(*tag), "focus lost by a non-holder");
                    focused = None;
                }
            }
            for (tag, focus) in &changes {
                if focus.contains(&true) {
                    assert_eq!(focused, None, "focus gained while still held");
                    focused = Some(*tag);
                }
            }
            assert_eq!(focused, q.focus());
        }
    }

    #[test]
    fn priority_tie_break() {
        use Priority::*;
        assert!(NewFocus.replaces(NewFocus));
        assert!(!Default.replaces(Default));
        assert!(!CurrentFocus.replaces(CurrentFocus));
        assert!(!None.replaces(None));
        assert!(CurrentFocus.replaces(Default));
        assert!(None.replaces(CurrentFocus));
        assert!(NewFocus.replaces(None));
        assert!(!Default.replaces(NewFocus));
    }
}
