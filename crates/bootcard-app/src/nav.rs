// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! Card navigation: the history stack, the transition slot, and the
//! home/back chrome. Everything here is synchronous; the timer that delivers
//! [`NavCommand::CompleteTransition`] lives with the caller.

use std::time::Duration;

use tracing::debug;

use crate::ids::CardId;

/// Fallback applied when no usable delay is configured.
pub const DEFAULT_TRANSITION_MS: u64 = 500;

/// Duration of the animate-out window. Zero counts as unset, not as an
/// instant transition, and negative values are rejected the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionTiming {
    millis: u64,
}

impl TransitionTiming {
    pub fn from_millis(configured: Option<i64>) -> Self {
        match configured {
            Some(millis) if millis > 0 => Self {
                millis: millis as u64,
            },
            _ => Self {
                millis: DEFAULT_TRANSITION_MS,
            },
        }
    }

    pub const fn as_millis(self) -> u64 {
        self.millis
    }

    pub const fn duration(self) -> Duration {
        Duration::from_millis(self.millis)
    }
}

impl Default for TransitionTiming {
    fn default() -> Self {
        Self {
            millis: DEFAULT_TRANSITION_MS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionKind {
    Forward,
    Home,
    Back,
}

impl TransitionKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Forward => "forward",
            Self::Home => "home",
            Self::Back => "back",
        }
    }
}

/// The single in-flight slot. While occupied every navigation command is
/// ignored, so at most one timer is ever outstanding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub kind: TransitionKind,
    /// The card animating out.
    pub from: CardId,
    pub token: u64,
}

/// Visibility of the home/back controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChromeVisibility {
    Hidden,
    Visible,
}

/// What the screen shows for the current card right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardPhase {
    Steady,
    Leaving,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavCommand {
    Navigate(CardId),
    Home,
    Back,
    CompleteTransition { token: u64 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavEvent {
    TransitionStarted {
        kind: TransitionKind,
        from: CardId,
        to: CardId,
        token: u64,
    },
    TransitionFinished {
        visible: CardId,
    },
    ChromeShown,
    ChromeHidden,
    NavigationIgnored(NavCommand),
}

/// Navigation state for one session. The history always holds at least the
/// root entry; its last element names the currently (or about-to-be) visible
/// card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavState {
    history: Vec<CardId>,
    transition: Option<Transition>,
    chrome: ChromeVisibility,
    next_token: u64,
}

impl Default for NavState {
    fn default() -> Self {
        Self::new()
    }
}

impl NavState {
    pub fn new() -> Self {
        Self {
            history: vec![CardId::root()],
            transition: None,
            chrome: ChromeVisibility::Hidden,
            next_token: 0,
        }
    }

    pub fn history(&self) -> &[CardId] {
        &self.history
    }

    pub fn depth(&self) -> usize {
        self.history.len()
    }

    pub fn current(&self) -> CardId {
        self.history.last().cloned().unwrap_or_else(CardId::root)
    }

    pub fn in_flight(&self) -> bool {
        self.transition.is_some()
    }

    pub fn transition(&self) -> Option<&Transition> {
        self.transition.as_ref()
    }

    pub fn chrome(&self) -> ChromeVisibility {
        self.chrome
    }

    /// The card to draw and its phase: the outgoing card while a transition
    /// is in flight, otherwise the top of the history.
    pub fn displayed(&self) -> (CardId, CardPhase) {
        match &self.transition {
            Some(transition) => (transition.from.clone(), CardPhase::Leaving),
            None => (self.current(), CardPhase::Steady),
        }
    }

    pub fn dispatch(&mut self, command: NavCommand) -> Vec<NavEvent> {
        if self.transition.is_some() && !matches!(command, NavCommand::CompleteTransition { .. }) {
            debug!(?command, "navigation ignored while transition in flight");
            return vec![NavEvent::NavigationIgnored(command)];
        }

        match command {
            NavCommand::Navigate(target) => self.begin_forward(target),
            NavCommand::Home => self.begin_home(),
            NavCommand::Back => self.begin_back(),
            NavCommand::CompleteTransition { token } => self.complete(token),
        }
    }

    fn begin_forward(&mut self, target: CardId) -> Vec<NavEvent> {
        let from = self.current();
        let token = self.take_token();
        self.history.push(target.clone());
        self.transition = Some(Transition {
            kind: TransitionKind::Forward,
            from: from.clone(),
            token,
        });
        debug!(%from, to = %target, token, "forward transition started");
        vec![NavEvent::TransitionStarted {
            kind: TransitionKind::Forward,
            from,
            to: target,
            token,
        }]
    }

    fn begin_home(&mut self) -> Vec<NavEvent> {
        let from = self.current();
        let token = self.take_token();
        // Chrome and history change at the begin phase, not at completion.
        self.chrome = ChromeVisibility::Hidden;
        self.history = vec![CardId::root()];
        self.transition = Some(Transition {
            kind: TransitionKind::Home,
            from: from.clone(),
            token,
        });
        debug!(%from, token, "home transition started");
        vec![
            NavEvent::ChromeHidden,
            NavEvent::TransitionStarted {
                kind: TransitionKind::Home,
                from,
                to: CardId::root(),
                token,
            },
        ]
    }

    fn begin_back(&mut self) -> Vec<NavEvent> {
        let from = self.current();
        // Guarded pop: the root entry stays put, so back at the root runs a
        // transition that lands on the root again.
        if self.history.len() > 1 {
            self.history.pop();
        }
        let to = self.current();
        let token = self.take_token();
        self.transition = Some(Transition {
            kind: TransitionKind::Back,
            from: from.clone(),
            token,
        });
        debug!(%from, %to, token, "back transition started");
        vec![NavEvent::TransitionStarted {
            kind: TransitionKind::Back,
            from,
            to,
            token,
        }]
    }

    fn complete(&mut self, token: u64) -> Vec<NavEvent> {
        let Some(transition) = self.transition.as_ref() else {
            debug!(token, "transition timer fired with no transition in flight");
            return vec![];
        };
        if transition.token != token {
            debug!(
                token,
                current = transition.token,
                "stale transition timer ignored"
            );
            return vec![];
        }

        let kind = transition.kind;
        self.transition = None;
        let visible = self.current();
        debug!(kind = kind.as_str(), %visible, token, "transition finished");

        match kind {
            TransitionKind::Forward => {
                self.chrome = ChromeVisibility::Visible;
                vec![
                    NavEvent::TransitionFinished { visible },
                    NavEvent::ChromeShown,
                ]
            }
            TransitionKind::Home => {
                vec![NavEvent::TransitionFinished { visible }]
            }
            TransitionKind::Back => {
                if self.history.len() > 1 {
                    vec![NavEvent::TransitionFinished { visible }]
                } else {
                    self.chrome = ChromeVisibility::Hidden;
                    vec![
                        NavEvent::TransitionFinished { visible },
                        NavEvent::ChromeHidden,
                    ]
                }
            }
        }
    }

    fn take_token(&mut self) -> u64 {
        self.next_token = self.next_token.wrapping_add(1);
        self.next_token
    }
}
