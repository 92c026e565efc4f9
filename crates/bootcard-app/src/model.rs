// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};

use crate::ids::{CardId, ControlId};

/// Controls with ids the host wires to non-card actions. Deck buttons must
/// not reuse these ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixedControl {
    Home,
    Back,
    Language,
    Keyboard,
    Contrast,
}

impl FixedControl {
    pub const ALL: [Self; 5] = [
        Self::Home,
        Self::Back,
        Self::Language,
        Self::Keyboard,
        Self::Contrast,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Back => "back",
            Self::Language => "language",
            Self::Keyboard => "keyboard",
            Self::Contrast => "contrast",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "home" => Some(Self::Home),
            "back" => Some(Self::Back),
            "language" => Some(Self::Language),
            "keyboard" => Some(Self::Keyboard),
            "contrast" => Some(Self::Contrast),
            _ => None,
        }
    }

    pub fn control_id(self) -> ControlId {
        ControlId::new(self.as_str())
    }
}

/// The two auxiliary text panels toggled independently of card navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HelpPanel {
    Language,
    Keyboard,
}

impl HelpPanel {
    pub const ALL: [Self; 2] = [Self::Language, Self::Keyboard];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Language => "text-language",
            Self::Keyboard => "text-keyboard",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "text-language" => Some(Self::Language),
            "text-keyboard" => Some(Self::Keyboard),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Language => "language",
            Self::Keyboard => "keyboard",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ButtonKind {
    /// Forward navigation to the card the control id maps to.
    #[default]
    Goto,
    /// Leaf action handled by the invoking process; ends the session.
    Endpoint,
}

impl ButtonKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Goto => "goto",
            Self::Endpoint => "endpoint",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "goto" => Some(Self::Goto),
            "endpoint" => Some(Self::Endpoint),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardButton {
    pub id: ControlId,
    pub label: String,
    #[serde(default)]
    pub kind: ButtonKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub title: String,
    #[serde(default)]
    pub body: Vec<String>,
    #[serde(default)]
    pub buttons: Vec<CardButton>,
    /// Select-styled rows (locale lists and the like); display only.
    #[serde(default)]
    pub choices: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HelpTexts {
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub keyboard: String,
}

impl Default for HelpTexts {
    fn default() -> Self {
        Self {
            language: String::new(),
            keyboard: String::new(),
        }
    }
}

impl HelpTexts {
    pub fn text(&self, panel: HelpPanel) -> &str {
        match panel {
            HelpPanel::Language => &self.language,
            HelpPanel::Keyboard => &self.keyboard,
        }
    }
}

/// The host-document analog: every card the session can show, plus the help
/// panel texts. Read once at startup and never written back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    pub title: String,
    pub cards: Vec<Card>,
    #[serde(default)]
    pub help: HelpTexts,
}

impl Deck {
    pub fn card(&self, id: &CardId) -> Option<&Card> {
        self.cards.iter().find(|card| &card.id == id)
    }

    pub fn root(&self) -> Option<&Card> {
        self.card(&CardId::root())
    }

    pub fn contains(&self, id: &CardId) -> bool {
        self.card(id).is_some()
    }

    pub fn button_count(&self, id: &CardId) -> usize {
        self.card(id).map_or(0, |card| card.buttons.len())
    }
}

/// What activating a control means. This is the dispatch table: the single
/// place control ids are routed to navigation, theme, panel, or host actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlAction {
    Navigate(CardId),
    Home,
    Back,
    ToggleContrast,
    TogglePanel(HelpPanel),
    Endpoint(ControlId),
}

impl ControlAction {
    pub fn for_control(control: &ControlId) -> Self {
        if let Some(fixed) = FixedControl::parse(control.as_str()) {
            return match fixed {
                FixedControl::Home => Self::Home,
                FixedControl::Back => Self::Back,
                FixedControl::Language => Self::TogglePanel(HelpPanel::Language),
                FixedControl::Keyboard => Self::TogglePanel(HelpPanel::Keyboard),
                FixedControl::Contrast => Self::ToggleContrast,
            };
        }

        if control.is_forward_control() {
            return Self::Navigate(control.target_card());
        }

        Self::Endpoint(control.clone())
    }
}
