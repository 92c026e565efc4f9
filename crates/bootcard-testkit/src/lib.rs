// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use std::path::PathBuf;

use bootcard_app::{ButtonKind, Card, CardButton, CardId, ControlId, Deck, HelpTexts};

const CARD_TITLES: [&str; 10] = [
    "Welcome",
    "Try or install",
    "Language",
    "Keyboard layout",
    "Desktop layout",
    "Display theme",
    "Accessibility",
    "Network",
    "Release notes",
    "About this system",
];

const BUTTON_LABELS: [&str; 8] = [
    "Continue",
    "More options",
    "Customize",
    "Details",
    "Choose",
    "Adjust",
    "Review",
    "Open",
];

const BODY_LINES: [&str; 8] = [
    "Changes stay in memory until you install.",
    "Use the arrow keys to move between entries.",
    "Everything here can be revisited later.",
    "Settings apply to the running session.",
    "The installer copies your choices over.",
    "Hardware detection runs in the background.",
    "Pick the entry closest to your setup.",
    "Press enter to confirm a selection.",
];

const ENDPOINT_VERBS: [&str; 5] = [
    "start-live",
    "start-installer",
    "open-terminal",
    "run-check",
    "reboot",
];

const LANGUAGE_CHOICES: [&str; 6] = [
    "English (US)",
    "Português (Brasil)",
    "Deutsch",
    "Español",
    "Français",
    "Italiano",
];

const LAYOUT_CHOICES: [&str; 6] = ["us", "br-abnt2", "de", "es", "fr", "it"];

#[derive(Debug, Clone)]
struct DeterministicRng {
    state: u64,
}

impl DeterministicRng {
    fn new(seed: u64) -> Self {
        let mut state = seed ^ 0x9E37_79B9_7F4A_7C15;
        if state == 0 {
            state = 0xA409_3822_299F_31D0;
        }
        Self { state }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);

        let mut x = self.state;
        x ^= x >> 13;
        x ^= x << 7;
        x ^= x >> 17;
        x
    }

    fn int_n(&mut self, n: usize) -> usize {
        if n <= 1 {
            return 0;
        }
        (self.next_u64() % (n as u64)) as usize
    }

    fn bool(&mut self) -> bool {
        (self.next_u64() & 1) == 1
    }
}

/// Deterministic deck generator. Every deck it produces is structurally
/// valid: one root, unique ids, every goto target present and reachable.
#[derive(Debug, Clone)]
pub struct DeckFaker {
    rng: DeterministicRng,
}

impl DeckFaker {
    pub fn new(seed: u64) -> Self {
        let normalized = if seed == 0 { 1 } else { seed };
        Self {
            rng: DeterministicRng::new(normalized),
        }
    }

    /// Builds a deck of the root plus `extra_cards` more, wired as a random
    /// tree so every card is reachable through goto buttons.
    pub fn deck(&mut self, extra_cards: usize) -> Deck {
        let mut cards = vec![Card {
            id: CardId::root(),
            title: "Welcome".to_owned(),
            body: self.body_lines(),
            buttons: vec![],
            choices: vec![],
        }];

        for index in 1..=extra_cards {
            let parent = self.rng.int_n(cards.len());
            cards[parent].buttons.push(CardButton {
                id: ControlId::new(format!("B{index}")),
                label: self.pick(&BUTTON_LABELS).to_owned(),
                kind: ButtonKind::Goto,
            });
            cards.push(Card {
                id: CardId::new(format!("C{index}")),
                title: self.pick(&CARD_TITLES).to_owned(),
                body: self.body_lines(),
                buttons: vec![],
                choices: self.choice_lines(),
            });
        }

        for (index, card) in cards.iter_mut().enumerate() {
            if self.rng.bool() {
                let verb = self.pick(&ENDPOINT_VERBS);
                card.buttons.push(CardButton {
                    id: ControlId::new(format!("{verb}-{index}")),
                    label: self.pick(&BUTTON_LABELS).to_owned(),
                    kind: ButtonKind::Endpoint,
                });
            }
        }

        Deck {
            title: "Generated session".to_owned(),
            cards,
            help: HelpTexts {
                language: self.pick(&BODY_LINES).to_owned(),
                keyboard: self.pick(&BODY_LINES).to_owned(),
            },
        }
    }

    fn body_lines(&mut self) -> Vec<String> {
        let count = self.rng.int_n(3);
        (0..count)
            .map(|_| self.pick(&BODY_LINES).to_owned())
            .collect()
    }

    fn choice_lines(&mut self) -> Vec<String> {
        if !self.rng.bool() {
            return vec![];
        }
        let source: &[&str] = if self.rng.bool() {
            &LANGUAGE_CHOICES
        } else {
            &LAYOUT_CHOICES
        };
        let count = 1 + self.rng.int_n(source.len());
        source[..count].iter().map(|s| (*s).to_owned()).collect()
    }

    fn pick<'a>(&mut self, items: &'a [&'a str]) -> &'a str {
        items[self.rng.int_n(items.len())]
    }
}

/// Fixed small deck with stable ids for UI and navigation tests: `main`
/// links to `C1` (endpoints), `C2` (choices) and onwards to `C21`.
pub fn sample_deck() -> Deck {
    Deck {
        title: "Sample session".to_owned(),
        cards: vec![
            Card {
                id: CardId::root(),
                title: "Welcome".to_owned(),
                body: vec!["This session runs from memory.".to_owned()],
                buttons: vec![
                    goto("B1", "Try or install"),
                    goto("B2", "Language and keyboard"),
                ],
                choices: vec![],
            },
            Card {
                id: CardId::new("C1"),
                title: "Try or install".to_owned(),
                body: vec!["Disks stay untouched in the live session.".to_owned()],
                buttons: vec![
                    endpoint("start-live", "Start the live session"),
                    endpoint("start-installer", "Open the installer"),
                ],
                choices: vec![],
            },
            Card {
                id: CardId::new("C2"),
                title: "Language and keyboard".to_owned(),
                body: vec![],
                buttons: vec![goto("B21", "Keyboard layouts")],
                choices: LANGUAGE_CHOICES.iter().map(|s| (*s).to_owned()).collect(),
            },
            Card {
                id: CardId::new("C21"),
                title: "Keyboard layout".to_owned(),
                body: vec![],
                buttons: vec![],
                choices: LAYOUT_CHOICES.iter().map(|s| (*s).to_owned()).collect(),
            },
        ],
        help: HelpTexts {
            language: "The session language can be changed later.".to_owned(),
            keyboard: "Pick the layout matching your keyboard.".to_owned(),
        },
    }
}

/// A linear chain `main -> C1 -> C11 -> ...` of the given depth, for walking
/// the history up and down.
pub fn deep_deck(depth: usize) -> Deck {
    let mut cards = Vec::with_capacity(depth + 1);
    let mut root = Card {
        id: CardId::root(),
        title: "Welcome".to_owned(),
        body: vec![],
        buttons: vec![],
        choices: vec![],
    };
    if depth > 0 {
        root.buttons.push(goto("B1", "Deeper"));
    }
    cards.push(root);

    let mut suffix = String::new();
    for level in 1..=depth {
        suffix.push('1');
        let mut card = Card {
            id: CardId::new(format!("C{suffix}")),
            title: format!("Level {level}"),
            body: vec![],
            buttons: vec![],
            choices: vec![],
        };
        if level < depth {
            card.buttons.push(goto(&format!("B{suffix}1"), "Deeper"));
        }
        cards.push(card);
    }

    Deck {
        title: "Deep session".to_owned(),
        cards,
        help: HelpTexts::default(),
    }
}

/// Writes deck TOML to a fresh temp directory and hands back the directory
/// guard with the file path.
pub fn temp_deck_file(contents: &str) -> Result<(tempfile::TempDir, PathBuf)> {
    let dir = tempfile::tempdir().context("create temp dir")?;
    let path = dir.path().join("deck.toml");
    std::fs::write(&path, contents).context("write deck file")?;
    Ok((dir, path))
}

/// TOML rendering of [`sample_deck`], for loader and CLI tests.
pub fn sample_deck_toml() -> String {
    r#"version = 1
title = "Sample session"

[help]
language = "The session language can be changed later."
keyboard = "Pick the layout matching your keyboard."

[[cards]]
id = "main"
title = "Welcome"
body = ["This session runs from memory."]

[[cards.buttons]]
id = "B1"
label = "Try or install"

[[cards.buttons]]
id = "B2"
label = "Language and keyboard"

[[cards]]
id = "C1"
title = "Try or install"
body = ["Disks stay untouched in the live session."]

[[cards.buttons]]
id = "start-live"
label = "Start the live session"
kind = "endpoint"

[[cards.buttons]]
id = "start-installer"
label = "Open the installer"
kind = "endpoint"

[[cards]]
id = "C2"
title = "Language and keyboard"
choices = ["English (US)", "Português (Brasil)", "Deutsch", "Español", "Français", "Italiano"]

[[cards.buttons]]
id = "B21"
label = "Keyboard layouts"

[[cards]]
id = "C21"
title = "Keyboard layout"
choices = ["us", "br-abnt2", "de", "es", "fr", "it"]
"#
    .to_owned()
}

fn goto(id: &str, label: &str) -> CardButton {
    CardButton {
        id: ControlId::new(id),
        label: label.to_owned(),
        kind: ButtonKind::Goto,
    }
}

fn endpoint(id: &str, label: &str) -> CardButton {
    CardButton {
        id: ControlId::new(id),
        label: label.to_owned(),
        kind: ButtonKind::Endpoint,
    }
}
