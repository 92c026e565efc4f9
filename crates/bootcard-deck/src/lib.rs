// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow, bail};
use tracing::warn;

use bootcard_app::{ButtonKind, Card, CardButton, CardId, ControlId, Deck, HelpTexts};

pub mod validation;

pub use validation::{DeckError, DeckResult, DeckWarning, validate};

pub const DECK_VERSION: i64 = 1;

/// Reads and validates a deck file. Hard rule violations fail the load; soft
/// findings are logged and returned so callers can surface a count.
pub fn load(path: &Path) -> Result<(Deck, Vec<DeckWarning>)> {
    let raw =
        fs::read_to_string(path).with_context(|| format!("read deck file {}", path.display()))?;
    let value: toml::Value =
        toml::from_str(&raw).with_context(|| format!("parse TOML deck {}", path.display()))?;

    let version = value
        .get("version")
        .and_then(toml::Value::as_integer)
        .ok_or_else(|| {
            anyhow!(
                "deck file {} is not versioned. Add `version = 1` at the top level",
                path.display()
            )
        })?;
    if version != DECK_VERSION {
        bail!(
            "unsupported deck version {} in {}; expected version = 1",
            version,
            path.display()
        );
    }

    let deck: Deck = value
        .try_into()
        .with_context(|| format!("decode deck {}", path.display()))?;
    let warnings =
        validate(&deck).with_context(|| format!("validate deck {}", path.display()))?;
    for warning in &warnings {
        warn!(%warning, "deck validation warning");
    }
    Ok((deck, warnings))
}

/// The welcome deck used when no deck file is configured.
pub fn builtin() -> Deck {
    Deck {
        title: "Live session".to_owned(),
        cards: vec![
            Card {
                id: CardId::root(),
                title: "Welcome".to_owned(),
                body: vec![
                    "This system is running from the live medium.".to_owned(),
                    "Nothing touches your disks until you choose to install.".to_owned(),
                ],
                buttons: vec![
                    goto("B1", "Try or install"),
                    goto("B2", "Language and keyboard"),
                    goto("B3", "About this system"),
                ],
                choices: vec![],
            },
            Card {
                id: CardId::new("C1"),
                title: "Try or install".to_owned(),
                body: vec![
                    "The live session keeps every change in memory.".to_owned(),
                    "The installer walks through disks, users and locales.".to_owned(),
                ],
                buttons: vec![
                    endpoint("start-live", "Start the live session"),
                    endpoint("start-installer", "Open the installer"),
                ],
                choices: vec![],
            },
            Card {
                id: CardId::new("C2"),
                title: "Language and keyboard".to_owned(),
                body: vec!["Pick the language for menus and messages.".to_owned()],
                buttons: vec![goto("B21", "Keyboard layouts")],
                choices: vec![
                    "English (US)".to_owned(),
                    "Português (Brasil)".to_owned(),
                    "Deutsch".to_owned(),
                    "Español".to_owned(),
                    "Français".to_owned(),
                ],
            },
            Card {
                id: CardId::new("C21"),
                title: "Keyboard layout".to_owned(),
                body: vec!["Layouts apply to the running session immediately.".to_owned()],
                buttons: vec![],
                choices: vec![
                    "us".to_owned(),
                    "br-abnt2".to_owned(),
                    "de".to_owned(),
                    "es".to_owned(),
                    "fr".to_owned(),
                ],
            },
            Card {
                id: CardId::new("C3"),
                title: "About this system".to_owned(),
                body: vec![
                    "Session, kernel and hardware details live here.".to_owned(),
                    "Everything shown is collected locally.".to_owned(),
                ],
                buttons: vec![],
                choices: vec![],
            },
        ],
        help: HelpTexts {
            language: "The session language affects menus and suggested keyboard layouts. \
                       It can be changed later from the system settings."
                .to_owned(),
            keyboard: "Choose the layout that matches your physical keyboard. The first \
                       entry comes from the boot options."
                .to_owned(),
        },
    }
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
