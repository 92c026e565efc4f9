// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use std::collections::BTreeSet;

use bootcard_app::{ButtonKind, CardId, ControlId, Deck, FixedControl};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeckError {
    MissingRoot,
    DuplicateCard(CardId),
    DuplicateControl(ControlId),
    ReservedControl(ControlId),
    MalformedGoto(ControlId),
    MisdeclaredEndpoint(ControlId),
}

impl std::fmt::Display for DeckError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingRoot => write!(f, "deck has no `{}` card", bootcard_app::ROOT_CARD),
            Self::DuplicateCard(id) => write!(f, "duplicate card id {id}"),
            Self::DuplicateControl(id) => write!(f, "duplicate button id {id}"),
            Self::ReservedControl(id) => {
                write!(f, "button id {id} is reserved for a fixed control")
            }
            Self::MalformedGoto(id) => {
                write!(f, "goto button {id} must be `B` followed by a card suffix")
            }
            Self::MisdeclaredEndpoint(id) => write!(
                f,
                "endpoint button {id} must not start with `B`; that id names a card target"
            ),
        }
    }
}

impl std::error::Error for DeckError {}

pub type DeckResult<T> = std::result::Result<T, DeckError>;

/// Deck shapes that load fine but will surprise at runtime. A missing goto
/// target renders as an empty card; an unreachable card never renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeckWarning {
    MissingGotoTarget { control: ControlId, target: CardId },
    UnreachableCard(CardId),
}

impl std::fmt::Display for DeckWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingGotoTarget { control, target } => {
                write!(f, "goto button {control} targets missing card {target}")
            }
            Self::UnreachableCard(id) => {
                write!(
                    f,
                    "card {id} is unreachable from {}",
                    bootcard_app::ROOT_CARD
                )
            }
        }
    }
}

/// Checks the structural rules a deck must satisfy before a session starts.
/// The first broken rule fails the whole deck; soft findings come back as
/// warnings in card order.
pub fn validate(deck: &Deck) -> DeckResult<Vec<DeckWarning>> {
    if deck.root().is_none() {
        return Err(DeckError::MissingRoot);
    }

    let mut card_ids = BTreeSet::new();
    for card in &deck.cards {
        if !card_ids.insert(card.id.clone()) {
            return Err(DeckError::DuplicateCard(card.id.clone()));
        }
    }

    let mut control_ids = BTreeSet::new();
    for card in &deck.cards {
        for button in &card.buttons {
            if FixedControl::parse(button.id.as_str()).is_some() {
                return Err(DeckError::ReservedControl(button.id.clone()));
            }
            if !control_ids.insert(button.id.clone()) {
                return Err(DeckError::DuplicateControl(button.id.clone()));
            }
            match button.kind {
                ButtonKind::Goto => {
                    if !button.id.is_forward_control() {
                        return Err(DeckError::MalformedGoto(button.id.clone()));
                    }
                }
                ButtonKind::Endpoint => {
                    if button.id.is_forward_control() {
                        return Err(DeckError::MisdeclaredEndpoint(button.id.clone()));
                    }
                }
            }
        }
    }

    let mut warnings = Vec::new();
    for card in &deck.cards {
        for button in &card.buttons {
            if button.id.is_forward_control() {
                let target = button.id.target_card();
                if !deck.contains(&target) {
                    warnings.push(DeckWarning::MissingGotoTarget {
                        control: button.id.clone(),
                        target,
                    });
                }
            }
        }
    }

    let reachable = reachable_cards(deck);
    for card in &deck.cards {
        if !reachable.contains(&card.id) {
            warnings.push(DeckWarning::UnreachableCard(card.id.clone()));
        }
    }

    Ok(warnings)
}

fn reachable_cards(deck: &Deck) -> BTreeSet<CardId> {
    let mut reachable = BTreeSet::new();
    let mut pending = vec![CardId::root()];
    while let Some(id) = pending.pop() {
        if !reachable.insert(id.clone()) {
            continue;
        }
        let Some(card) = deck.card(&id) else {
            continue;
        };
        for button in &card.buttons {
            if button.id.is_forward_control() {
                let target = button.id.target_card();
                if deck.contains(&target) && !reachable.contains(&target) {
                    pending.push(target);
                }
            }
        }
    }
    reachable
}
