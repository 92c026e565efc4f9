// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! Fixed palette tables for the normal and high-contrast themes.

/// A 24-bit color. Kept toolkit-free so this crate stays independent of the
/// rendering backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

const BLACK: Rgb = Rgb(0, 0, 0);
const WHITE: Rgb = Rgb(255, 255, 255);
/// `#ffda00`, the high-contrast accent.
const AMBER: Rgb = Rgb(0xff, 0xda, 0x00);
/// `#00b8d4`, the normal screen background.
const CYAN: Rgb = Rgb(0x00, 0xb8, 0xd4);
/// `#0097a7`, the normal button and rule color.
const TEAL: Rgb = Rgb(0x00, 0x97, 0xa7);
/// `#009aad`, the normal navigation bar background.
const DEEP_TEAL: Rgb = Rgb(0x00, 0x9a, 0xad);
/// `#b2ebf2`, the normal navigation button text.
const PALE_CYAN: Rgb = Rgb(0xb2, 0xeb, 0xf2);

/// Colors for every styled region of the splash: the screen, card text,
/// forward buttons, endpoint buttons, the navigation bar and its buttons,
/// horizontal rules, and choice rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub screen_bg: Rgb,
    pub card_fg: Rgb,
    pub button_bg: Rgb,
    pub button_fg: Rgb,
    pub endpoint_bg: Rgb,
    pub endpoint_fg: Rgb,
    pub nav_bg: Rgb,
    pub nav_button_fg: Rgb,
    pub rule_fg: Rgb,
    pub select_bg: Rgb,
    pub select_fg: Rgb,
}

pub const HIGH_CONTRAST: Palette = Palette {
    screen_bg: BLACK,
    card_fg: AMBER,
    button_bg: AMBER,
    button_fg: BLACK,
    endpoint_bg: AMBER,
    endpoint_fg: BLACK,
    nav_bg: AMBER,
    nav_button_fg: BLACK,
    rule_fg: AMBER,
    select_bg: AMBER,
    select_fg: BLACK,
};

pub const NORMAL: Palette = Palette {
    screen_bg: CYAN,
    card_fg: WHITE,
    button_bg: TEAL,
    button_fg: WHITE,
    endpoint_bg: TEAL,
    endpoint_fg: WHITE,
    nav_bg: DEEP_TEAL,
    nav_button_fg: PALE_CYAN,
    rule_fg: TEAL,
    select_bg: TEAL,
    select_fg: PALE_CYAN,
};

/// The contrast flag and nothing else. Toggling never touches navigation
/// state, so a toggle mid-transition is safe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ThemeState {
    high_contrast: bool,
}

impl ThemeState {
    pub fn new(high_contrast: bool) -> Self {
        Self { high_contrast }
    }

    pub fn toggle(&mut self) {
        self.high_contrast = !self.high_contrast;
    }

    pub fn is_high_contrast(self) -> bool {
        self.high_contrast
    }

    pub fn palette(self) -> &'static Palette {
        if self.high_contrast {
            &HIGH_CONTRAST
        } else {
            &NORMAL
        }
    }
}

/// Terminal rendition of a configured animation name. Unknown names degrade
/// to no effect rather than failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CardEffect {
    #[default]
    None,
    Dim,
}

impl CardEffect {
    pub fn for_name(name: &str) -> Self {
        match name {
            "fade-out" => Self::Dim,
            _ => Self::None,
        }
    }
}
