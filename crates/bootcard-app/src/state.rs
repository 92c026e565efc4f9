// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::model::HelpPanel;
use crate::nav::{NavCommand, NavEvent, NavState};
use crate::theme::ThemeState;

/// Visibility of the two help-text panels. The toggles are independent of
/// each other and of navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PanelVisibility {
    language: bool,
    keyboard: bool,
}

impl PanelVisibility {
    pub fn is_visible(self, panel: HelpPanel) -> bool {
        match panel {
            HelpPanel::Language => self.language,
            HelpPanel::Keyboard => self.keyboard,
        }
    }

    fn toggle(&mut self, panel: HelpPanel) -> bool {
        let slot = match panel {
            HelpPanel::Language => &mut self.language,
            HelpPanel::Keyboard => &mut self.keyboard,
        };
        *slot = !*slot;
        *slot
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    pub nav: NavState,
    pub theme: ThemeState,
    pub panels: PanelVisibility,
    pub status_line: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(false)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppCommand {
    Nav(NavCommand),
    ToggleContrast,
    TogglePanel(HelpPanel),
    SetStatus(String),
    ClearStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    Nav(NavEvent),
    ContrastChanged(bool),
    PanelToggled { panel: HelpPanel, visible: bool },
    StatusUpdated(String),
    StatusCleared,
}

impl AppState {
    pub fn new(high_contrast: bool) -> Self {
        Self {
            nav: NavState::new(),
            theme: ThemeState::new(high_contrast),
            panels: PanelVisibility::default(),
            status_line: None,
        }
    }

    pub fn dispatch(&mut self, command: AppCommand) -> Vec<AppEvent> {
        match command {
            AppCommand::Nav(command) => self
                .nav
                .dispatch(command)
                .into_iter()
                .map(AppEvent::Nav)
                .collect(),
            AppCommand::ToggleContrast => {
                self.theme.toggle();
                let label = if self.theme.is_high_contrast() {
                    "contrast on"
                } else {
                    "contrast off"
                };
                vec![
                    AppEvent::ContrastChanged(self.theme.is_high_contrast()),
                    self.set_status(label),
                ]
            }
            AppCommand::TogglePanel(panel) => {
                let visible = self.panels.toggle(panel);
                vec![AppEvent::PanelToggled { panel, visible }]
            }
            AppCommand::SetStatus(message) => {
                vec![self.set_status(&message)]
            }
            AppCommand::ClearStatus => {
                self.status_line = None;
                vec![AppEvent::StatusCleared]
            }
        }
    }

    fn set_status(&mut self, message: &str) -> AppEvent {
        self.status_line = Some(message.to_owned());
        AppEvent::StatusUpdated(message.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::{AppCommand, AppEvent, AppState};
    use crate::ids::CardId;
    use crate::model::HelpPanel;
    use crate::nav::{NavCommand, NavEvent, TransitionKind};
    use crate::theme::{HIGH_CONTRAST, NORMAL};

    #[test]
    fn contrast_toggle_updates_palette_and_status() {
        let mut state = AppState::default();

        let events = state.dispatch(AppCommand::ToggleContrast);
        assert_eq!(state.theme.palette(), &HIGH_CONTRAST);
        assert_eq!(
            events,
            vec![
                AppEvent::ContrastChanged(true),
                AppEvent::StatusUpdated("contrast on".to_owned()),
            ],
        );

        let events = state.dispatch(AppCommand::ToggleContrast);
        assert_eq!(state.theme.palette(), &NORMAL);
        assert_eq!(
            events,
            vec![
                AppEvent::ContrastChanged(false),
                AppEvent::StatusUpdated("contrast off".to_owned()),
            ],
        );
    }

    #[test]
    fn configured_high_contrast_start() {
        let state = AppState::new(true);
        assert!(state.theme.is_high_contrast());
    }

    #[test]
    fn panel_toggles_are_independent() {
        let mut state = AppState::default();

        let events = state.dispatch(AppCommand::TogglePanel(HelpPanel::Language));
        assert_eq!(
            events,
            vec![AppEvent::PanelToggled {
                panel: HelpPanel::Language,
                visible: true,
            }],
        );
        assert!(state.panels.is_visible(HelpPanel::Language));
        assert!(!state.panels.is_visible(HelpPanel::Keyboard));

        state.dispatch(AppCommand::TogglePanel(HelpPanel::Keyboard));
        assert!(state.panels.is_visible(HelpPanel::Keyboard));

        let events = state.dispatch(AppCommand::TogglePanel(HelpPanel::Language));
        assert_eq!(
            events,
            vec![AppEvent::PanelToggled {
                panel: HelpPanel::Language,
                visible: false,
            }],
        );
        assert!(!state.panels.is_visible(HelpPanel::Language));
        assert!(state.panels.is_visible(HelpPanel::Keyboard));
    }

    #[test]
    fn navigation_commands_route_to_the_navigator() {
        let mut state = AppState::default();

        let events = state.dispatch(AppCommand::Nav(NavCommand::Navigate(CardId::new("C1"))));
        assert_eq!(events.len(), 1);
        assert!(matches!(
            &events[0],
            AppEvent::Nav(NavEvent::TransitionStarted {
                kind: TransitionKind::Forward,
                ..
            }),
        ));
        assert!(state.nav.in_flight());
    }

    #[test]
    fn nav_event_order_is_preserved_through_the_wrapper() {
        let mut state = AppState::default();
        let events = state.dispatch(AppCommand::Nav(NavCommand::Home));
        assert!(matches!(&events[0], AppEvent::Nav(NavEvent::ChromeHidden)));
        assert!(matches!(
            &events[1],
            AppEvent::Nav(NavEvent::TransitionStarted { .. }),
        ));
    }

    #[test]
    fn set_and_clear_status() {
        let mut state = AppState::default();

        let events = state.dispatch(AppCommand::SetStatus("busy".to_owned()));
        assert_eq!(events, vec![AppEvent::StatusUpdated("busy".to_owned())]);
        assert_eq!(state.status_line.as_deref(), Some("busy"));

        let events = state.dispatch(AppCommand::ClearStatus);
        assert_eq!(events, vec![AppEvent::StatusCleared]);
        assert_eq!(state.status_line, None);
    }
}
