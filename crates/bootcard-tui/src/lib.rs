// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! Terminal front end for the boot splash. This crate owns the event loop,
//! key routing, and rendering; every navigation rule lives in `bootcard_app`
//! and is reached only through `AppState::dispatch`.

use anyhow::{Context, Result};
use bootcard_app::{
    AppCommand, AppEvent, AppState, ButtonKind, CardEffect, CardId, CardPhase, ChromeVisibility,
    ControlAction, ControlId, Deck, FixedControl, HelpPanel, NavCommand, NavEvent, Palette, Rgb,
    TransitionTiming,
};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use crossterm::{execute, terminal};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use std::io;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;

/// Messages delivered back into the event loop from timer threads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InternalEvent {
    TransitionElapsed { token: u64 },
    ClearStatus { token: u64 },
}

/// One-shot wake-up used to finish a card transition. The production
/// implementation sleeps on a spawned thread and sends `TransitionElapsed`
/// back; tests record the request and deliver the event by hand.
pub trait TransitionTimer {
    fn schedule(&mut self, token: u64, delay: Duration, tx: Sender<InternalEvent>) -> Result<()>;
}

/// Presentation knobs resolved from configuration before the loop starts.
/// The enter effect applies to a card once it has arrived via a transition
/// and stays until the next one, the way animation classes stick in the
/// source decks; the stock names map it to no visible change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiOptions {
    pub timing: TransitionTiming,
    pub enter_effect: CardEffect,
    pub exit_effect: CardEffect,
}

impl Default for UiOptions {
    fn default() -> Self {
        Self {
            timing: TransitionTiming::default(),
            enter_effect: CardEffect::for_name("fade-in"),
            exit_effect: CardEffect::for_name("fade-out"),
        }
    }
}

/// How the session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
    /// An endpoint button was activated; the id tells the invoking script
    /// what to launch next.
    Endpoint(ControlId),
    /// The splash was dismissed without choosing anything.
    Dismissed,
}

#[derive(Debug, Clone, PartialEq, Default)]
struct ViewData {
    cursor: usize,
    /// True once any transition has completed; the initial root card never
    /// carries the enter effect.
    entered: bool,
    status_token: u64,
    outcome: Option<SessionOutcome>,
}

pub fn run_app<T: TransitionTimer>(
    state: &mut AppState,
    deck: &Deck,
    timer: &mut T,
    options: &UiOptions,
) -> Result<SessionOutcome> {
    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen).context("enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;

    let mut view_data = ViewData::default();
    let (internal_tx, internal_rx) = mpsc::channel();

    let mut result = Ok(());
    loop {
        process_internal_events(
            state,
            &mut view_data,
            timer,
            &internal_tx,
            &internal_rx,
            options,
        );

        if let Err(error) = terminal.draw(|frame| render(frame, state, deck, &view_data, options)) {
            result = Err(error).context("draw frame");
            break;
        }

        let has_event = event::poll(Duration::from_millis(120)).context("poll event")?;
        if has_event {
            match event::read().context("read event")? {
                Event::Key(key) => {
                    if handle_key_event(
                        state,
                        deck,
                        &mut view_data,
                        timer,
                        &internal_tx,
                        options,
                        key,
                    ) {
                        break;
                    }
                }
                Event::Resize(_, _) => {}
                _ => {}
            }
        }
    }

    disable_raw_mode().context("disable raw mode")?;
    execute!(io::stdout(), terminal::LeaveAlternateScreen).context("leave alternate screen")?;
    result?;

    Ok(view_data.outcome.unwrap_or(SessionOutcome::Dismissed))
}

fn process_internal_events<T: TransitionTimer>(
    state: &mut AppState,
    view_data: &mut ViewData,
    timer: &mut T,
    internal_tx: &Sender<InternalEvent>,
    internal_rx: &Receiver<InternalEvent>,
    options: &UiOptions,
) {
    while let Ok(event) = internal_rx.try_recv() {
        match event {
            InternalEvent::TransitionElapsed { token } => {
                let events =
                    state.dispatch(AppCommand::Nav(NavCommand::CompleteTransition { token }));
                apply_app_events(state, view_data, timer, internal_tx, options, events);
            }
            InternalEvent::ClearStatus { token } => {
                if token == view_data.status_token {
                    state.dispatch(AppCommand::ClearStatus);
                }
            }
        }
    }
}

fn handle_key_event<T: TransitionTimer>(
    state: &mut AppState,
    deck: &Deck,
    view_data: &mut ViewData,
    timer: &mut T,
    internal_tx: &Sender<InternalEvent>,
    options: &UiOptions,
    key: KeyEvent,
) -> bool {
    if key.code == KeyCode::Char('q') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return true;
    }

    match key.code {
        KeyCode::Char('q') => return true,
        KeyCode::Up | KeyCode::Char('k') => move_cursor(state, deck, view_data, -1),
        KeyCode::Down | KeyCode::Char('j') => move_cursor(state, deck, view_data, 1),
        KeyCode::Enter => {
            let index = view_data.cursor;
            return activate_indexed(state, deck, view_data, timer, internal_tx, options, index);
        }
        KeyCode::Char(digit @ '1'..='9') => {
            let index = digit as usize - '1' as usize;
            return activate_indexed(state, deck, view_data, timer, internal_tx, options, index);
        }
        KeyCode::Esc | KeyCode::Left => {
            return activate_fixed(
                state,
                view_data,
                timer,
                internal_tx,
                options,
                FixedControl::Back,
            );
        }
        KeyCode::Home | KeyCode::Char('h') => {
            return activate_fixed(
                state,
                view_data,
                timer,
                internal_tx,
                options,
                FixedControl::Home,
            );
        }
        KeyCode::Char('c') => {
            return activate_fixed(
                state,
                view_data,
                timer,
                internal_tx,
                options,
                FixedControl::Contrast,
            );
        }
        KeyCode::Char('l') | KeyCode::F(2) => {
            return activate_fixed(
                state,
                view_data,
                timer,
                internal_tx,
                options,
                FixedControl::Language,
            );
        }
        KeyCode::F(3) => {
            return activate_fixed(
                state,
                view_data,
                timer,
                internal_tx,
                options,
                FixedControl::Keyboard,
            );
        }
        _ => {}
    }
    false
}

fn move_cursor(state: &AppState, deck: &Deck, view_data: &mut ViewData, delta: isize) {
    let (card_id, _) = state.nav.displayed();
    let count = deck.button_count(&card_id);
    if count == 0 {
        view_data.cursor = 0;
        return;
    }
    let current = view_data.cursor.min(count - 1) as isize;
    view_data.cursor = (current + delta).rem_euclid(count as isize) as usize;
}

fn activate_indexed<T: TransitionTimer>(
    state: &mut AppState,
    deck: &Deck,
    view_data: &mut ViewData,
    timer: &mut T,
    internal_tx: &Sender<InternalEvent>,
    options: &UiOptions,
    index: usize,
) -> bool {
    let (card_id, _) = state.nav.displayed();
    let Some(card) = deck.card(&card_id) else {
        return false;
    };
    let Some(button) = card.buttons.get(index) else {
        return false;
    };
    let control = button.id.clone();
    activate_control(state, view_data, timer, internal_tx, options, &control)
}

fn activate_fixed<T: TransitionTimer>(
    state: &mut AppState,
    view_data: &mut ViewData,
    timer: &mut T,
    internal_tx: &Sender<InternalEvent>,
    options: &UiOptions,
    fixed: FixedControl,
) -> bool {
    let control = fixed.control_id();
    activate_control(state, view_data, timer, internal_tx, options, &control)
}

/// Routes one control through the dispatch table. Returns true when the
/// session is over.
fn activate_control<T: TransitionTimer>(
    state: &mut AppState,
    view_data: &mut ViewData,
    timer: &mut T,
    internal_tx: &Sender<InternalEvent>,
    options: &UiOptions,
    control: &ControlId,
) -> bool {
    let command = match ControlAction::for_control(control) {
        ControlAction::Endpoint(id) => {
            view_data.outcome = Some(SessionOutcome::Endpoint(id));
            return true;
        }
        ControlAction::Navigate(card) => AppCommand::Nav(NavCommand::Navigate(card)),
        ControlAction::Home => AppCommand::Nav(NavCommand::Home),
        ControlAction::Back => AppCommand::Nav(NavCommand::Back),
        ControlAction::ToggleContrast => AppCommand::ToggleContrast,
        ControlAction::TogglePanel(panel) => AppCommand::TogglePanel(panel),
    };
    let events = state.dispatch(command);
    apply_app_events(state, view_data, timer, internal_tx, options, events);
    false
}

fn apply_app_events<T: TransitionTimer>(
    state: &mut AppState,
    view_data: &mut ViewData,
    timer: &mut T,
    internal_tx: &Sender<InternalEvent>,
    options: &UiOptions,
    events: Vec<AppEvent>,
) {
    for event in events {
        match event {
            AppEvent::Nav(NavEvent::TransitionStarted { token, .. }) => {
                if let Err(error) =
                    timer.schedule(token, options.timing.duration(), internal_tx.clone())
                {
                    emit_status(
                        state,
                        view_data,
                        timer,
                        internal_tx,
                        options,
                        format!("transition timer failed: {error}"),
                    );
                    // No wake-up will arrive for this token; settle the
                    // transition now instead of leaving the slot occupied.
                    let settled = state
                        .dispatch(AppCommand::Nav(NavCommand::CompleteTransition { token }));
                    apply_app_events(state, view_data, timer, internal_tx, options, settled);
                }
            }
            AppEvent::Nav(NavEvent::TransitionFinished { .. }) => {
                view_data.cursor = 0;
                view_data.entered = true;
            }
            AppEvent::Nav(NavEvent::NavigationIgnored(_)) => {
                emit_status(
                    state,
                    view_data,
                    timer,
                    internal_tx,
                    options,
                    "busy".to_owned(),
                );
            }
            AppEvent::StatusUpdated(_) => {
                view_data.status_token = view_data.status_token.saturating_add(1);
                schedule_status_clear(internal_tx, view_data.status_token);
            }
            _ => {}
        }
    }
}

fn emit_status<T: TransitionTimer>(
    state: &mut AppState,
    view_data: &mut ViewData,
    timer: &mut T,
    internal_tx: &Sender<InternalEvent>,
    options: &UiOptions,
    message: String,
) {
    let events = state.dispatch(AppCommand::SetStatus(message));
    apply_app_events(state, view_data, timer, internal_tx, options, events);
}

fn schedule_status_clear(internal_tx: &Sender<InternalEvent>, token: u64) {
    let sender = internal_tx.clone();
    thread::spawn(move || {
        thread::sleep(Duration::from_secs(4));
        let _ = sender.send(InternalEvent::ClearStatus { token });
    });
}

fn render(
    frame: &mut ratatui::Frame<'_>,
    state: &AppState,
    deck: &Deck,
    view_data: &ViewData,
    options: &UiOptions,
) {
    let palette = state.theme.palette();
    let area = frame.area();

    frame.render_widget(
        Block::default().style(Style::default().bg(color(palette.screen_bg))),
        area,
    );

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(2),
        ])
        .split(area);

    render_nav_bar(frame, layout[0], state, deck, palette);
    render_card_area(frame, layout[1], state, deck, view_data, options, palette);
    render_footer(frame, layout[2], state, palette);

    for panel in HelpPanel::ALL {
        if state.panels.is_visible(panel) {
            render_help_overlay(frame, area, deck, panel, palette);
        }
    }
}

fn render_nav_bar(
    frame: &mut ratatui::Frame<'_>,
    area: Rect,
    state: &AppState,
    deck: &Deck,
    palette: &Palette,
) {
    let widget = Paragraph::new(nav_bar_text(state))
        .alignment(Alignment::Right)
        .style(
            Style::default()
                .bg(color(palette.nav_bg))
                .fg(color(palette.nav_button_fg)),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(deck.title.clone()),
        );
    frame.render_widget(widget, area);
}

fn nav_bar_text(state: &AppState) -> String {
    let contrast = if state.theme.is_high_contrast() {
        "contrast: high [c] "
    } else {
        "contrast: normal [c] "
    };
    match state.nav.chrome() {
        ChromeVisibility::Visible => format!("home [h]  back [esc]  {contrast}"),
        ChromeVisibility::Hidden => contrast.to_owned(),
    }
}

fn render_card_area(
    frame: &mut ratatui::Frame<'_>,
    area: Rect,
    state: &AppState,
    deck: &Deck,
    view_data: &ViewData,
    options: &UiOptions,
    palette: &Palette,
) {
    let (card_id, phase) = state.nav.displayed();
    let leaving = phase == CardPhase::Leaving;

    let mut style = Style::default()
        .bg(color(palette.screen_bg))
        .fg(color(palette.card_fg));
    if leaving && options.exit_effect == CardEffect::Dim {
        style = style.add_modifier(Modifier::DIM);
    } else if !leaving && view_data.entered && options.enter_effect == CardEffect::Dim {
        style = style.add_modifier(Modifier::DIM);
    }

    let title = deck
        .card(&card_id)
        .map(|card| card.title.clone())
        .unwrap_or_default();

    let widget = Paragraph::new(card_lines(deck, &card_id, leaving, view_data.cursor, palette))
        .style(style)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color(palette.rule_fg)))
                .title(title),
        );
    frame.render_widget(widget, area);
}

/// Unknown card ids render as an empty frame rather than failing; a deck can
/// point a button at a card that was never written.
fn card_lines(
    deck: &Deck,
    card_id: &CardId,
    leaving: bool,
    cursor: usize,
    palette: &Palette,
) -> Vec<Line<'static>> {
    let Some(card) = deck.card(card_id) else {
        return Vec::new();
    };

    let mut lines = Vec::new();
    for text in &card.body {
        lines.push(Line::styled(
            text.clone(),
            Style::default().fg(color(palette.card_fg)),
        ));
    }
    if !card.choices.is_empty() {
        lines.push(Line::default());
        for choice in &card.choices {
            lines.push(Line::styled(
                format!("  {choice}  "),
                Style::default()
                    .bg(color(palette.select_bg))
                    .fg(color(palette.select_fg)),
            ));
        }
    }
    if !card.buttons.is_empty() {
        lines.push(Line::default());
    }
    for (index, button) in card.buttons.iter().enumerate() {
        lines.push(Line::styled(
            format!("  {}. {}  ", index + 1, button.label),
            button_style(button.kind, leaving, index == cursor, palette),
        ));
    }
    lines
}

fn button_style(kind: ButtonKind, leaving: bool, selected: bool, palette: &Palette) -> Style {
    let mut style = match kind {
        ButtonKind::Goto => Style::default()
            .bg(color(palette.button_bg))
            .fg(color(palette.button_fg)),
        ButtonKind::Endpoint => Style::default()
            .bg(color(palette.endpoint_bg))
            .fg(color(palette.endpoint_fg)),
    };
    // Forward buttons are inert while a transition is in flight; endpoints
    // stay live for the whole window.
    if leaving && kind == ButtonKind::Goto {
        style = style.add_modifier(Modifier::DIM);
    } else if selected {
        style = style.add_modifier(Modifier::REVERSED);
    }
    style
}

fn render_footer(frame: &mut ratatui::Frame<'_>, area: Rect, state: &AppState, palette: &Palette) {
    let status = state.status_line.clone().unwrap_or_default();
    let lines = vec![
        Line::styled(status, Style::default().fg(Color::Yellow)),
        Line::styled(
            footer_hint(state),
            Style::default()
                .fg(color(palette.card_fg))
                .add_modifier(Modifier::DIM),
        ),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}

fn footer_hint(state: &AppState) -> String {
    let mut hint = String::from("↑/↓ select  enter activate  1-9 jump  ");
    if state.nav.chrome() == ChromeVisibility::Visible {
        hint.push_str("esc back  h home  ");
    }
    hint.push_str("c contrast  l language  F3 keyboard  q quit");
    hint
}

fn render_help_overlay(
    frame: &mut ratatui::Frame<'_>,
    area: Rect,
    deck: &Deck,
    panel: HelpPanel,
    palette: &Palette,
) {
    let target = panel_area(panel, area);
    frame.render_widget(Clear, target);
    let widget = Paragraph::new(deck.help.text(panel).to_owned())
        .style(
            Style::default()
                .bg(color(palette.screen_bg))
                .fg(color(palette.card_fg)),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color(palette.rule_fg)))
                .title(panel.label()),
        );
    frame.render_widget(widget, target);
}

/// Both panels can be open at once; each gets its own half of the screen.
fn panel_area(panel: HelpPanel, area: Rect) -> Rect {
    let halves = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);
    match panel {
        HelpPanel::Language => centered_rect(70, 70, halves[0]),
        HelpPanel::Keyboard => centered_rect(70, 70, halves[1]),
    }
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

const fn color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.0, rgb.1, rgb.2)
}

#[cfg(test)]
mod tests {
    use super::{
        InternalEvent, SessionOutcome, TransitionTimer, UiOptions, ViewData, card_lines,
        footer_hint, handle_key_event, nav_bar_text, panel_area, process_internal_events,
    };
    use anyhow::{Result, anyhow};
    use bootcard_app::{
        AppState, ButtonKind, Card, CardButton, CardEffect, CardId, CardPhase, ChromeVisibility,
        ControlId, Deck, HelpPanel, HelpTexts,
    };
    use bootcard_testkit::{deep_deck, sample_deck};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::layout::Rect;
    use ratatui::text::Line;
    use std::sync::mpsc;
    use std::time::Duration;

    #[derive(Debug, Default)]
    struct ManualTimer {
        scheduled: Vec<(u64, Duration, mpsc::Sender<InternalEvent>)>,
    }

    impl ManualTimer {
        fn fire_next(&mut self) {
            if self.scheduled.is_empty() {
                return;
            }
            let (token, _delay, tx) = self.scheduled.remove(0);
            let _ = tx.send(InternalEvent::TransitionElapsed { token });
        }
    }

    impl TransitionTimer for ManualTimer {
        fn schedule(
            &mut self,
            token: u64,
            delay: Duration,
            tx: mpsc::Sender<InternalEvent>,
        ) -> Result<()> {
            self.scheduled.push((token, delay, tx));
            Ok(())
        }
    }

    #[derive(Debug, Default)]
    struct FailingTimer;

    impl TransitionTimer for FailingTimer {
        fn schedule(
            &mut self,
            _token: u64,
            _delay: Duration,
            _tx: mpsc::Sender<InternalEvent>,
        ) -> Result<()> {
            Err(anyhow!("wires crossed"))
        }
    }

    fn internal_channel() -> (mpsc::Sender<InternalEvent>, mpsc::Receiver<InternalEvent>) {
        mpsc::channel()
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn pump_internal(
        state: &mut AppState,
        view_data: &mut ViewData,
        timer: &mut ManualTimer,
        tx: &mpsc::Sender<InternalEvent>,
        rx: &mpsc::Receiver<InternalEvent>,
    ) {
        process_internal_events(state, view_data, timer, tx, rx, &UiOptions::default());
    }

    fn run_key_script(
        state: &mut AppState,
        deck: &Deck,
        view_data: &mut ViewData,
        timer: &mut ManualTimer,
        tx: &mpsc::Sender<InternalEvent>,
        rx: &mpsc::Receiver<InternalEvent>,
        keys: &[KeyEvent],
    ) {
        let options = UiOptions::default();
        for key in keys {
            let _ = handle_key_event(state, deck, view_data, timer, tx, &options, *key);
            pump_internal(state, view_data, timer, tx, rx);
        }
    }

    fn settle(
        state: &mut AppState,
        view_data: &mut ViewData,
        timer: &mut ManualTimer,
        tx: &mpsc::Sender<InternalEvent>,
        rx: &mpsc::Receiver<InternalEvent>,
    ) {
        timer.fire_next();
        pump_internal(state, view_data, timer, tx, rx);
    }

    fn mixed_deck() -> Deck {
        Deck {
            title: "mixed".to_owned(),
            cards: vec![
                Card {
                    id: CardId::new("main"),
                    title: "main".to_owned(),
                    body: Vec::new(),
                    buttons: vec![
                        CardButton {
                            id: ControlId::new("B1"),
                            label: "More".to_owned(),
                            kind: ButtonKind::Goto,
                        },
                        CardButton {
                            id: ControlId::new("poweroff"),
                            label: "Power off".to_owned(),
                            kind: ButtonKind::Endpoint,
                        },
                    ],
                    choices: Vec::new(),
                },
                Card {
                    id: CardId::new("C1"),
                    title: "next".to_owned(),
                    body: Vec::new(),
                    buttons: Vec::new(),
                    choices: Vec::new(),
                },
            ],
            help: HelpTexts::default(),
        }
    }

    fn line_text(line: &Line<'_>) -> String {
        line.spans
            .iter()
            .map(|span| span.content.as_ref())
            .collect()
    }

    #[test]
    fn enter_starts_a_forward_transition() {
        let deck = sample_deck();
        let mut state = AppState::default();
        let mut view_data = ViewData::default();
        let mut timer = ManualTimer::default();
        let (tx, rx) = internal_channel();

        run_key_script(
            &mut state,
            &deck,
            &mut view_data,
            &mut timer,
            &tx,
            &rx,
            &[key(KeyCode::Enter)],
        );

        assert!(state.nav.in_flight());
        assert_eq!(state.nav.current(), CardId::new("C1"));
        assert_eq!(timer.scheduled.len(), 1);
        assert_eq!(timer.scheduled[0].1, Duration::from_millis(500));
    }

    #[test]
    fn transition_completes_when_the_timer_fires() {
        let deck = sample_deck();
        let mut state = AppState::default();
        let mut view_data = ViewData::default();
        let mut timer = ManualTimer::default();
        let (tx, rx) = internal_channel();

        run_key_script(
            &mut state,
            &deck,
            &mut view_data,
            &mut timer,
            &tx,
            &rx,
            &[key(KeyCode::Enter), key(KeyCode::Down)],
        );
        assert_eq!(view_data.cursor, 1);

        settle(&mut state, &mut view_data, &mut timer, &tx, &rx);

        assert!(!state.nav.in_flight());
        assert_eq!(
            state.nav.displayed(),
            (CardId::new("C1"), CardPhase::Steady)
        );
        assert_eq!(state.nav.chrome(), ChromeVisibility::Visible);
        assert_eq!(view_data.cursor, 0);
        assert!(view_data.entered);
    }

    #[test]
    fn stock_animation_names_map_to_effects() {
        let options = UiOptions::default();

        assert_eq!(options.enter_effect, CardEffect::None);
        assert_eq!(options.exit_effect, CardEffect::Dim);
    }

    #[test]
    fn navigation_is_refused_while_in_flight() {
        let deck = sample_deck();
        let mut state = AppState::default();
        let mut view_data = ViewData::default();
        let mut timer = ManualTimer::default();
        let (tx, rx) = internal_channel();

        run_key_script(
            &mut state,
            &deck,
            &mut view_data,
            &mut timer,
            &tx,
            &rx,
            &[key(KeyCode::Enter), key(KeyCode::Char('2'))],
        );

        assert_eq!(state.status_line.as_deref(), Some("busy"));
        assert_eq!(state.nav.history(), [CardId::root(), CardId::new("C1")]);
        assert_eq!(timer.scheduled.len(), 1);
    }

    #[test]
    fn home_is_refused_while_in_flight() {
        let deck = sample_deck();
        let mut state = AppState::default();
        let mut view_data = ViewData::default();
        let mut timer = ManualTimer::default();
        let (tx, rx) = internal_channel();

        run_key_script(
            &mut state,
            &deck,
            &mut view_data,
            &mut timer,
            &tx,
            &rx,
            &[key(KeyCode::Enter), key(KeyCode::Char('h'))],
        );

        assert_eq!(state.status_line.as_deref(), Some("busy"));
        assert_eq!(state.nav.history(), [CardId::root(), CardId::new("C1")]);
    }

    #[test]
    fn esc_navigates_back_after_settling() {
        let deck = sample_deck();
        let mut state = AppState::default();
        let mut view_data = ViewData::default();
        let mut timer = ManualTimer::default();
        let (tx, rx) = internal_channel();

        run_key_script(
            &mut state,
            &deck,
            &mut view_data,
            &mut timer,
            &tx,
            &rx,
            &[key(KeyCode::Enter)],
        );
        settle(&mut state, &mut view_data, &mut timer, &tx, &rx);

        run_key_script(
            &mut state,
            &deck,
            &mut view_data,
            &mut timer,
            &tx,
            &rx,
            &[key(KeyCode::Esc)],
        );
        assert!(state.nav.in_flight());
        assert_eq!(state.nav.history(), [CardId::root()]);

        settle(&mut state, &mut view_data, &mut timer, &tx, &rx);
        assert_eq!(state.nav.displayed(), (CardId::root(), CardPhase::Steady));
        assert_eq!(state.nav.chrome(), ChromeVisibility::Hidden);
    }

    #[test]
    fn left_arrow_acts_as_back() {
        let deck = sample_deck();
        let mut state = AppState::default();
        let mut view_data = ViewData::default();
        let mut timer = ManualTimer::default();
        let (tx, rx) = internal_channel();

        run_key_script(
            &mut state,
            &deck,
            &mut view_data,
            &mut timer,
            &tx,
            &rx,
            &[key(KeyCode::Enter)],
        );
        settle(&mut state, &mut view_data, &mut timer, &tx, &rx);

        run_key_script(
            &mut state,
            &deck,
            &mut view_data,
            &mut timer,
            &tx,
            &rx,
            &[key(KeyCode::Left)],
        );

        assert!(state.nav.in_flight());
    }

    #[test]
    fn home_resets_history_before_the_timer_fires() {
        let deck = deep_deck(3);
        let mut state = AppState::default();
        let mut view_data = ViewData::default();
        let mut timer = ManualTimer::default();
        let (tx, rx) = internal_channel();

        run_key_script(
            &mut state,
            &deck,
            &mut view_data,
            &mut timer,
            &tx,
            &rx,
            &[key(KeyCode::Enter)],
        );
        settle(&mut state, &mut view_data, &mut timer, &tx, &rx);
        run_key_script(
            &mut state,
            &deck,
            &mut view_data,
            &mut timer,
            &tx,
            &rx,
            &[key(KeyCode::Enter)],
        );
        settle(&mut state, &mut view_data, &mut timer, &tx, &rx);
        assert_eq!(state.nav.depth(), 3);

        run_key_script(
            &mut state,
            &deck,
            &mut view_data,
            &mut timer,
            &tx,
            &rx,
            &[key(KeyCode::Char('h'))],
        );

        assert_eq!(state.nav.history(), [CardId::root()]);
        assert!(state.nav.in_flight());
        assert_eq!(state.nav.chrome(), ChromeVisibility::Hidden);

        settle(&mut state, &mut view_data, &mut timer, &tx, &rx);
        assert_eq!(state.nav.displayed(), (CardId::root(), CardPhase::Steady));
    }

    #[test]
    fn contrast_key_flips_palette_and_sets_status() {
        let deck = sample_deck();
        let mut state = AppState::default();
        let mut view_data = ViewData::default();
        let mut timer = ManualTimer::default();
        let (tx, rx) = internal_channel();

        run_key_script(
            &mut state,
            &deck,
            &mut view_data,
            &mut timer,
            &tx,
            &rx,
            &[key(KeyCode::Char('c'))],
        );
        assert!(state.theme.is_high_contrast());
        assert_eq!(state.status_line.as_deref(), Some("contrast on"));
        assert_eq!(view_data.status_token, 1);

        run_key_script(
            &mut state,
            &deck,
            &mut view_data,
            &mut timer,
            &tx,
            &rx,
            &[key(KeyCode::Char('c'))],
        );
        assert!(!state.theme.is_high_contrast());
        assert_eq!(state.status_line.as_deref(), Some("contrast off"));
        assert_eq!(view_data.status_token, 2);
    }

    #[test]
    fn stale_status_clear_is_ignored() {
        let deck = sample_deck();
        let mut state = AppState::default();
        let mut view_data = ViewData::default();
        let mut timer = ManualTimer::default();
        let (tx, rx) = internal_channel();

        run_key_script(
            &mut state,
            &deck,
            &mut view_data,
            &mut timer,
            &tx,
            &rx,
            &[key(KeyCode::Char('c')), key(KeyCode::Char('c'))],
        );
        assert_eq!(view_data.status_token, 2);

        tx.send(InternalEvent::ClearStatus { token: 1 })
            .expect("send stale clear");
        pump_internal(&mut state, &mut view_data, &mut timer, &tx, &rx);
        assert_eq!(state.status_line.as_deref(), Some("contrast off"));

        tx.send(InternalEvent::ClearStatus { token: 2 })
            .expect("send current clear");
        pump_internal(&mut state, &mut view_data, &mut timer, &tx, &rx);
        assert_eq!(state.status_line, None);
    }

    #[test]
    fn language_and_keyboard_panels_toggle() {
        let deck = sample_deck();
        let mut state = AppState::default();
        let mut view_data = ViewData::default();
        let mut timer = ManualTimer::default();
        let (tx, rx) = internal_channel();

        run_key_script(
            &mut state,
            &deck,
            &mut view_data,
            &mut timer,
            &tx,
            &rx,
            &[key(KeyCode::Char('l')), key(KeyCode::F(3))],
        );
        assert!(state.panels.is_visible(HelpPanel::Language));
        assert!(state.panels.is_visible(HelpPanel::Keyboard));

        run_key_script(
            &mut state,
            &deck,
            &mut view_data,
            &mut timer,
            &tx,
            &rx,
            &[key(KeyCode::F(2))],
        );
        assert!(!state.panels.is_visible(HelpPanel::Language));
        assert!(state.panels.is_visible(HelpPanel::Keyboard));
    }

    #[test]
    fn digit_jumps_to_numbered_button() {
        let deck = sample_deck();
        let mut state = AppState::default();
        let mut view_data = ViewData::default();
        let mut timer = ManualTimer::default();
        let (tx, rx) = internal_channel();

        run_key_script(
            &mut state,
            &deck,
            &mut view_data,
            &mut timer,
            &tx,
            &rx,
            &[key(KeyCode::Char('2'))],
        );
        settle(&mut state, &mut view_data, &mut timer, &tx, &rx);

        assert_eq!(
            state.nav.displayed(),
            (CardId::new("C2"), CardPhase::Steady)
        );
    }

    #[test]
    fn out_of_range_digit_is_ignored() {
        let deck = sample_deck();
        let mut state = AppState::default();
        let mut view_data = ViewData::default();
        let mut timer = ManualTimer::default();
        let (tx, rx) = internal_channel();

        run_key_script(
            &mut state,
            &deck,
            &mut view_data,
            &mut timer,
            &tx,
            &rx,
            &[key(KeyCode::Char('9'))],
        );

        assert!(!state.nav.in_flight());
        assert!(timer.scheduled.is_empty());
    }

    #[test]
    fn endpoint_ends_the_session() {
        let deck = sample_deck();
        let mut state = AppState::default();
        let mut view_data = ViewData::default();
        let mut timer = ManualTimer::default();
        let (tx, rx) = internal_channel();
        let options = UiOptions::default();

        run_key_script(
            &mut state,
            &deck,
            &mut view_data,
            &mut timer,
            &tx,
            &rx,
            &[key(KeyCode::Enter)],
        );
        settle(&mut state, &mut view_data, &mut timer, &tx, &rx);

        let quit = handle_key_event(
            &mut state,
            &deck,
            &mut view_data,
            &mut timer,
            &tx,
            &options,
            key(KeyCode::Enter),
        );

        assert!(quit);
        assert_eq!(
            view_data.outcome,
            Some(SessionOutcome::Endpoint(ControlId::new("start-live")))
        );
    }

    #[test]
    fn endpoints_stay_live_during_a_transition() {
        let deck = mixed_deck();
        let mut state = AppState::default();
        let mut view_data = ViewData::default();
        let mut timer = ManualTimer::default();
        let (tx, rx) = internal_channel();
        let options = UiOptions::default();

        run_key_script(
            &mut state,
            &deck,
            &mut view_data,
            &mut timer,
            &tx,
            &rx,
            &[key(KeyCode::Enter), key(KeyCode::Down)],
        );
        assert!(state.nav.in_flight());

        let quit = handle_key_event(
            &mut state,
            &deck,
            &mut view_data,
            &mut timer,
            &tx,
            &options,
            key(KeyCode::Enter),
        );

        assert!(quit);
        assert_eq!(
            view_data.outcome,
            Some(SessionOutcome::Endpoint(ControlId::new("poweroff")))
        );
    }

    #[test]
    fn quit_keys_dismiss_without_an_outcome() {
        let deck = sample_deck();
        let mut state = AppState::default();
        let mut view_data = ViewData::default();
        let mut timer = ManualTimer::default();
        let (tx, _rx) = internal_channel();
        let options = UiOptions::default();

        let quit = handle_key_event(
            &mut state,
            &deck,
            &mut view_data,
            &mut timer,
            &tx,
            &options,
            key(KeyCode::Char('q')),
        );
        assert!(quit);
        assert_eq!(view_data.outcome, None);

        let quit = handle_key_event(
            &mut state,
            &deck,
            &mut view_data,
            &mut timer,
            &tx,
            &options,
            KeyEvent::new(KeyCode::Char('q'), KeyModifiers::CONTROL),
        );
        assert!(quit);
    }

    #[test]
    fn cursor_wraps_over_card_buttons() {
        let deck = sample_deck();
        let mut state = AppState::default();
        let mut view_data = ViewData::default();
        let mut timer = ManualTimer::default();
        let (tx, rx) = internal_channel();

        run_key_script(
            &mut state,
            &deck,
            &mut view_data,
            &mut timer,
            &tx,
            &rx,
            &[key(KeyCode::Down)],
        );
        assert_eq!(view_data.cursor, 1);

        run_key_script(
            &mut state,
            &deck,
            &mut view_data,
            &mut timer,
            &tx,
            &rx,
            &[key(KeyCode::Down), key(KeyCode::Down)],
        );
        assert_eq!(view_data.cursor, 1);

        run_key_script(
            &mut state,
            &deck,
            &mut view_data,
            &mut timer,
            &tx,
            &rx,
            &[key(KeyCode::Up), key(KeyCode::Up)],
        );
        assert_eq!(view_data.cursor, 1);
    }

    #[test]
    fn timer_failure_surfaces_in_the_status_line() {
        let deck = sample_deck();
        let mut state = AppState::default();
        let mut view_data = ViewData::default();
        let mut timer = FailingTimer;
        let (tx, _rx) = internal_channel();
        let options = UiOptions::default();

        let _ = handle_key_event(
            &mut state,
            &deck,
            &mut view_data,
            &mut timer,
            &tx,
            &options,
            key(KeyCode::Enter),
        );

        assert_eq!(
            state.status_line.as_deref(),
            Some("transition timer failed: wires crossed")
        );
        // The transition settles without its delay; the slot must not stay
        // occupied waiting for a wake-up that cannot arrive.
        assert!(!state.nav.in_flight());
        assert_eq!(
            state.nav.displayed(),
            (CardId::new("C1"), CardPhase::Steady)
        );
    }

    #[test]
    fn navigation_survives_a_timer_failure() {
        let deck = sample_deck();
        let mut state = AppState::default();
        let mut view_data = ViewData::default();
        let mut timer = FailingTimer;
        let (tx, _rx) = internal_channel();
        let options = UiOptions::default();

        let _ = handle_key_event(
            &mut state,
            &deck,
            &mut view_data,
            &mut timer,
            &tx,
            &options,
            key(KeyCode::Enter),
        );
        assert_eq!(state.nav.chrome(), ChromeVisibility::Visible);

        let _ = handle_key_event(
            &mut state,
            &deck,
            &mut view_data,
            &mut timer,
            &tx,
            &options,
            key(KeyCode::Esc),
        );

        assert_ne!(state.status_line.as_deref(), Some("busy"));
        assert!(!state.nav.in_flight());
        assert_eq!(state.nav.history(), [CardId::root()]);
        assert_eq!(state.nav.displayed(), (CardId::root(), CardPhase::Steady));
        assert_eq!(state.nav.chrome(), ChromeVisibility::Hidden);
    }

    #[test]
    fn unknown_card_renders_empty() {
        let deck = sample_deck();
        let state = AppState::default();
        let palette = state.theme.palette();

        let lines = card_lines(&deck, &CardId::new("C404"), false, 0, palette);

        assert!(lines.is_empty());
    }

    #[test]
    fn card_lines_number_buttons_and_list_choices() {
        let deck = sample_deck();
        let state = AppState::default();
        let palette = state.theme.palette();

        let lines = card_lines(&deck, &CardId::new("C2"), false, 0, palette);
        let texts: Vec<String> = lines.iter().map(line_text).collect();

        assert!(texts.iter().any(|text| text.contains("1. ")));
        assert!(texts.iter().any(|text| text.contains("English")));
    }

    #[test]
    fn nav_bar_and_footer_track_chrome() {
        let deck = sample_deck();
        let mut state = AppState::default();
        let mut view_data = ViewData::default();
        let mut timer = ManualTimer::default();
        let (tx, rx) = internal_channel();

        assert!(!nav_bar_text(&state).contains("back"));
        assert!(!footer_hint(&state).contains("esc back"));

        run_key_script(
            &mut state,
            &deck,
            &mut view_data,
            &mut timer,
            &tx,
            &rx,
            &[key(KeyCode::Enter)],
        );
        settle(&mut state, &mut view_data, &mut timer, &tx, &rx);

        assert!(nav_bar_text(&state).contains("back"));
        assert!(footer_hint(&state).contains("esc back"));
    }

    #[test]
    fn help_panels_get_separate_areas() {
        let area = Rect::new(0, 0, 80, 40);

        let language = panel_area(HelpPanel::Language, area);
        let keyboard = panel_area(HelpPanel::Keyboard, area);

        assert!(language.bottom() <= keyboard.y);
    }
}
