//! Application state and logic.

use crate::config::QuartoConfig;
use crossterm::event::KeyCode;
use std::time::Duration;
use strictly_quarto::{
    HumanInput, InputLayout, Point, TickOutcome, TurnController, WinningGroup,
};
use tracing::{debug, info, instrument};

/// Main application state.
///
/// Owns the controller and the human input buffers; the event loop feeds it
/// clicks and keys and calls [`App::tick`] once per pass.
pub struct App {
    controller: TurnController,
    input: HumanInput,
    layout: InputLayout,
    winning_group: Option<WinningGroup>,
    should_quit: bool,
}

impl App {
    /// Creates a new application from configuration.
    #[instrument(skip(config), fields(player1 = %config.player1(), player2 = %config.player2()))]
    pub fn new(config: &QuartoConfig) -> Self {
        let controller = TurnController::new(
            config.player1().into_seat("Agent 1"),
            config.player2().into_seat("Agent 2"),
        );
        Self::from_controller(controller, config.layout().input_layout())
    }

    /// Wraps an already seated controller.
    pub fn from_controller(controller: TurnController, layout: InputLayout) -> Self {
        Self {
            controller,
            input: HumanInput::new(),
            layout,
            winning_group: None,
            should_quit: false,
        }
    }

    /// Gets the controller.
    pub fn controller(&self) -> &TurnController {
        &self.controller
    }

    /// Gets the screen layout shared by rendering and click translation.
    pub fn layout(&self) -> &InputLayout {
        &self.layout
    }

    /// The group that won the finished game.
    pub fn winning_group(&self) -> Option<WinningGroup> {
        self.winning_group
    }

    /// Returns true once the user asked to quit.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Advances the controller by one tick.
    pub fn tick(&mut self) {
        match self.controller.tick(&mut self.input) {
            Ok(TickOutcome::Won { group, .. }) => self.winning_group = Some(group),
            Ok(outcome) if outcome.is_transition() => debug!(?outcome, "Controller advanced"),
            Ok(_) => {}
            Err(violation) => debug!(%violation, "Controller halted"),
        }
    }

    /// Routes a left click to the human input buffers.
    #[instrument(skip(self))]
    pub fn pointer_down(&mut self, column: u16, row: u16) {
        let Some(phase) = self.controller.human_phase() else {
            debug!("No human is being polled, click dropped");
            return;
        };
        self.input.pointer_down(
            Point::new(column.into(), row.into()),
            phase,
            &self.layout,
            self.controller.available(),
        );
    }

    /// Handles a key press.
    pub fn handle_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => {
                info!("User quit");
                self.should_quit = true;
            }
            KeyCode::Char('r') => self.restart(),
            _ => {}
        }
    }

    /// Restarts the game.
    pub fn restart(&mut self) {
        self.controller.restart(&mut self.input);
        self.winning_group = None;
    }
}

/// Formats a duration as `1h 2m 3.4s`, dropping leading zero units.
pub fn format_duration(duration: Duration) -> String {
    let total = duration.as_secs();
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = (total % 60) as f64 + f64::from(duration.subsec_millis()) / 1000.0;

    if hours > 0 {
        format!("{}h {}m {:.1}s", hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{}m {:.1}s", minutes, seconds)
    } else {
        format!("{:.1}s", seconds)
    }
}
