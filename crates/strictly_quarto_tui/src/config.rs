//! Game configuration loaded from TOML and overridden from the command line.

use crate::cli::Cli;
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use strictly_quarto::{BOARD_SIZE, InputLayout, PIECE_COUNT, Region, Seat, SimpleAgent};
use tracing::{debug, info, instrument};

/// Who occupies a seat.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum SeatKind {
    /// Mouse-driven human player.
    #[display("human")]
    Human,
    /// Built-in agent.
    #[display("agent")]
    Agent,
}

impl SeatKind {
    /// Builds the seat, naming agents after their player.
    pub fn into_seat(self, agent_name: &str) -> Seat {
        match self {
            SeatKind::Human => Seat::Human,
            SeatKind::Agent => Seat::agent(SimpleAgent::new(agent_name)),
        }
    }
}

/// Screen geometry in terminal cells.
///
/// The renderer draws from the same [`InputLayout`] the human input adapter
/// uses to translate clicks, so what is drawn is what is clickable.
#[derive(Debug, Clone, Getters, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Left edge of the board.
    #[serde(default = "default_origin_x")]
    origin_x: u32,

    /// Top edge of the board.
    #[serde(default = "default_origin_y")]
    origin_y: u32,

    /// Width of a board cell and of a picker slot.
    #[serde(default = "default_cell_width")]
    cell_width: u32,

    /// Height of a board cell.
    #[serde(default = "default_cell_height")]
    cell_height: u32,

    /// Height of a picker row.
    #[serde(default = "default_picker_row_height")]
    picker_row_height: u32,

    /// Picker slots per row.
    #[serde(default = "default_picker_columns")]
    picker_columns: u32,
}

fn default_origin_x() -> u32 {
    2
}

fn default_origin_y() -> u32 {
    2
}

fn default_cell_width() -> u32 {
    8
}

fn default_cell_height() -> u32 {
    3
}

fn default_picker_row_height() -> u32 {
    3
}

fn default_picker_columns() -> u32 {
    4
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            origin_x: default_origin_x(),
            origin_y: default_origin_y(),
            cell_width: default_cell_width(),
            cell_height: default_cell_height(),
            picker_row_height: default_picker_row_height(),
            picker_columns: default_picker_columns(),
        }
    }
}

impl LayoutConfig {
    /// Board on top, a one-row gap, then the picker.
    ///
    /// Arithmetic saturates, so an unvalidated layout never panics.
    #[instrument(skip(self))]
    pub fn input_layout(&self) -> InputLayout {
        let side = BOARD_SIZE as u32;
        let board = Region::new(
            self.origin_x,
            self.origin_y,
            side.saturating_mul(self.cell_width),
            side.saturating_mul(self.cell_height),
        );
        let picker = Region::new(
            self.origin_x,
            board.y.saturating_add(board.height).saturating_add(1),
            self.picker_columns.saturating_mul(self.cell_width),
            self.picker_rows().saturating_mul(self.picker_row_height),
        );
        debug!(?board, ?picker, "Built input layout");
        InputLayout {
            board,
            picker,
            picker_columns: self.picker_columns,
            picker_row_height: self.picker_row_height,
        }
    }

    fn picker_rows(&self) -> u32 {
        (PIECE_COUNT as u32).div_ceil(self.picker_columns.max(1))
    }

    /// Right and bottom edges of the drawn area, `None` on overflow.
    fn extent(&self) -> Option<(u32, u32)> {
        let side = BOARD_SIZE as u32;
        let width = side
            .checked_mul(self.cell_width)?
            .max(self.picker_columns.checked_mul(self.cell_width)?);
        let height = side
            .checked_mul(self.cell_height)?
            .checked_add(1)?
            .checked_add(self.picker_rows().checked_mul(self.picker_row_height)?)?;
        Some((
            self.origin_x.checked_add(width)?,
            self.origin_y.checked_add(height)?,
        ))
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let sizes = [
            ("cell_width", self.cell_width),
            ("cell_height", self.cell_height),
            ("picker_row_height", self.picker_row_height),
            ("picker_columns", self.picker_columns),
        ];
        if let Some((name, _)) = sizes.iter().find(|(_, value)| *value == 0) {
            return Err(ConfigError::new(format!("layout.{} must be positive", name)));
        }
        // Terminal coordinates are u16.
        let limit = u32::from(u16::MAX);
        match self.extent() {
            Some((right, bottom)) if right <= limit && bottom <= limit => Ok(()),
            _ => Err(ConfigError::new(format!(
                "layout extends past terminal cell {limit}; shrink origin_x, origin_y, \
                 cell_width, cell_height or picker_row_height"
            ))),
        }
    }
}

/// Game configuration.
#[derive(Debug, Clone, Getters, Serialize, Deserialize)]
pub struct QuartoConfig {
    /// Player 1 seat.
    #[serde(default = "default_player1")]
    player1: SeatKind,

    /// Player 2 seat.
    #[serde(default = "default_player2")]
    player2: SeatKind,

    /// Where tracing output goes.
    #[serde(default = "default_log_file")]
    log_file: PathBuf,

    /// Filter used when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    log_level: String,

    /// Milliseconds between controller ticks.
    #[serde(default = "default_tick_ms")]
    tick_ms: u64,

    /// Screen geometry.
    #[serde(default)]
    layout: LayoutConfig,
}

fn default_player1() -> SeatKind {
    SeatKind::Human
}

fn default_player2() -> SeatKind {
    SeatKind::Agent
}

fn default_log_file() -> PathBuf {
    PathBuf::from("strictly_quarto.log")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_tick_ms() -> u64 {
    50
}

impl Default for QuartoConfig {
    fn default() -> Self {
        Self {
            player1: default_player1(),
            player2: default_player2(),
            log_file: default_log_file(),
            log_level: default_log_level(),
            tick_ms: default_tick_ms(),
            layout: LayoutConfig::default(),
        }
    }
}

impl QuartoConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.layout.validate()?;

        info!(player1 = %config.player1, player2 = %config.player2, "Config loaded successfully");
        Ok(config)
    }

    /// Loads the file if it exists, otherwise falls back to defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            debug!("No config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Applies command-line overrides.
    pub fn with_overrides(mut self, cli: &Cli) -> Self {
        if let Some(kind) = cli.player1 {
            self.player1 = kind;
        }
        if let Some(kind) = cli.player2 {
            self.player2 = kind;
        }
        if let Some(path) = &cli.log_file {
            self.log_file = path.clone();
        }
        if let Some(ms) = cli.tick_ms {
            self.tick_ms = ms;
        }
        self
    }

    /// Tick interval.
    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::io::Write;
    use strictly_quarto::{Coord, InputTarget, Phase, Point};
    use tempfile::{NamedTempFile, TempDir};

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(content.as_bytes()).expect("Failed to write TOML");
        file
    }

    #[test]
    fn test_defaults() {
        let config = QuartoConfig::default();
        assert_eq!(*config.player1(), SeatKind::Human);
        assert_eq!(*config.player2(), SeatKind::Agent);
        assert_eq!(config.tick(), Duration::from_millis(50));
    }

    #[test]
    fn test_from_file_partial() {
        let file = write_config(
            r#"player1 = "agent"
tick_ms = 10

[layout]
cell_width = 10
"#,
        );
        let config = QuartoConfig::from_file(file.path()).expect("Valid config");
        assert_eq!(*config.player1(), SeatKind::Agent);
        assert_eq!(*config.player2(), SeatKind::Agent);
        assert_eq!(*config.tick_ms(), 10);
        assert_eq!(*config.layout().cell_width(), 10);
        assert_eq!(*config.layout().cell_height(), 3);
    }

    #[test]
    fn test_from_file_rejects_bad_seat() {
        let file = write_config("player2 = \"robot\"\n");
        let err = QuartoConfig::from_file(file.path()).unwrap_err();
        assert!(err.message.contains("Failed to parse config"));
    }

    #[test]
    fn test_from_file_rejects_zero_layout() {
        let file = write_config("[layout]\npicker_columns = 0\n");
        let err = QuartoConfig::from_file(file.path()).unwrap_err();
        assert!(err.message.contains("picker_columns"));
        assert!(err.file.ends_with("config.rs"));
    }

    #[test]
    fn test_from_file_rejects_oversized_layout() {
        let file = write_config("[layout]\ncell_width = 2000000000\n");
        let err = QuartoConfig::from_file(file.path()).unwrap_err();
        assert!(err.message.contains("cell_width"), "{}", err.message);
    }

    #[test]
    fn test_from_file_rejects_origin_past_terminal() {
        let file = write_config("[layout]\norigin_y = 65530\n");
        assert!(QuartoConfig::from_file(file.path()).is_err());
    }

    #[test]
    fn test_input_layout_saturates_on_huge_values() {
        let layout = LayoutConfig {
            origin_y: u32::MAX,
            cell_width: u32::MAX,
            ..LayoutConfig::default()
        }
        .input_layout();
        assert_eq!(layout.board.width, u32::MAX);
        assert_eq!(layout.picker.y, u32::MAX);
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let config = QuartoConfig::load(dir.path().join("absent.toml")).expect("Defaults");
        assert_eq!(*config.log_level(), "info");
    }

    #[test]
    fn test_cli_overrides_file() {
        let file = write_config("player1 = \"agent\"\ntick_ms = 10\n");
        let cli = Cli::try_parse_from(["strictly_quarto", "--player1", "human", "--tick-ms", "5"])
            .unwrap();
        let config = QuartoConfig::from_file(file.path())
            .unwrap()
            .with_overrides(&cli);
        assert_eq!(*config.player1(), SeatKind::Human);
        assert_eq!(*config.tick_ms(), 5);
    }

    #[test]
    fn test_input_layout_geometry() {
        let layout = LayoutConfig::default().input_layout();
        assert_eq!(layout.board, Region::new(2, 2, 32, 12));
        assert_eq!(layout.picker, Region::new(2, 15, 32, 12));
        assert_eq!(
            layout.translate(Point::new(11, 6), Phase::PlacePiece),
            Some(InputTarget::Cell(Coord::new(1, 1)))
        );
        assert_eq!(
            layout.translate(Point::new(2, 18), Phase::SelectPiece),
            Some(InputTarget::Piece(4))
        );
    }
}
