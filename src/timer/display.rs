//! Time formatting and colour selection for the timer display

use serde::Serialize;

use super::engine::Phase;
use crate::settings::{Colour, TimerConfig};

/// A formatted countdown value
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormattedTime {
    pub text: String,
    pub is_negative: bool,
}

/// Text and background colour for the current phase
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Colors {
    pub text: Colour,
    pub background: Colour,
}

/// Render `remaining_seconds` as `HH:MM:SS`, prefixed with `-` in overtime.
///
/// Hours wrap at 24. The sign always follows the value: a count that went
/// negative before overtime was switched off keeps its `-` until reset.
pub fn format(remaining_seconds: i64, _negative_count_enabled: bool) -> FormattedTime {
    let is_negative = remaining_seconds < 0;
    let seconds = remaining_seconds.unsigned_abs();

    let hour = (seconds / 3600) % 24;
    let min = (seconds / 60) % 60;
    let sec = seconds % 60;

    let sign = if is_negative { "-" } else { "" };
    FormattedTime {
        text: format!("{sign}{hour:02}:{min:02}:{sec:02}"),
        is_negative,
    }
}

/// Colours that apply in `phase` when no blink is overriding them.
///
/// `Paused` uses the paused colour as a static background.
pub fn colors_for(phase: Phase, config: &TimerConfig) -> Colors {
    let background = match phase {
        Phase::Paused => config.paused_color.clone(),
        Phase::Idle | Phase::Running | Phase::Alarmed => config.background_color.clone(),
    };

    Colors {
        text: config.text_color.clone(),
        background,
    }
}
