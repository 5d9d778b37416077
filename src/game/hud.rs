//! Title-bar text and the scrolling backdrop

use crate::sim::{PlayerId, Progression};

/// Vertical scroll of the background image
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Backdrop {
    offset: f64,
    height: f64,
}

impl Backdrop {
    pub fn new(height: f64) -> Self {
        Self {
            offset: -height,
            height,
        }
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// One unit per rendered frame, wrapping back to the top at 0
    pub fn scroll(&mut self) {
        self.offset += 1.0;
        if self.offset >= 0.0 {
            self.offset = -self.height;
        }
    }
}

/// Title-bar text: frame rate, then both scores and both lives
pub fn status_line(frame_rate: Option<u32>, progression: &Progression) -> String {
    let head = match frame_rate {
        Some(fps) => format!("Game : {fps} FPS"),
        None => "Game".to_string(),
    };
    format!(
        "{head}  Score: {} Score2: {}  Lives: {} Lives2: {}",
        progression.score(PlayerId::One),
        progression.score(PlayerId::Two),
        progression.lives(PlayerId::One),
        progression.lives(PlayerId::Two),
    )
}
