//! Computer control exposed to models
//!
//! A model with the computer tool answers with actions (click, type,
//! scroll, ...). The runner applies each one to a [`Computer`] and sends a
//! screenshot back.

use serde::{Deserialize, Serialize};

/// Operating environment reported to the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Windows,
    Mac,
    Ubuntu,
    Browser,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Windows => "windows",
            Self::Mac => "mac",
            Self::Ubuntu => "ubuntu",
            Self::Browser => "browser",
        }
    }
}

/// A point on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

fn left_button() -> String {
    "left".to_string()
}

/// An action requested by the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ComputerAction {
    Click {
        x: i32,
        y: i32,
        #[serde(default = "left_button")]
        button: String,
    },
    DoubleClick {
        x: i32,
        y: i32,
    },
    Drag {
        path: Vec<Point>,
    },
    Keypress {
        keys: Vec<String>,
    },
    Move {
        x: i32,
        y: i32,
    },
    Screenshot,
    Scroll {
        x: i32,
        y: i32,
        scroll_x: i32,
        scroll_y: i32,
    },
    Type {
        text: String,
    },
    Wait,
    #[serde(other)]
    Unsupported,
}

/// Screen, keyboard and mouse surface driven by a model.
pub trait Computer {
    fn click(&self, x: i32, y: i32, button: &str);
    fn double_click(&self, x: i32, y: i32);
    fn drag(&self, from: Point, to: Point);
    fn move_to(&self, x: i32, y: i32);
    fn keypress(&self, key: &str);
    fn type_text(&self, text: &str);
    fn scroll(&self, dx: i32, dy: i32);
    fn wait(&self, seconds: f64);
    /// Screen size in pixels (width, height).
    fn dimensions(&self) -> (u32, u32);
    fn environment(&self) -> Environment;
    /// Encoded PNG bytes of the current screen.
    fn screenshot(&self) -> Vec<u8>;
}

/// Apply a model action to a computer.
pub fn dispatch(computer: &dyn Computer, action: &ComputerAction) {
    match action {
        ComputerAction::Click { x, y, button } => computer.click(*x, *y, button),
        ComputerAction::DoubleClick { x, y } => computer.double_click(*x, *y),
        ComputerAction::Drag { path } => {
            if let (Some(from), Some(to)) = (path.first(), path.last()) {
                computer.drag(*from, *to);
            }
        }
        ComputerAction::Keypress { keys } => {
            for key in keys {
                computer.keypress(key);
            }
        }
        ComputerAction::Move { x, y } => computer.move_to(*x, *y),
        ComputerAction::Screenshot => {}
        ComputerAction::Scroll {
            x,
            y,
            scroll_x,
            scroll_y,
        } => {
            computer.move_to(*x, *y);
            computer.scroll(*scroll_x, *scroll_y);
        }
        ComputerAction::Type { text } => computer.type_text(text),
        ComputerAction::Wait => computer.wait(1.0),
        ComputerAction::Unsupported => {
            tracing::warn!("Ignoring unsupported computer action");
        }
    }
}

/// A stand-in computer that only logs what it is asked to do.
///
/// Reports a 1920x1080 Windows screen and returns an empty screenshot.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingComputer;

impl Computer for TracingComputer {
    fn click(&self, x: i32, y: i32, button: &str) {
        tracing::info!(x, y, button, "[COMPUTER] Click");
    }

    fn double_click(&self, x: i32, y: i32) {
        tracing::info!(x, y, "[COMPUTER] Double-click");
    }

    fn drag(&self, from: Point, to: Point) {
        tracing::info!(x1 = from.x, y1 = from.y, x2 = to.x, y2 = to.y, "[COMPUTER] Drag");
    }

    fn move_to(&self, x: i32, y: i32) {
        tracing::info!(x, y, "[COMPUTER] Move cursor");
    }

    fn keypress(&self, key: &str) {
        tracing::info!(key, "[COMPUTER] Keypress");
    }

    fn type_text(&self, text: &str) {
        tracing::info!(text, "[COMPUTER] Typing");
    }

    fn scroll(&self, dx: i32, dy: i32) {
        tracing::info!(dx, dy, "[COMPUTER] Scrolling");
    }

    fn wait(&self, seconds: f64) {
        tracing::info!(seconds, "[COMPUTER] Waiting");
    }

    fn dimensions(&self) -> (u32, u32) {
        (1920, 1080)
    }

    fn environment(&self) -> Environment {
        Environment::Windows
    }

    fn screenshot(&self) -> Vec<u8> {
        tracing::info!("[COMPUTER] Taking a screenshot");
        Vec::new()
    }
}
