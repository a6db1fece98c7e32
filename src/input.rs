//! Input from the platform thread
//!
//! The platform adapter owns an `InputSender` and pushes events whenever the
//! window reports them. The loop drains the queue once per iteration: the
//! last pointer position wins, every click is delivered exactly once and in
//! order. Coordinates are canvas pixels with window chrome already removed.

use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};

use glam::Vec2;
use thiserror::Error;

use crate::direction_to;

/// One event from the platform
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Pointer moved (or was dragged) to a canvas position
    PointerMoved(Vec2),
    /// Button released at a canvas position
    Click(Vec2),
}

/// The game loop has shut down
#[derive(Debug, Error, PartialEq, Eq)]
#[error("input queue closed: the game loop is gone")]
pub struct InputClosed;

/// Platform-side handle; cheap to clone, safe to move to another thread
#[derive(Debug, Clone)]
pub struct InputSender {
    tx: Sender<InputEvent>,
}

impl InputSender {
    pub fn send(&self, event: InputEvent) -> Result<(), InputClosed> {
        self.tx.send(event).map_err(|_| InputClosed)
    }

    pub fn pointer_moved(&self, pos: Vec2) -> Result<(), InputClosed> {
        self.send(InputEvent::PointerMoved(pos))
    }

    /// Report a click on release (clicks act on release, not press)
    pub fn click_released(&self, pos: Vec2) -> Result<(), InputClosed> {
        // The release position is also the latest pointer position
        self.send(InputEvent::PointerMoved(pos))?;
        self.send(InputEvent::Click(pos))
    }
}

/// Everything that arrived since the previous drain
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameInput {
    /// Latest known pointer position (None until the pointer first moves)
    pub pointer: Option<Vec2>,
    /// Clicks in arrival order
    pub clicks: Vec<Vec2>,
}

/// Loop-side end of the input channel
#[derive(Debug)]
pub struct InputQueue {
    rx: Receiver<InputEvent>,
    pointer: Option<Vec2>,
    disconnected: bool,
}

impl InputQueue {
    /// Create a connected sender/queue pair
    pub fn channel() -> (InputSender, InputQueue) {
        let (tx, rx) = mpsc::channel();
        let queue = InputQueue {
            rx,
            pointer: None,
            disconnected: false,
        };
        (InputSender { tx }, queue)
    }

    /// Latest pointer position without draining
    pub fn pointer(&self) -> Option<Vec2> {
        self.pointer
    }

    /// True once every sender has been dropped
    pub fn is_disconnected(&self) -> bool {
        self.disconnected
    }

    /// Take every pending event
    pub fn drain(&mut self) -> FrameInput {
        let mut clicks = Vec::new();
        loop {
            match self.rx.try_recv() {
                Ok(InputEvent::PointerMoved(pos)) => self.pointer = Some(pos),
                Ok(InputEvent::Click(pos)) => clicks.push(pos),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    if !self.disconnected {
                        log::info!("All input senders dropped");
                        self.disconnected = true;
                    }
                    break;
                }
            }
        }
        FrameInput {
            pointer: self.pointer,
            clicks,
        }
    }
}

/// Steering direction from the pointer's offset from the canvas center.
///
/// None inside the deadzone, so a pointer resting on the player doesn't
/// jitter it back and forth.
pub fn steer_direction(pointer: Vec2, canvas: Vec2, deadzone: f32) -> Option<Vec2> {
    let center = canvas * 0.5;
    if pointer.distance(center) <= deadzone {
        return None;
    }
    direction_to(center, pointer)
}
