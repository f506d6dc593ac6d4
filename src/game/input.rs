use super::direction::Direction;
use super::layout::GameLayout;
use crate::command::Command;
use crossterm::event::{Event, MouseButton, MouseEventKind};
use log::debug;

/// Translate a terminal event into a [`Command`].
///
/// Key presses go through the key bindings; a left click on one of the
/// on-screen buttons in `layout` yields the same command as the matching key.
pub(crate) fn command_for_event(event: &Event, layout: &GameLayout) -> Option<Command> {
    match event {
        Event::Key(_) => Command::from_key_event(event.as_key_press_event()?),
        Event::Mouse(ev) if ev.kind == MouseEventKind::Down(MouseButton::Left) => {
            layout.command_at(ev.column, ev.row)
        }
        _ => None,
    }
}

/// The single-slot queue of direction changes requested since the last tick.
///
/// Only the most recent valid request is kept.  A request to reverse the
/// current direction of travel never replaces what is queued.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct TurnQueue {
    pub(super) pending: Option<Direction>,
}

impl TurnQueue {
    /// Queue a turn towards `direction` given that the snake is currently
    /// travelling `current`.  Returns whether the request was accepted.
    pub(crate) fn request(&mut self, direction: Direction, current: Direction) -> bool {
        if direction == current.reverse() {
            debug!(
                "Ignoring request to turn {} while travelling {}",
                direction.as_str(),
                current.as_str()
            );
            false
        } else {
            self.pending = Some(direction);
            true
        }
    }

    /// Remove and return the queued direction
    pub(crate) fn take(&mut self) -> Option<Direction> {
        self.pending.take()
    }

    pub(crate) fn clear(&mut self) {
        self.pending = None;
    }
}
