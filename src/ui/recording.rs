//! Surface that records every call
//!
//! Clones share the same event log, so a test can hand one clone to the
//! session controller and inspect the other.

use super::{BoardSurface, HighlightKind, MessageKind};
use crate::training::stats::StatsView;
use chess_rules::Square;
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceEvent {
    Position(String),
    Highlight(Square, HighlightKind),
    ClearHighlights,
    Message(String, MessageKind),
    Moves(String),
    Stats(StatsView),
    Note(String),
    Timer(String),
    Objective(Option<String>),
}

#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    events: Rc<RefCell<Vec<SurfaceEvent>>>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<SurfaceEvent> {
        self.events.borrow().clone()
    }

    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }

    /// Last FEN pushed to the surface
    pub fn last_position(&self) -> Option<String> {
        self.events.borrow().iter().rev().find_map(|e| match e {
            SurfaceEvent::Position(fen) => Some(fen.clone()),
            _ => None,
        })
    }

    pub fn last_message(&self) -> Option<(String, MessageKind)> {
        self.events.borrow().iter().rev().find_map(|e| match e {
            SurfaceEvent::Message(text, kind) => Some((text.clone(), *kind)),
            _ => None,
        })
    }

    pub fn last_moves(&self) -> Option<String> {
        self.events.borrow().iter().rev().find_map(|e| match e {
            SurfaceEvent::Moves(text) => Some(text.clone()),
            _ => None,
        })
    }

    pub fn last_note(&self) -> Option<String> {
        self.events.borrow().iter().rev().find_map(|e| match e {
            SurfaceEvent::Note(text) => Some(text.clone()),
            _ => None,
        })
    }

    pub fn last_objective(&self) -> Option<Option<String>> {
        self.events.borrow().iter().rev().find_map(|e| match e {
            SurfaceEvent::Objective(text) => Some(text.clone()),
            _ => None,
        })
    }

    /// Highlights currently shown, oldest first
    pub fn active_highlights(&self) -> Vec<(Square, HighlightKind)> {
        let mut shown = Vec::new();
        for event in self.events.borrow().iter() {
            match event {
                SurfaceEvent::Highlight(square, kind) => shown.push((*square, *kind)),
                SurfaceEvent::ClearHighlights => shown.clear(),
                _ => {}
            }
        }
        shown
    }

    fn push(&self, event: SurfaceEvent) {
        self.events.borrow_mut().push(event);
    }
}

impl BoardSurface for RecordingSurface {
    fn set_position(&mut self, fen: &str) {
        self.push(SurfaceEvent::Position(fen.to_string()));
    }

    fn highlight(&mut self, square: Square, kind: HighlightKind) {
        self.push(SurfaceEvent::Highlight(square, kind));
    }

    fn clear_highlights(&mut self) {
        self.push(SurfaceEvent::ClearHighlights);
    }

    fn show_message(&mut self, message: &str, kind: MessageKind) {
        self.push(SurfaceEvent::Message(message.to_string(), kind));
    }

    fn show_moves(&mut self, moves: &str) {
        self.push(SurfaceEvent::Moves(moves.to_string()));
    }

    fn show_stats(&mut self, stats: &StatsView) {
        self.push(SurfaceEvent::Stats(stats.clone()));
    }

    fn show_note(&mut self, note: &str) {
        self.push(SurfaceEvent::Note(note.to_string()));
    }

    fn show_timer(&mut self, timer: &str) {
        self.push(SurfaceEvent::Timer(timer.to_string()));
    }

    fn show_objective(&mut self, objective: Option<&str>) {
        self.push(SurfaceEvent::Objective(objective.map(str::to_string)));
    }
}
