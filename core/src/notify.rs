use alloc::boxed::Box;
use core::fmt;
use core::time::Duration;
use serde::Serialize;

use crate::*;

/// Everything a frontend needs to draw the game, borrowed so it cannot be altered.
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct Frame<'a> {
    pub board: &'a Board,
    pub score: Points,
    pub upcoming: &'a [Color],
}

pub type RenderFn = Box<dyn FnMut(&Frame<'_>)>;

/// Receives the final score and the elapsed time in milliseconds.
pub type FinishFn = Box<dyn FnMut(Points, u64)>;

/// Registered frontend callbacks, both optional.
#[derive(Default)]
pub struct Notifier {
    render: Option<RenderFn>,
    finish: Option<FinishFn>,
}

impl Notifier {
    pub fn set_render(&mut self, render: RenderFn) {
        self.render = Some(render);
    }

    pub fn set_finish(&mut self, finish: FinishFn) {
        self.finish = Some(finish);
    }

    pub fn render(&mut self, frame: &Frame<'_>) {
        if let Some(render) = self.render.as_mut() {
            render(frame);
        }
    }

    pub fn finish(&mut self, score: Points, elapsed_ms: u64) {
        if let Some(finish) = self.finish.as_mut() {
            finish(score, elapsed_ms);
        }
    }
}

impl fmt::Debug for Notifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Notifier")
            .field("render", &self.render.is_some())
            .field("finish", &self.finish.is_some())
            .finish()
    }
}

/// Hook for the presentation delay between showing a trace and settling the move.
pub trait Pacer {
    fn pause(&mut self, duration: Duration);
}

/// Skips the delay, for tests and headless play.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoPause;

impl Pacer for NoPause {
    fn pause(&mut self, _duration: Duration) {}
}

impl<F: FnMut(Duration)> Pacer for F {
    fn pause(&mut self, duration: Duration) {
        self(duration)
    }
}
