/*
[INPUT]:  User-facing outcomes (persistence failures, deletions, refreshes)
[OUTPUT]: Short-lived toast queue drained by UI ticks
[POS]:    State layer - notifications
[UPDATE]: When toast lifetime or levels change
*/

use std::collections::VecDeque;

pub const DEFAULT_TOAST_TICKS: u32 = 16;
const DEFAULT_CAPACITY: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub level: ToastLevel,
    pub message: String,
    remaining_ticks: u32,
}

impl Toast {
    pub fn remaining_ticks(&self) -> u32 {
        self.remaining_ticks
    }
}

/// FIFO of toasts. Only the front toast is shown and ages.
#[derive(Debug, Clone)]
pub struct Notifications {
    queue: VecDeque<Toast>,
    ttl_ticks: u32,
    capacity: usize,
}

impl Default for Notifications {
    fn default() -> Self {
        Self::new(DEFAULT_TOAST_TICKS)
    }
}

impl Notifications {
    pub fn new(ttl_ticks: u32) -> Self {
        Self {
            queue: VecDeque::new(),
            ttl_ticks: ttl_ticks.max(1),
            capacity: DEFAULT_CAPACITY,
        }
    }

    pub fn push(&mut self, level: ToastLevel, message: impl Into<String>) {
        if self.queue.len() >= self.capacity {
            self.queue.pop_front();
        }
        self.queue.push_back(Toast {
            level,
            message: message.into(),
            remaining_ticks: self.ttl_ticks,
        });
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(ToastLevel::Info, message);
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push(ToastLevel::Success, message);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(ToastLevel::Error, message);
    }

    /// Age the visible toast by one tick, dropping it once expired.
    pub fn tick(&mut self) {
        if let Some(front) = self.queue.front_mut() {
            front.remaining_ticks = front.remaining_ticks.saturating_sub(1);
            if front.remaining_ticks == 0 {
                self.queue.pop_front();
            }
        }
    }

    pub fn current(&self) -> Option<&Toast> {
        self.queue.front()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Toast> {
        self.queue.iter()
    }
}
