//! Frame host backed by the terminal event loop.

use std::time::{Duration, Instant};

use starfield_background::{FrameHost, FrameId, ListenerId};
use starfield_core::Size;

/// Schedules frames at a fixed interval and tracks the terminal viewport.
///
/// Only one frame can be pending at a time; requesting another replaces it.
#[derive(Debug)]
pub struct TerminalHost {
    viewport: Size,
    pixel_scale: u32,
    frame_interval: Duration,
    pending: Option<(FrameId, Instant)>,
    last_frame: Option<Instant>,
    listeners: Vec<ListenerId>,
    next_id: u64,
}

impl TerminalHost {
    /// A host for a `columns x rows` terminal running at `fps`.
    pub fn new(columns: u16, rows: u16, pixel_scale: u32, fps: u32) -> Self {
        let mut host = Self {
            viewport: Size::ZERO,
            pixel_scale: pixel_scale.max(1),
            frame_interval: Duration::from_secs(1) / fps.max(1),
            pending: None,
            last_frame: None,
            listeners: Vec::new(),
            next_id: 0,
        };
        host.set_terminal_size(columns, rows);
        host
    }

    /// Update the viewport from a terminal size. Each cell holds two
    /// vertically stacked raster pixels of `pixel_scale` device pixels.
    pub fn set_terminal_size(&mut self, columns: u16, rows: u16) {
        self.viewport = Size::new(
            u32::from(columns) * self.pixel_scale,
            u32::from(rows) * 2 * self.pixel_scale,
        );
    }

    pub fn pixel_scale(&self) -> u32 {
        self.pixel_scale
    }

    pub fn has_resize_listeners(&self) -> bool {
        !self.listeners.is_empty()
    }

    /// How long the event loop may block before the pending frame is due.
    /// Without a pending frame the loop waits a full interval.
    pub fn time_until_frame(&self, now: Instant) -> Duration {
        match self.pending {
            Some((_, due)) => due.saturating_duration_since(now),
            None => self.frame_interval,
        }
    }

    /// Take the pending frame if it is due at `now`.
    pub fn due_frame(&mut self, now: Instant) -> Option<FrameId> {
        match self.pending {
            Some((id, due)) if due <= now => {
                self.pending = None;
                self.last_frame = Some(now);
                Some(id)
            }
            _ => None,
        }
    }

    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

impl FrameHost for TerminalHost {
    fn viewport(&self) -> Size {
        self.viewport
    }

    fn request_frame(&mut self) -> FrameId {
        let id = FrameId(self.next_id());
        let due = match self.last_frame {
            Some(last) => last + self.frame_interval,
            None => Instant::now(),
        };
        self.pending = Some((id, due));
        id
    }

    fn cancel_frame(&mut self, id: FrameId) {
        if matches!(self.pending, Some((pending, _)) if pending == id) {
            self.pending = None;
        }
    }

    fn add_resize_listener(&mut self) -> ListenerId {
        let id = ListenerId(self.next_id());
        self.listeners.push(id);
        id
    }

    fn remove_resize_listener(&mut self, id: ListenerId) {
        self.listeners.retain(|&listener| listener != id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_viewport_from_terminal_size() {
        let host = TerminalHost::new(80, 24, 4, 60);
        assert_eq!(host.viewport(), Size::new(320, 192));
    }

    #[test]
    fn test_zero_scale_and_fps_are_clamped() {
        let host = TerminalHost::new(10, 5, 0, 0);
        assert_eq!(host.pixel_scale(), 1);
        assert_eq!(host.viewport(), Size::new(10, 10));
        assert_eq!(host.time_until_frame(Instant::now()), Duration::from_secs(1));
    }

    #[test]
    fn test_first_frame_is_due_immediately() {
        let mut host = TerminalHost::new(10, 5, 1, 60);
        let id = host.request_frame();
        assert_eq!(host.due_frame(Instant::now()), Some(id));
        assert_eq!(host.due_frame(Instant::now()), None);
    }

    #[test]
    fn test_following_frames_wait_one_interval() {
        let mut host = TerminalHost::new(10, 5, 1, 50);
        host.request_frame();
        let start = Instant::now();
        host.due_frame(start).unwrap();

        let id = host.request_frame();
        assert_eq!(host.due_frame(start), None);
        assert_eq!(host.time_until_frame(start), Duration::from_millis(20));
        assert_eq!(host.due_frame(start + Duration::from_millis(20)), Some(id));
    }

    #[test]
    fn test_cancel_only_matching_frame() {
        let mut host = TerminalHost::new(10, 5, 1, 60);
        let id = host.request_frame();
        host.cancel_frame(FrameId(id.0 + 100));
        assert!(host.pending.is_some());
        host.cancel_frame(id);
        assert_eq!(host.due_frame(Instant::now()), None);
    }

    #[test]
    fn test_listeners() {
        let mut host = TerminalHost::new(10, 5, 1, 60);
        assert!(!host.has_resize_listeners());
        let id = host.add_resize_listener();
        assert!(host.has_resize_listeners());
        host.remove_resize_listener(id);
        assert!(!host.has_resize_listeners());
    }
}
