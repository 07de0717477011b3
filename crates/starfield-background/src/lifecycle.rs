//! Mount/unmount lifecycle of a running starfield.
//!
//! A host (browser window, terminal, test harness) supplies the viewport
//! size, resize notifications and frame ticks through [`FrameHost`]. The
//! [`Animation`] keeps at most one frame scheduled at a time and holds the
//! id of that frame as its cancellation token: unmounting cancels it, and a
//! tick carrying any other id is ignored.

use rand::Rng;
use rand::rngs::StdRng;
use starfield_core::Size;
use tracing::info;

use crate::engine::StarfieldEngine;
use crate::surface::DrawSurface;

/// Handle for a scheduled frame callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameId(pub u64);

/// Handle for a registered resize listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

/// What the animation needs from its environment.
pub trait FrameHost {
    /// Current viewport size in device pixels.
    fn viewport(&self) -> Size;

    /// Schedule one frame callback for the next display refresh.
    fn request_frame(&mut self) -> FrameId;

    /// Cancel a scheduled frame callback. Unknown ids are ignored.
    fn cancel_frame(&mut self, id: FrameId);

    /// Start delivering resize notifications.
    fn add_resize_listener(&mut self) -> ListenerId;

    /// Stop delivering resize notifications for `id`.
    fn remove_resize_listener(&mut self, id: ListenerId);
}

#[derive(Debug, Clone, Copy)]
struct Mounted {
    pending: Option<FrameId>,
    listener: ListenerId,
}

/// A starfield engine bound to the surface it paints and to a host loop.
#[derive(Debug)]
pub struct Animation<S, R = StdRng> {
    engine: StarfieldEngine<R>,
    surface: S,
    mounted: Option<Mounted>,
}

impl<S: DrawSurface, R: Rng> Animation<S, R> {
    pub fn new(engine: StarfieldEngine<R>, surface: S) -> Self {
        Self {
            engine,
            surface,
            mounted: None,
        }
    }

    /// Size the surface to the viewport, seed the field, listen for resizes
    /// and schedule the first frame. Mounting a running animation does nothing.
    pub fn mount<H: FrameHost + ?Sized>(&mut self, host: &mut H) {
        if self.mounted.is_some() {
            return;
        }
        let viewport = host.viewport();
        self.engine.resize(&mut self.surface, viewport);
        let listener = host.add_resize_listener();
        let pending = Some(host.request_frame());
        self.mounted = Some(Mounted { pending, listener });
        info!(
            width = viewport.width,
            height = viewport.height,
            stars = self.engine.particles().len(),
            "starfield mounted"
        );
    }

    /// Run the frame callback `id`: advance and paint one frame, then
    /// schedule the next. Returns whether a frame was painted.
    ///
    /// Ticks for anything but the pending frame (stale or cancelled ids,
    /// or any tick while unmounted) are ignored.
    pub fn on_frame<H: FrameHost + ?Sized>(&mut self, host: &mut H, id: FrameId) -> bool {
        let Some(mounted) = self.mounted.as_mut() else {
            return false;
        };
        if mounted.pending != Some(id) {
            return false;
        }
        mounted.pending = None;
        let painted = self.engine.render_frame(&mut self.surface);
        mounted.pending = Some(host.request_frame());
        painted
    }

    /// Resize notification: match the surface to the viewport and replace
    /// the field. The scheduled frame stays as it is.
    pub fn on_resize<H: FrameHost + ?Sized>(&mut self, host: &mut H) {
        if self.mounted.is_none() {
            return;
        }
        self.engine.resize(&mut self.surface, host.viewport());
    }

    /// Cancel the scheduled frame and stop listening for resizes.
    pub fn unmount<H: FrameHost + ?Sized>(&mut self, host: &mut H) {
        let Some(mounted) = self.mounted.take() else {
            return;
        };
        if let Some(id) = mounted.pending {
            host.cancel_frame(id);
        }
        host.remove_resize_listener(mounted.listener);
        info!(frames = self.engine.frame_count(), "starfield unmounted");
    }

    /// Whether the animation is mounted and keeping a frame scheduled.
    pub fn is_running(&self) -> bool {
        self.mounted.is_some()
    }

    /// The frame callback the animation is waiting for.
    pub fn pending_frame(&self) -> Option<FrameId> {
        self.mounted.and_then(|m| m.pending)
    }

    pub fn engine(&self) -> &StarfieldEngine<R> {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut StarfieldEngine<R> {
        &mut self.engine
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }
}

/// A host whose frames fire only when [`tick`](ManualHost::tick) is called.
///
/// Useful for tests and for embedding the starfield in a loop that already
/// owns its own timing.
#[derive(Debug, Default)]
pub struct ManualHost {
    viewport: Size,
    next_id: u64,
    pending: Vec<FrameId>,
    listeners: Vec<ListenerId>,
    requested: usize,
    cancelled: usize,
}

impl ManualHost {
    pub fn new(viewport: Size) -> Self {
        Self {
            viewport,
            ..Self::default()
        }
    }

    /// Change the viewport and notify `animation` once per registered listener.
    pub fn resize<S: DrawSurface, R: Rng>(&mut self, size: Size, animation: &mut Animation<S, R>) {
        self.viewport = size;
        for _ in 0..self.listeners.len() {
            animation.on_resize(self);
        }
    }

    /// Fire every frame scheduled before this call. Returns how many frames
    /// were painted.
    pub fn tick<S: DrawSurface, R: Rng>(&mut self, animation: &mut Animation<S, R>) -> usize {
        let due = std::mem::take(&mut self.pending);
        due.into_iter()
            .filter(|&id| animation.on_frame(self, id))
            .count()
    }

    /// Frames scheduled and not yet fired or cancelled.
    pub fn pending_frames(&self) -> &[FrameId] {
        &self.pending
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Total frames ever requested.
    pub fn frames_requested(&self) -> usize {
        self.requested
    }

    /// Total frames cancelled before firing.
    pub fn frames_cancelled(&self) -> usize {
        self.cancelled
    }

    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

impl FrameHost for ManualHost {
    fn viewport(&self) -> Size {
        self.viewport
    }

    fn request_frame(&mut self) -> FrameId {
        let id = FrameId(self.next_id());
        self.pending.push(id);
        self.requested += 1;
        id
    }

    fn cancel_frame(&mut self, id: FrameId) {
        let before = self.pending.len();
        self.pending.retain(|&pending| pending != id);
        self.cancelled += before - self.pending.len();
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
    use starfield_core::StarfieldConfig;

    use crate::surface::RecordingSurface;

    fn animation() -> Animation<RecordingSurface> {
        Animation::new(
            StarfieldEngine::seeded(StarfieldConfig::default(), 11),
            RecordingSurface::default(),
        )
    }

    #[test]
    fn test_mount_schedules_without_drawing() {
        let mut host = ManualHost::new(Size::new(1000, 1000));
        let mut animation = animation();
        animation.mount(&mut host);
        assert!(animation.is_running());
        assert_eq!(animation.engine().particles().len(), 1000);
        assert_eq!(animation.surface().size(), Size::new(1000, 1000));
        assert_eq!(animation.surface().draw_count(), 0);
        assert_eq!(host.pending_frames().len(), 1);
        assert_eq!(host.listener_count(), 1);
        assert_eq!(animation.pending_frame(), Some(host.pending_frames()[0]));
    }

    #[test]
    fn test_each_frame_schedules_exactly_one_more() {
        let mut host = ManualHost::new(Size::new(200, 100));
        let mut animation = animation();
        animation.mount(&mut host);
        for _ in 0..5 {
            assert_eq!(host.tick(&mut animation), 1);
            assert_eq!(host.pending_frames().len(), 1);
        }
        assert_eq!(animation.engine().frame_count(), 5);
        assert_eq!(host.frames_requested(), 6);
    }

    #[test]
    fn test_double_mount_keeps_one_listener() {
        let mut host = ManualHost::new(Size::new(100, 100));
        let mut animation = animation();
        animation.mount(&mut host);
        animation.mount(&mut host);
        assert_eq!(host.listener_count(), 1);
        assert_eq!(host.pending_frames().len(), 1);
    }

    #[test]
    fn test_unmount_cancels_and_stops_drawing() {
        let mut host = ManualHost::new(Size::new(300, 300));
        let mut animation = animation();
        animation.mount(&mut host);
        host.tick(&mut animation);
        let stale = animation.pending_frame().unwrap();

        animation.unmount(&mut host);
        assert!(!animation.is_running());
        assert_eq!(animation.pending_frame(), None);
        assert!(host.pending_frames().is_empty());
        assert_eq!(host.listener_count(), 0);
        assert_eq!(host.frames_cancelled(), 1);

        let draws = animation.surface().draw_count();
        assert_eq!(host.tick(&mut animation), 0);
        assert!(!animation.on_frame(&mut host, stale));
        assert_eq!(animation.surface().draw_count(), draws);
        assert_eq!(host.frames_requested(), 2);
    }

    #[test]
    fn test_unmount_twice_is_harmless() {
        let mut host = ManualHost::new(Size::new(100, 100));
        let mut animation = animation();
        animation.unmount(&mut host);
        animation.mount(&mut host);
        animation.unmount(&mut host);
        animation.unmount(&mut host);
        assert_eq!(host.frames_cancelled(), 1);
    }

    #[test]
    fn test_stale_frame_ignored() {
        let mut host = ManualHost::new(Size::new(100, 100));
        let mut animation = animation();
        animation.mount(&mut host);
        assert!(!animation.on_frame(&mut host, FrameId(999)));
        assert_eq!(animation.engine().frame_count(), 0);
        assert_eq!(host.pending_frames().len(), 1);
    }

    #[test]
    fn test_resize_before_first_frame() {
        let mut host = ManualHost::new(Size::new(800, 600));
        let mut animation = animation();
        animation.mount(&mut host);
        host.resize(Size::new(1600, 1200), &mut animation);
        assert_eq!(animation.engine().particles().len(), 1920);
        assert_eq!(host.tick(&mut animation), 1);
        assert_eq!(animation.surface().size(), Size::new(1600, 1200));
    }

    #[test]
    fn test_resize_mid_animation() {
        let mut host = ManualHost::new(Size::new(800, 600));
        let mut animation = animation();
        animation.mount(&mut host);
        host.tick(&mut animation);
        assert_eq!(animation.engine().particles().len(), 480);

        for _ in 0..3 {
            host.resize(Size::new(1600, 1200), &mut animation);
            assert_eq!(host.listener_count(), 1);
        }
        assert_eq!(animation.engine().particles().len(), 1920);
        assert_eq!(host.pending_frames().len(), 1);
        assert_eq!(host.tick(&mut animation), 1);
    }

    #[test]
    fn test_hidden_viewport() {
        let mut host = ManualHost::new(Size::ZERO);
        let mut animation = animation();
        animation.mount(&mut host);
        assert!(animation.engine().particles().is_empty());
        assert_eq!(host.tick(&mut animation), 0);
        assert_eq!(animation.surface().draw_count(), 0);
        // Keeps scheduling so it recovers once the viewport has area.
        assert_eq!(host.pending_frames().len(), 1);
        host.resize(Size::new(100, 50), &mut animation);
        assert_eq!(host.tick(&mut animation), 1);
    }

    #[test]
    fn test_resize_ignored_while_unmounted() {
        let mut host = ManualHost::new(Size::new(100, 100));
        let mut animation = animation();
        animation.on_resize(&mut host);
        assert!(animation.engine().particles().is_empty());
        assert_eq!(animation.surface().size(), Size::ZERO);
    }
}
