//! The periodic tick producer.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use winit::event_loop::EventLoopProxy;

use crate::event::Event;

/// Fixed tick period driving blink and other time-based visual state.
pub const TICK_RATE: Duration = Duration::from_millis(20);

/// Feeds [`Event::Tick`] into the serial event queue at a fixed rate from a
/// dedicated thread. The queue is the event loop's own; the proxy
/// interleaves ticks with platform events in arrival order, so the element
/// tree never sees a concurrent call.
pub struct Ticker {
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl Ticker {
    pub fn spawn(proxy: EventLoopProxy<Event>) -> Self {
        let stop = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&stop);
        let handle = thread::spawn(move || {
            while !flag.load(Ordering::Relaxed) {
                thread::sleep(TICK_RATE);
                if proxy.send_event(Event::Tick).is_err() {
                    break; // event loop is gone
                }
            }
        });
        Self { stop, handle: Some(handle) }
    }

    /// Stop the producer and wait for it to acknowledge. Teardown proceeds
    /// only after the thread has exited.
    pub fn stop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.stop();
    }
}
