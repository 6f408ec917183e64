// Example: a simulated host loop. Resize and measurement bursts are flushed once per frame,
// and a requested scroll is applied by the "host", whose echo is recognized as observed.
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use virtual_window::{Align, ListOptions, ScrollBehaviour, ScrollCoordinator};

fn main() -> virtual_window::Result<()> {
    let renders = Arc::new(AtomicUsize::new(0));
    let opts = ListOptions::new(10_000, 24.0).with_on_change(Some({
        let renders = Arc::clone(&renders);
        move |c: &ScrollCoordinator| {
            renders.fetch_add(1, Ordering::Relaxed);
            let r = c.range();
            println!(
                "render: offset={} reason={:?} items={}..{:?}",
                c.state().offset(),
                c.state().change_reason(),
                r.start_index(),
                r.stop_index()
            );
        }
    }));
    let mut c = ScrollCoordinator::new(opts)?;

    // The host applied the initial offset.
    c.confirm_requested_scroll();

    // Window drag: many resize events, one recompute.
    for h in (300..=600).step_by(30) {
        c.on_resize(800.0, h as f64);
    }
    c.on_frame();

    // Items report their real sizes after layout.
    c.record_measurements((0..30).map(|i| (i, 24.0 + (i % 3) as f64 * 8.0)))?;
    c.on_frame();

    // Programmatic scroll; the host applies it and echoes the scroll event back.
    c.scroll_to_index(5_000, Align::Center, ScrollBehaviour::Smooth)?;
    if let Some(req) = c.pending_request() {
        println!("host: scrolling to {} ({:?})", req.offset, req.behaviour);
        c.on_scroll(req.offset);
    }
    assert!(c.pending_request().is_none());

    println!("renders={}", renders.load(Ordering::Relaxed));
    Ok(())
}
