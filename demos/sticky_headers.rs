// Example: pinned section headers that stay rendered while scrolling.
use virtual_window::{ListOptions, ScrollCoordinator};

fn main() -> virtual_window::Result<()> {
    let headers = [0usize, 100, 200, 300, 400, 999];
    let opts = ListOptions::new_with_estimate_fn(1_000, move |i| {
        if headers.contains(&i) {
            32.0
        } else {
            20.0
        }
    })
    .with_sticky_indices(headers)
    .with_overscan(2);

    let mut c = ScrollCoordinator::new(opts)?;
    c.on_scroll(5_000.0);

    let range = c.range();
    println!("visible={:?} window={:?}", range.visible, range.window);
    for it in &range.items {
        let tag = if it.sticky { " (sticky)" } else { "" };
        println!("#{:<4} offset={:<8} size={}{tag}", it.index, it.offset, it.size);
    }
    Ok(())
}
