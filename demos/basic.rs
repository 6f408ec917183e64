use virtual_window::{Align, ListOptions, ScrollBehaviour, ScrollCoordinator};

fn main() -> virtual_window::Result<()> {
    let mut c = ScrollCoordinator::new(ListOptions::new(1_000_000, 20.0))?;
    c.on_scroll(123_456.0);

    let range = c.range();
    println!("total_extent={}", c.total_extent());
    println!("visible={:?} window={:?}", range.visible, range.window);
    println!("first_item={:?}", range.items.first());

    let offset = c.scroll_to_index(999_999, Align::End, ScrollBehaviour::Instant)?;
    println!("after scroll_to_index: offset={offset} request={:?}", c.pending_request());
    Ok(())
}
