use pooled_scroll::{PoolOptions, ScrollDirection, Viewport, Window, slot_factory_fn};

fn main() {
    // Example: 10k rows rendered through a pool of 12 slots.
    let factory = slot_factory_fn(
        |item: &String, index| format!("#{index}: {item}"),
        |slot: &mut String, item: &String, index| *slot = format!("#{index}: {item}"),
    );
    let items = (0..10_000).map(|i| format!("row {i}")).collect();
    let mut w = Window::new(items, factory, PoolOptions::new(12, 1.0));

    let mut prev = 0.0f32;
    for offset in [0.0f32, 3.0, 7.0, 40.0, 5_000.0, 4_990.0] {
        let viewport = Viewport::new(offset, 8.0);
        let shifted = w.settle(viewport, ScrollDirection::between(prev, offset));
        prev = offset;

        let mut first = None;
        w.for_each_visible_slot(viewport, |s| {
            first.get_or_insert_with(|| s.slot().clone());
        });
        println!(
            "offset={offset} shifted={shifted} window={:?} first={first:?}",
            w.window_range()
        );
    }
}
