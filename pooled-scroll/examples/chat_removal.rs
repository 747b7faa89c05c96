use pooled_scroll::{PoolOptions, Viewport, Window, slot_factory_fn};

fn main() {
    // Example: removing messages from the middle of the window keeps slots contiguous.
    let factory = slot_factory_fn(
        |msg: &&str, index| (index, msg.to_string()),
        |slot: &mut (usize, String), msg: &&str, index| *slot = (index, msg.to_string()),
    );
    let messages = vec!["hi", "hello", "gg", "brb", "back", "wp", "rematch?", "sure"];
    let mut w = Window::new(messages, factory, PoolOptions::new(5, 1.0).with_starting_index(3));
    println!("before: {:?}", w.pool().iter().map(|s| s.slot()).collect::<Vec<_>>());

    w.remove_item(&"back");
    println!("after remove: {:?}", w.pool().iter().map(|s| s.slot()).collect::<Vec<_>>());

    w.add_item("new message", true);
    w.settle(Viewport::new(w.max_scroll_offset(4.0), 4.0), None);
    println!("after add: {:?}", w.pool().iter().map(|s| s.slot()).collect::<Vec<_>>());
}
