use pooled_scroll::{Align, PoolOptions, slot_factory_fn};
use pooled_scroll_adapter::{ContainerOptions, Easing, PoolingScrollContainer};

fn main() {
    // Example: a container driving a tweened scroll without holding any UI objects.
    //
    // A host would:
    // - start a scroll (e.g. in response to a "scroll to index" command)
    // - call tick(elapsed_ms) once per frame
    // - place its content node at content_position()
    // - render the slots from for_each_visible_slot
    let factory = slot_factory_fn(
        |item: &u32, _index| format!("row {item}"),
        |slot: &mut String, item: &u32, _index| *slot = format!("row {item}"),
    );
    let options = ContainerOptions::new(PoolOptions::new(24, 18.0), 360.0)
        .with_easing(Easing::SmoothStep);
    let mut c = PoolingScrollContainer::new((0..10_000).collect(), factory, options);

    let target = c.scroll_to_index(2_000, Align::Center, 240);
    println!("target_offset={target}");

    let mut frame = 0u32;
    loop {
        let report = c.tick(16);
        frame += 1;
        if frame % 5 == 0 {
            println!(
                "frame={frame} off={} start={} rebound={}",
                report.offset,
                c.current_window_start(),
                report.rebound
            );
        }
        if !c.is_animating() {
            break;
        }
    }

    let mut shown = Vec::new();
    c.for_each_visible_slot(|slot| shown.push(slot.slot().clone()));
    println!("done: content_position={} visible={shown:?}", c.content_position());
}
