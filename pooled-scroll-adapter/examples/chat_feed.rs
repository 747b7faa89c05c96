use std::thread;
use std::time::Duration;

use pooled_scroll::{PoolOptions, slot_factory_fn};
use pooled_scroll_adapter::{ContainerEvent, ContainerOptions, IngestError, PoolingScrollContainer};

fn main() {
    // Example: a chat feed fed from background threads.
    //
    // Live messages arrive on a producer thread, older history is fetched on a worker thread, and
    // the render loop applies both at the start of each tick.
    let factory = slot_factory_fn(
        |msg: &String, index| format!("#{index} {msg}"),
        |slot: &mut String, msg: &String, index| *slot = format!("#{index} {msg}"),
    );
    let options = ContainerOptions::new(PoolOptions::new(12, 24.0), 240.0).with_follow_tail(true);
    let seed: Vec<String> = (0..20).map(|i| format!("message {i}")).collect();
    let mut c = PoolingScrollContainer::new(seed, factory, options);
    c.set_item_validator(|msg: &String| {
        if msg.trim().is_empty() {
            Err(IngestError::rejected("empty message"))
        } else {
            Ok(())
        }
    });
    let _sub = c.subscribe(|event| match event {
        ContainerEvent::ItemSkipped { error } => println!("skipped: {error}"),
        ContainerEvent::HistoryPrepended { count } => println!("history: +{count}"),
        _ => {}
    });

    let ingest = c.ingest();
    let producer = thread::spawn(move || {
        for i in 0..10 {
            let body = if i == 4 { String::new() } else { format!("live {i}") };
            ingest.enqueue(body);
            thread::sleep(Duration::from_millis(5));
        }
    });

    let mut fetch = c.history().begin_fetch();
    let worker = thread::spawn(move || {
        for i in 0..5 {
            if fetch.is_cancelled() {
                return false;
            }
            fetch.push(format!("old {i}"));
        }
        fetch.complete()
    });

    for _ in 0..30 {
        c.tick(16);
        thread::sleep(Duration::from_millis(2));
    }
    let _ = producer.join();
    let _ = worker.join();
    c.tick(16);
    c.tick(1000);

    println!("len={} offset={}", c.len(), c.current_offset());
    c.for_each_visible_slot(|slot| println!("{}", slot.slot()));
}
