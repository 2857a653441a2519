//! One shared machine driven by many entities at once.

use statem::{FsmError, Machine, MachineBuilder};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier, Mutex};
use std::thread;

const ENTITIES: usize = 1000;

#[derive(Default)]
struct Ledger {
    entered: Mutex<Vec<(usize, String)>>,
    actions: AtomicUsize,
}

fn order_machine(ledger: &Arc<Ledger>) -> Machine<String, String, usize> {
    let (on_action, on_enter) = (Arc::clone(ledger), Arc::clone(ledger));
    MachineBuilder::<String, String, usize>::new()
        .transition_with_action("created".to_string(), "pay".to_string(), "charge", "paid".to_string())
        .transition_with_action("paid".to_string(), "ship".to_string(), "dispatch", "shipped".to_string())
        .transition("shipped".to_string(), "ping".to_string(), "shipped".to_string())
        .action("charge", move |_, _, _, _, _| {
            on_action.actions.fetch_add(1, Ordering::SeqCst);
            Ok(())
        })
        .action("dispatch", |_, _, _, _, id: &usize| {
            if id % 10 == 0 {
                return Err(format!("carrier refused order {id}").into());
            }
            Ok(())
        })
        .on_enter(move |_, to: &String, id: &usize| {
            on_enter.entered.lock().unwrap().push((*id, to.clone()));
            Ok(())
        })
        .build()
}

/// Drive one entity through its events, persisting the state the way a
/// caller would: only after `event` succeeds.
fn drive(machine: &Machine<String, String, usize>, id: usize) -> (String, Vec<String>) {
    let mut state = "created".to_string();
    let mut outcomes = Vec::new();
    for event in ["pay", "ship", "ping", "pay"] {
        let event = event.to_string();
        match machine.event(&state, &event, &id) {
            Ok(()) => {
                state = machine.find(&state, &event).map(|t| t.to.clone()).unwrap_or(state);
                outcomes.push(format!("ok {event}"));
            }
            Err(FsmError::NoTransition { .. }) => outcomes.push(format!("none {event}")),
            Err(err) => outcomes.push(format!("err {event}: {err}")),
        }
    }
    (state, outcomes)
}

#[test]
fn concurrent_entities_match_sequential_run() {
    let sequential_ledger = Arc::new(Ledger::default());
    let sequential = order_machine(&sequential_ledger);
    let expected: Vec<_> = (0..ENTITIES).map(|id| drive(&sequential, id)).collect();

    let ledger = Arc::new(Ledger::default());
    let machine = Arc::new(order_machine(&ledger));
    let barrier = Arc::new(Barrier::new(ENTITIES));

    let handles: Vec<_> = (0..ENTITIES)
        .map(|id| {
            let machine = Arc::clone(&machine);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                drive(&machine, id)
            })
        })
        .collect();
    let actual: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    assert_eq!(actual, expected);
    assert_eq!(
        ledger.actions.load(Ordering::SeqCst),
        sequential_ledger.actions.load(Ordering::SeqCst)
    );

    let mut entered = ledger.entered.lock().unwrap().clone();
    let mut expected_entered = sequential_ledger.entered.lock().unwrap().clone();
    entered.sort();
    expected_entered.sort();
    assert_eq!(entered, expected_entered);
}

#[test]
fn failed_dispatch_leaves_entity_in_place() {
    let ledger = Arc::new(Ledger::default());
    let machine = order_machine(&ledger);

    let (state, outcomes) = drive(&machine, 20);

    assert_eq!(state, "paid");
    assert_eq!(outcomes[0], "ok pay");
    assert!(outcomes[1].starts_with("err ship: action 'dispatch' failed"));
    assert_eq!(outcomes[2], "none ping");
    assert_eq!(outcomes[3], "none pay");
}
