//! Order Lifecycle
//!
//! This example drives several orders through one shared machine.
//!
//! Key concepts:
//! - The machine stores no order state; each order row keeps its own
//! - Enter/exit hooks run only on real state changes
//! - Self-transitions (heartbeats) run the action without hooks
//! - A failing action leaves the order where it was
//!
//! Run with: cargo run --example order_lifecycle

use statem::{label_enum, MachineBuilder};
use std::collections::HashMap;
use tracing_subscriber::EnvFilter;

label_enum! {
    enum OrderState {
        Created,
        Paid,
        Shipped,
        Cancelled,
    }
}

label_enum! {
    enum OrderEvent {
        Pay,
        Ship,
        Cancel,
        Heartbeat,
    }
}

#[derive(Debug)]
struct Order {
    id: u32,
    amount_cents: u64,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Order Lifecycle ===\n");

    let machine = MachineBuilder::<OrderState, OrderEvent, Order>::new()
        .named("orders")
        .transition_with_action(OrderState::Created, OrderEvent::Pay, "charge", OrderState::Paid)
        .transition_with_action(OrderState::Paid, OrderEvent::Ship, "dispatch", OrderState::Shipped)
        .transition_with_action(OrderState::Created, OrderEvent::Cancel, "refund", OrderState::Cancelled)
        .transition_with_action(OrderState::Paid, OrderEvent::Heartbeat, "touch", OrderState::Paid)
        .action("charge", |_, _, _, _, order: &Order| {
            if order.amount_cents == 0 {
                return Err(format!("order {} has nothing to charge", order.id).into());
            }
            println!("  charged order {} ({} cents)", order.id, order.amount_cents);
            Ok(())
        })
        .action("dispatch", |_, _, _, _, order: &Order| {
            println!("  dispatched order {}", order.id);
            Ok(())
        })
        .action("touch", |_, _, _, _, order: &Order| {
            println!("  heartbeat for order {}", order.id);
            Ok(())
        })
        .on_exit(|from, event, order| {
            println!("  order {} leaving {:?} on {:?}", order.id, from, event);
            Ok(())
        })
        .on_enter(|event, to, order| {
            println!("  order {} entered {:?} after {:?}", order.id, to, event);
            Ok(())
        })
        .build();

    // Stand-in for a table with one row per order.
    let mut rows: HashMap<u32, OrderState> = HashMap::new();
    let orders = [
        Order { id: 1, amount_cents: 1999 },
        Order { id: 2, amount_cents: 0 },
    ];
    for order in &orders {
        rows.insert(order.id, OrderState::Created);
    }

    let script = [
        OrderEvent::Pay,
        OrderEvent::Heartbeat,
        OrderEvent::Ship,
        OrderEvent::Cancel,
    ];

    for order in &orders {
        println!("Order {}:", order.id);
        for event in script {
            let current = rows[&order.id];
            match machine.event(&current, &event, order) {
                Ok(()) => {
                    if let Some(transition) = machine.find(&current, &event) {
                        rows.insert(order.id, transition.to);
                    }
                }
                Err(err) => println!("  {:?} rejected: {}", event, err),
            }
        }
        println!("  final state: {:?}\n", rows[&order.id]);
    }

    println!("Transition graph:\n{}", machine.to_dot());
    println!("=== Example Complete ===");
}
