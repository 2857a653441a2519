//! JSON Workflow
//!
//! This example loads a hierarchical machine from a JSON description and
//! dispatches events through the nested child machine first.
//!
//! Run with: cargo run --example json_workflow

use statem::loader::{self, LoadedBuilder};
use tracing_subscriber::EnvFilter;

const PLAYER: &str = r#"{
    "name": "player",
    "transitions": [
        {"from": "off", "event": "power", "to": "on", "action": "warm_up", "child": {
            "name": "playback",
            "transitions": [
                {"from": "playing", "event": "pause", "to": "paused", "action": "mute"},
                {"from": "paused", "event": "resume", "to": "playing"}
            ]
        }},
        {"from": "on", "event": "power", "to": "off"}
    ]
}"#;

fn log_actions(builder: LoadedBuilder<()>) -> LoadedBuilder<()> {
    builder.action("mute", |from, event, action, to, _| {
        println!("  [{action}] {from} --{event}--> {to}");
        Ok(())
    })
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== JSON Workflow ===\n");

    let machine = loader::from_json_with(PLAYER.as_bytes(), &log_actions)?
        .action("warm_up", |_, _, _, _, _| {
            println!("  warming up");
            Ok(())
        })
        .on_enter(|event, to, _| {
            println!("  entered {to} on {event}");
            Ok(())
        })
        .build();

    let s = |text: &str| text.to_string();

    println!("power on:");
    machine.event(&s("off"), &s("power"), &())?;

    println!("pause while playing (handled by the child):");
    machine.event_nested(&[s("on"), s("playing")], &s("pause"), &())?;

    println!("power off while paused (falls back to the parent):");
    machine.event_nested(&[s("on"), s("paused")], &s("power"), &())?;

    println!("\nEdges:");
    for edge in machine.edges() {
        println!("  {} -> {} [{}]", edge.from, edge.to, edge.label);
    }

    if let Err(err) = machine.export_png("player") {
        println!("\n(graph not rendered: {err})");
    }

    println!("\n=== Example Complete ===");
    Ok(())
}
