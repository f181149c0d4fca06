//! Option store demo: schema, persistence, form input, and reset.
//!
//! Run with: cargo run -p optsmith-config --example options_demo
//!
//! Set `RUST_LOG=debug` to see what the store skips while loading.

use optsmith_config::{FileStorage, OptionStore, Storage, schema_from_json};
use optsmith_core::{OptionSchema, Schema, SliderTrack};
use tracing_subscriber::EnvFilter;

const PLUGIN: &str = "OptionsPlugin Example Usage";

fn panel_schema() -> Schema {
    let help = "This is some help text under the label";
    Schema::new()
        .with_option("text", OptionSchema::text("Some text", "Text").with_help(help))
        .with_option("number", OptionSchema::number("A number", 50.0).with_help(help))
        .with_option("range", OptionSchema::range("A range", 50.0).with_step(1.0))
        .with_option("range_10", OptionSchema::range("A range", 50.0).with_step(10.0))
        .with_option(
            "range_5s",
            OptionSchema::range("A range", 50.0)
                .with_bounds(5.0, 95.0)
                .with_step(5.0),
        )
        .with_option("toggle", OptionSchema::toggle("A toggle", true))
        .with_option(
            "select",
            OptionSchema::select("A dropdown", "One", ["One", "Two", "Three"]),
        )
}

fn print_values<S: Storage>(store: &OptionStore<S>) {
    println!("{:<10} {:<8} {:>10}", "Key", "Type", "Value");
    println!("{:-<10} {:-<8} {:->10}", "", "", "");
    for entry in store.get_all() {
        let kind = entry
            .schema
            .as_ref()
            .map_or("bare", |s| s.option_type().name());
        println!("{:<10} {:<8} {:>10}", entry.key, kind, entry.value.to_string());
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    // Keep the demo out of the real config directory
    let dir = std::env::temp_dir().join("optsmith-demo");
    let storage = FileStorage::new(&dir);

    let mut store = OptionStore::for_plugin(panel_schema(), storage, PLUGIN)
        .on_change(|key, value| println!("  changed: {key} -> {value}"))
        .on_reset(|| println!("  reset to defaults"));

    // --- Load whatever a previous run saved ---
    println!("=== Loaded Options ({}) ===\n", store.storage_key());
    store.load()?;
    print_values(&store);

    // --- Form input ---
    println!("\n=== Form Input ===\n");
    store.apply_input("text", "Hello")?;
    store.apply_input("toggle", "off")?;
    store.apply_input("select", "Three")?;
    if let Err(e) = store.apply_input("select", "Four") {
        println!("  rejected: {e}");
    }

    // --- Slider drag over a 180px track ---
    println!("\n=== Slider Drag ===\n");
    let track = SliderTrack::new(0.0, 180.0);
    if let Some(spec) = store.defaults().get("range_5s").and_then(|o| o.range_spec()).copied() {
        for position in [0.0, 47.0, 96.0, 250.0] {
            let value = track.value_at(position, &spec)?;
            store.set("range_5s", value)?;
            println!(
                "  {position:>5.1}px -> {} (fill {:.1}%)",
                spec.display(value),
                spec.percent_of(value)
            );
        }
    }

    println!("\n=== Saved Blob ===\n");
    println!("{}", serde_json::Value::Object(store.simple_options()));
    println!("\nStored in: {}", dir.display());

    // --- Reset ---
    println!("\n=== Reset ===\n");
    store.reset()?;
    print_values(&store);

    // --- JSON definitions ---
    println!("\n=== Schema From JSON ===\n");
    let schema = schema_from_json(
        r#"{
            "gain": { "type": "range", "value": 0, "min": -24, "max": 24, "step": 0.5, "percent": false, "label": "Gain" },
            "mode": { "type": "select", "value": "Warm", "options": ["Clean", "Warm", "Hot"], "label": "Mode" }
        }"#,
    )?;
    for (key, option) in schema.iter() {
        println!("  {key}: {} (default {})", option.option_type(), option.default);
    }

    Ok(())
}
