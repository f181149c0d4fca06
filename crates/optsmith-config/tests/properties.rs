//! Property-based tests for optsmith-config persistence.
//!
//! Drives an option store through random sequences of writes, then checks
//! what a reload and a reset leave behind.

use optsmith_config::{MemoryStorage, OptionStore};
use optsmith_core::{OptionSchema, OptionValue, Schema};
use proptest::prelude::*;

const KEY: &str = "panel";
const CHOICES: [&str; 3] = ["One", "Two", "Three"];

fn panel_schema() -> Schema {
    Schema::new()
        .with_option("text", OptionSchema::text("Some text", "Text"))
        .with_option("number", OptionSchema::number("A number", 50.0))
        .with_option("range_10", OptionSchema::range("A range", 50.0).with_step(10.0))
        .with_option("toggle", OptionSchema::toggle("A toggle", true))
        .with_option("select", OptionSchema::select("A dropdown", "One", CHOICES))
}

/// One write a settings panel can make.
#[derive(Debug, Clone)]
enum Write {
    Text(String),
    Number(f64),
    Range(f64),
    Toggle(bool),
    Select(usize),
}

impl Write {
    fn apply(&self, store: &mut OptionStore<&mut MemoryStorage>) {
        let result = match self {
            Self::Text(s) => store.set("text", s.as_str()),
            Self::Number(n) => store.set("number", *n),
            Self::Range(n) => store.set("range_10", *n),
            Self::Toggle(b) => store.set("toggle", *b),
            Self::Select(i) => store.set("select", CHOICES[*i]),
        };
        result.unwrap();
    }
}

fn write_strategy() -> impl Strategy<Value = Write> {
    prop_oneof![
        "[a-z ]{0,8}".prop_map(Write::Text),
        // Hundredths keep the JSON text exact; zero exercises the falsy rule
        prop_oneof![Just(0), -100_000_000i32..100_000_000]
            .prop_map(|n| Write::Number(f64::from(n) / 100.0)),
        (-200i32..300).prop_map(|n| Write::Range(f64::from(n) / 10.0)),
        any::<bool>().prop_map(Write::Toggle),
        (0usize..CHOICES.len()).prop_map(Write::Select),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// A reload sees every truthy value that was set, and the default in
    /// place of every falsy one.
    #[test]
    fn reload_keeps_truthy_values(writes in prop::collection::vec(write_strategy(), 0..20)) {
        let mut storage = MemoryStorage::new();
        let before = {
            let mut store = OptionStore::new(panel_schema(), &mut storage, KEY);
            for write in &writes {
                write.apply(&mut store);
            }
            store.get_all().clone()
        };

        let mut reloaded = OptionStore::new(panel_schema(), &mut storage, KEY);
        reloaded.load().unwrap();

        for entry in &before {
            let expected = if entry.value.is_falsy() {
                entry.schema.as_ref().map(|s| s.default.clone()).unwrap()
            } else {
                entry.value.clone()
            };
            prop_assert_eq!(
                reloaded.get(&entry.key), Some(&expected),
                "key '{}' after {:?}", entry.key, writes
            );
        }
        prop_assert_eq!(reloaded.get_all().len(), before.len());
    }

    /// Reset restores every default and saves exactly once.
    #[test]
    fn reset_restores_defaults(writes in prop::collection::vec(write_strategy(), 0..20)) {
        let mut storage = MemoryStorage::new();
        let mut store = OptionStore::new(panel_schema(), &mut storage, KEY);
        for write in &writes {
            write.apply(&mut store);
        }
        let saves = store.storage().save_count();

        store.reset().unwrap();

        prop_assert_eq!(store.storage().save_count(), saves + 1);
        for (key, option) in store.defaults().iter() {
            prop_assert_eq!(store.get(key), Some(&option.default), "key '{}'", key);
        }
        drop(store);

        let mut reloaded = OptionStore::new(panel_schema(), &mut storage, KEY);
        reloaded.load().unwrap();
        for (key, option) in panel_schema().iter() {
            prop_assert_eq!(reloaded.get(key), Some(&option.default), "key '{}'", key);
        }
    }
}
