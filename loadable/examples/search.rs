//! Lookups that can come back empty.
//!
//! - Models a model-registry search whose results are `Lookup`s.
//! - Joins a lookup of a model with a lookup of its latest version,
//!   showing `NotFound` taking priority over `NotLoaded`.
//! - Collects a batch of lookups into one.

use std::collections::BTreeMap;

use loadable::{all, Cases, Lookup};

struct Registry {
    models: BTreeMap<&'static str, Vec<u32>>,
    synced: bool,
}

impl Registry {
    fn model(&self, name: &str) -> Lookup<&'static str> {
        if !self.synced {
            return Lookup::pending();
        }
        Lookup::found(self.models.keys().copied().find(|k| *k == name))
    }

    fn latest_version(&self, name: &str) -> Lookup<u32> {
        if !self.synced {
            return Lookup::pending();
        }
        Lookup::found(self.models.get(name).and_then(|v| v.iter().copied().max()))
    }
}

fn describe(hit: Lookup<(&'static str, u32)>) -> String {
    hit.match_with(
        Cases::loaded(|(name, v): (&str, u32)| format!("{name} v{v}"))
            .not_loaded(|| "searching…".to_string())
            .not_found(|| "no such model".to_string()),
    )
}

fn main() {
    let mut registry = Registry {
        models: BTreeMap::from([("resnet", vec![1, 2, 5]), ("bert", vec![])]),
        synced: false,
    };

    let early = all((registry.model("resnet"), registry.latest_version("resnet")));
    println!("before sync: {}", describe(early));

    registry.synced = true;
    for name in ["resnet", "bert", "gpt"] {
        let hit = all((registry.model(name), registry.latest_version(name)));
        println!("{name:>6}: {}", describe(hit));
    }

    // Half-synced batch: one pending lookup and one miss. The miss wins.
    let mixed = all((Lookup::<u32>::pending(), registry.latest_version("gpt")));
    println!("mixed batch: {:?}", mixed);

    let versions: Lookup<Vec<u32>> = ["resnet", "resnet"]
        .into_iter()
        .map(|n| registry.latest_version(n))
        .collect();
    println!("batch: {:?}", versions.into_loadable());
}
