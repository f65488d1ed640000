//! Three independent loads joined into one view.
//!
//! - Spawns three producers with different latencies.
//! - Renders the joined view after each tick: a spinner until the
//!   last source lands, then the full dashboard.
//! - Runs the same view as a suspendable task under `Suspense`.

use std::time::Duration;

use loadable::{all, Cases, Loadable, Resource, Suspense, SuspenseConfig};
use tokio::time::sleep;

#[derive(Clone, Debug)]
struct Profile {
    name: String,
}

#[derive(Clone, Debug)]
struct Experiment {
    id: u32,
    state: &'static str,
}

fn render(
    profile: Loadable<Profile>,
    experiments: Loadable<Vec<Experiment>>,
    unread: Loadable<usize>,
) -> String {
    all((profile, experiments, unread)).match_with(
        Cases::loaded(|(p, e, n): (Profile, Vec<Experiment>, usize)| {
            let active = e.iter().filter(|x| x.state == "ACTIVE").count();
            format!("{}: {} experiments ({} active), {} unread", p.name, e.len(), active, n)
        })
        .not_loaded(|| "loading…".to_string()),
    )
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let profile = Resource::spawn(async {
        sleep(Duration::from_millis(30)).await;
        Profile {
            name: "ada".to_string(),
        }
    });
    let experiments = Resource::spawn(async {
        sleep(Duration::from_millis(10)).await;
        vec![
            Experiment { id: 1, state: "ACTIVE" },
            Experiment { id: 2, state: "COMPLETED" },
        ]
    });
    let unread = Resource::spawn(async {
        sleep(Duration::from_millis(20)).await;
        3usize
    });

    for tick in 0..5 {
        println!(
            "t={:>2}ms {}",
            tick * 10,
            render(profile.get(), experiments.get(), unread.get())
        );
        sleep(Duration::from_millis(10)).await;
    }

    experiments.refresh(async {
        sleep(Duration::from_millis(15)).await;
        vec![Experiment { id: 3, state: "ACTIVE" }]
    });
    println!("after refresh: {}", render(profile.get(), experiments.get(), unread.get()));

    let runner = Suspense::new(SuspenseConfig::bounded(16));
    let view = runner
        .run(|| {
            let ids: Vec<u32> = experiments.wait_for()?.iter().map(|e| e.id).collect();
            let who = profile.wait_for()?.name;
            Ok(format!("{who} sees experiments {ids:?}"))
        })
        .await;
    match view {
        Ok(line) => println!("suspense: {line}"),
        Err(err) => println!("suspense gave up: {err}"),
    }
}
