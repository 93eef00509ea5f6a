//! Seeded random sample records.
//!
//! Every generated record has the same five columns, covering each value
//! type, so the output exercises multi-line headers and mixed widths.

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tabreportlib::Record;

const FIRST_NAMES: [&str; 10] = [
    "Ada", "Alan", "Barbara", "Dennis", "Edsger", "Frances", "Grace", "Ken", "Linus", "Margaret",
];

const LAST_NAMES: [&str; 10] = [
    "Allen", "Dijkstra", "Hamilton", "Hopper", "Liskov", "Lovelace", "Ritchie", "Thompson",
    "Torvalds", "Turing",
];

/// 2020-01-01T00:00:00Z
const BASE_EPOCH_SECS: i64 = 1_577_836_800;
const FIVE_YEARS_SECS: i64 = 5 * 365 * 24 * 60 * 60;

/// Generate `count` records from a deterministic seed.
pub fn generate(count: usize, seed: u64) -> Vec<Record> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count).map(|i| sample_record(&mut rng, i)).collect()
}

fn sample_record(rng: &mut StdRng, index: usize) -> Record {
    let first = FIRST_NAMES[rng.random_range(0..FIRST_NAMES.len())];
    let last = LAST_NAMES[rng.random_range(0..LAST_NAMES.len())];
    let secs = BASE_EPOCH_SECS + rng.random_range(0..FIVE_YEARS_SECS);
    let timestamp = DateTime::<Utc>::from_timestamp(secs, 0).unwrap_or_default();
    let cents: i64 = rng.random_range(-100_000..10_000_000);

    Record::new()
        .with("id", index as i64 + 1)
        .with("the_name", format!("{first} {last}"))
        .with("the_timestamp", timestamp)
        .with("is_active", rng.random_bool(0.7))
        .with("account_balance_amount", cents as f64 / 100.0)
}
