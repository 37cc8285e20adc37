//! Preview a simulated week
//!
//! Prints one week of snapshots for the default site, along with the
//! feature vectors each schema would put on the wire.
//!
//! Run with: `cargo run --example preview_site`

use vane::dataset::SnapshotSource;
use vane::{FeatureEncoder, VectorSchema, DAY_SECS, SIMULATION_EPOCH};
use vane_simdata::{SimulatedSite, SiteConfig};

fn main() {
    let config = SiteConfig::new().with_households(16).with_seed(42);
    let mut site = SimulatedSite::new(config);

    println!("=== One simulated week ===\n");
    println!(
        "{:<12} {:>9} {:>10} {:>10} {:>10}",
        "Day", "MaxTemp", "MaxHumid", "AvgHumid", "AvgPower"
    );
    println!("{}", "-".repeat(55));

    for day in 0..7 {
        let ts = SIMULATION_EPOCH + day * DAY_SECS;
        let snapshot = site.snapshot(ts).expect("simulated snapshot");
        let avg_power: f32 = snapshot.meters.iter().map(|m| m.power).sum::<f32>()
            / snapshot.meter_count() as f32;

        println!(
            "{:<12} {:>8.1}C {:>9.1}% {:>9.1}% {:>9.2}",
            format!("epoch+{}d", day),
            snapshot.temperature.max,
            snapshot.humidity.max,
            snapshot.humidity.average,
            avg_power
        );
    }

    println!("\n=== Wire vectors for day 0 ===\n");
    let snapshot = site.snapshot(SIMULATION_EPOCH).expect("simulated snapshot");
    for schema in [
        VectorSchema::Discomfort,
        VectorSchema::Compact,
        VectorSchema::Full,
    ] {
        let vector = FeatureEncoder::new(schema)
            .encode(&snapshot)
            .expect("encode");
        println!(
            "{:<16} {:>2} bytes  {:?}",
            schema.to_string(),
            vector.len(),
            vector.fields()
        );
    }
}
