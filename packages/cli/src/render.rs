//! Terminal rendering for session snapshots.
//!
//! This is a presentation boundary: it only reads snapshots, never
//! mutates the session.

use std::collections::BTreeSet;

use parcel_map_analytics_models::ZoningSummary;
use parcel_map_parcel_models::Parcel;
use parcel_map_session_models::{LifecycleStatus, Selection, Snapshot, SnapshotOutcome};

/// How many distinct zoning codes to show per group before eliding.
const MAX_EXAMPLE_CODES: usize = 3;

/// Prints a snapshot to stdout (errors to stderr).
pub fn print_snapshot(snapshot: &Snapshot) {
    match snapshot.status {
        LifecycleStatus::Idle => println!("Nothing selected."),
        LifecycleStatus::Pending => println!("Request still in flight."),
        LifecycleStatus::Error => {
            if let Some(error) = &snapshot.error {
                eprintln!("Request failed: {error}");
            }
        }
        LifecycleStatus::Success => match &snapshot.outcome {
            Some(SnapshotOutcome::Area(summary)) => print_summary(&snapshot.selection, summary),
            Some(SnapshotOutcome::ParcelDetail(parcel)) => print_parcel(parcel),
            Some(SnapshotOutcome::NoParcelHere) => println!("No parcel found here."),
            None => {}
        },
    }
}

fn print_summary(selection: &Selection, summary: &ZoningSummary) {
    if let Selection::Polygon(ring) = selection {
        println!("Region: {} vertices", ring.vertex_count());
    }
    println!(
        "{} parcels, {:.2} acres",
        summary.total_parcels, summary.total_acreage
    );
    if let Some(value) = summary.total_value {
        println!("Total assessed value: ${value:.0}");
    }
    if let Some(score) = summary.average_score {
        println!("Average investment score: {score:.1}");
    }

    if !summary.groups.is_empty() {
        println!();
        println!("Zoning mix:");
        for (key, group) in &summary.groups {
            println!(
                "  {key}: {} parcels, {:.2} acres  [{}]",
                group.count,
                group.acres,
                example_codes(&group.codes)
            );
        }
    }

    if let Some(text) = &summary.ai_summary {
        println!();
        println!("{text}");
    }
}

fn print_parcel(parcel: &Parcel) {
    println!("Parcel {}", parcel.id);
    if let Some(address) = &parcel.site_address {
        println!("  Address:  {address}");
    }
    if let Some(owner) = &parcel.owner_name {
        println!("  Owner:    {owner}");
    }
    if let Some(zoning) = &parcel.zoning_code {
        println!("  Zoning:   {zoning}");
    }
    if let Some(acres) = parcel.acres {
        println!("  Lot size: {acres} acres");
    }
    if let Some(value) = parcel.total_value {
        println!("  Value:    ${value:.0}");
    }
    if let Some(year) = parcel.year_built {
        println!("  Built:    {year}");
    }
}

/// Formats up to [`MAX_EXAMPLE_CODES`] example codes for a group.
fn example_codes(codes: &BTreeSet<String>) -> String {
    if codes.is_empty() {
        return "-".to_string();
    }
    let shown: Vec<&str> = codes.iter().take(MAX_EXAMPLE_CODES).map(String::as_str).collect();
    let mut out = shown.join(", ");
    if codes.len() > MAX_EXAMPLE_CODES {
        out.push_str(", ...");
    }
    out
}
