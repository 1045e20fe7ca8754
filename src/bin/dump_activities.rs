//! Dump the activity roster from the activities service for analysis.
//!
//! Usage: cargo run --bin dump_activities

use anyhow::Context;
use rollcall::activities::ActivitiesClient;
use rollcall::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().context("Failed to load config")?;
    let client = ActivitiesClient::new(&config).context("Failed to build the service client")?;

    let activities = client
        .fetch_activities()
        .await
        .context("Failed to fetch activities")?;

    println!("=== Activities ({}) ===\n", activities.len());
    for activity in &activities {
        println!("--- {} | {} spots left ---", activity.name, activity.spots_left());
        println!("  {}", activity.description);
        println!("  Schedule: {}", activity.schedule);
        println!(
            "  Participants ({}/{}):",
            activity.participants.len(),
            activity.max_participants
        );
        for email in &activity.participants {
            println!("    {email}");
        }
        println!();
    }

    Ok(())
}
