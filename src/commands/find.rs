use std::io::IsTerminal;

use anyhow::Result;
use timeallocator_core::fixtures::{AvailabilityQuery, Registry};
use uuid::Uuid;

use crate::render::render_availability;

pub fn run(registry: &Registry, calendar_ids: &[Uuid], query: &AvailabilityQuery) -> Result<()> {
    let results = registry.find_available_time(calendar_ids, query)?;
    let color = std::io::stdout().is_terminal();

    let blocks: Vec<String> = results
        .iter()
        .map(|(calendar, slots)| render_availability(calendar, slots, color))
        .collect();
    println!("{}", blocks.join("\n\n"));

    Ok(())
}
