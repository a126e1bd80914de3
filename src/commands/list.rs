use std::io::IsTerminal;

use anyhow::Result;
use owo_colors::OwoColorize;
use timeallocator_core::fixtures::Registry;

pub fn run(registry: &Registry) -> Result<()> {
    let color = std::io::stdout().is_terminal();
    println!("{}", render_listing(registry, color));
    Ok(())
}

/// Calendars with their free/booked counts, then the known slot types.
fn render_listing(registry: &Registry, color: bool) -> String {
    let heading = |title: &str| {
        if color {
            title.bold().to_string()
        } else {
            title.to_string()
        }
    };

    let mut lines = vec![heading("Calendars")];
    for calendar in registry.calendars() {
        let free = calendar.slots().iter().filter(|s| s.is_available()).count();
        let booked = calendar.len() - free;
        let counts = format!("({} free, {} booked)", free, booked);
        let counts = if color { counts.dimmed().to_string() } else { counts };
        lines.push(format!("  {} {} {}", calendar.id(), calendar.name(), counts));
    }

    lines.push(String::new());
    lines.push(heading("Slot types"));
    for slot_type in registry.slot_types() {
        lines.push(format!("  {} {}", slot_type.id, slot_type.name));
    }
    lines.join("\n")
}
