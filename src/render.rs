//! Terminal rendering for search results.

use owo_colors::OwoColorize;
use timeallocator_core::window::DATETIME_FORMAT;
use timeallocator_core::{Calendar, TimeSlot};

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for TimeSlot {
    fn render(&self) -> String {
        let (start, end) = format_bounds(self);
        let slot_type = format!("({})", self.slot_type());
        format!("{} - {} {}", start, end, slot_type.dimmed())
    }
}

/// Start and end as printed in results. The end only repeats the date when
/// the slot runs past midnight.
fn format_bounds(slot: &TimeSlot) -> (String, String) {
    let start = slot.time_from().format(DATETIME_FORMAT).to_string();
    let end = if slot.time_to().date() == slot.time_from().date() {
        slot.time_to().format("%H:%M").to_string()
    } else {
        slot.time_to().format(DATETIME_FORMAT).to_string()
    };
    (start, end)
}

/// Plain "<start> - <end> (<type>)" line for a slot.
pub fn format_slot(slot: &TimeSlot) -> String {
    let (start, end) = format_bounds(slot);
    format!("{} - {} ({})", start, end, slot.slot_type())
}

/// Header plus one line per slot, or a notice when nothing is available.
/// Colors are only applied when `color` is set (i.e. stdout is a terminal).
pub fn render_availability(calendar: &Calendar, slots: &[&TimeSlot], color: bool) -> String {
    if slots.is_empty() {
        let notice = format!("No available slots for {}", calendar.name());
        return if color { notice.dimmed().to_string() } else { notice };
    }

    let header = format!("Available slots for {} ({}):", calendar.name(), slots.len());
    let mut lines = vec![if color { header.bold().to_string() } else { header }];
    lines.extend(slots.iter().map(|slot| {
        let line = if color { slot.render() } else { format_slot(slot) };
        format!("  {}", line)
    }));
    lines.join("\n")
}
