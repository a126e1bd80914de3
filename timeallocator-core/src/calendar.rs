//! Per-calendar store of allocated time.
//!
//! A `Calendar` keeps its slots in a single `Vec` sorted by start time. Slots
//! never overlap (`slots[i].time_to() <= slots[i + 1].time_from()`), so the
//! same vector is also sorted by end time and both orders can be binary
//! searched with `partition_point`. Every mutation is a single `insert`,
//! `splice` or in-place boundary change, which keeps the order intact.

use chrono::{Local, NaiveDateTime};
use std::fmt;
use tracing::debug;
use uuid::Uuid;

use crate::error::{AllocatorError, AllocatorResult, check_interval};
use crate::slot::{Appointment, Patient, SlotType, TimeSlot};
use crate::window::SearchWindow;

#[derive(Debug, Clone)]
pub struct Calendar {
    id: Uuid,
    name: String,
    slots: Vec<TimeSlot>,
}

impl Calendar {
    pub fn new(id: Uuid, name: impl Into<String>) -> Self {
        Calendar {
            id,
            name: name.into(),
            slots: Vec::new(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// All allocated slots, in chronological order.
    pub fn slots(&self) -> &[TimeSlot] {
        &self.slots
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Resolve an appointment back to the slot holding it.
    pub fn slot_for(&self, appointment: &Appointment) -> Option<&TimeSlot> {
        if appointment.calendar_id() != Some(self.id) {
            return None;
        }
        let index = self
            .slots
            .binary_search_by(|s| s.time_from().cmp(&appointment.time_from()))
            .ok()?;
        let slot = &self.slots[index];
        (slot.appointment() == Some(appointment)).then_some(slot)
    }

    /// Mark `[from, to)` as free time of `slot_type`.
    ///
    /// If a free slot of the same type ends exactly at `from` it is extended
    /// to `to`; otherwise, if one starts exactly at `to`, it is extended back
    /// to `from`. Only one neighbour is ever merged per call. Returns the slot
    /// now covering the interval.
    pub fn allocate_time(
        &mut self,
        from: NaiveDateTime,
        to: NaiveDateTime,
        slot_type: &SlotType,
    ) -> AllocatorResult<&TimeSlot> {
        check_interval(from, to)?;

        // First slot ending after `from`, and first slot starting at or after `to`.
        // Anything between the two lies inside the requested interval.
        let after_index = self.slots.partition_point(|s| s.time_to() <= from);
        let before_index =
            after_index + self.slots[after_index..].partition_point(|s| s.time_from() < to);
        if before_index != after_index {
            return Err(AllocatorError::OverlapConflict);
        }

        if let Some(prev_index) = after_index.checked_sub(1) {
            let prev = &self.slots[prev_index];
            if prev.time_to() == from && prev.is_available() && prev.matches_type(Some(slot_type)) {
                debug!(calendar = %self.id, %from, %to, "extending previous slot");
                self.slots[prev_index].extend_to(to);
                return Ok(&self.slots[prev_index]);
            }
        }

        if let Some(next) = self.slots.get(after_index) {
            if next.time_from() == to && next.is_available() && next.matches_type(Some(slot_type)) {
                debug!(calendar = %self.id, %from, %to, "extending next slot");
                self.slots[after_index].extend_from(from);
                return Ok(&self.slots[after_index]);
            }
        }

        let mut slot = TimeSlot::new(from, to, slot_type.clone())?;
        slot.bind_to(self.id);
        debug!(calendar = %self.id, %from, %to, index = after_index, "inserting new slot");
        self.slots.insert(after_index, slot);
        Ok(&self.slots[after_index])
    }

    /// Book `[from, to)` for `patient`.
    ///
    /// The interval must lie inside a single free slot. That slot is replaced
    /// by its split pieces, and the piece covering the interval carries the
    /// new appointment.
    pub fn set_appointment(
        &mut self,
        from: NaiveDateTime,
        to: NaiveDateTime,
        patient: &Patient,
    ) -> AllocatorResult<Appointment> {
        check_interval(from, to)?;

        // The only candidate is the last slot starting at or before `from`.
        let index = self
            .slots
            .partition_point(|s| s.time_from() <= from)
            .checked_sub(1)
            .ok_or(AllocatorError::NoAllocatedTime)?;

        let mut split = self.slots[index].split_by_interval(from, to)?;
        let appointment = Appointment::attach(patient.clone(), &mut split.middle);
        debug!(
            calendar = %self.id, %from, %to, patient = %patient.id, kind = ?split.kind(),
            "booking appointment"
        );

        self.slots.splice(index..=index, split.into_slots());
        Ok(appointment)
    }

    /// Free slots overlapping `[from, to)` with at least `duration` minutes,
    /// optionally restricted to one slot type.
    ///
    /// Missing bounds default to a year before and after the current local
    /// time. A single bound beyond that default range finds nothing.
    pub fn find_available_time(
        &self,
        from: Option<NaiveDateTime>,
        to: Option<NaiveDateTime>,
        slot_type: Option<&SlotType>,
        duration: i64,
    ) -> AllocatorResult<Vec<&TimeSlot>> {
        let window = SearchWindow::resolve(from, to, Local::now().naive_local())?;
        Ok(window
            .map(|window| self.available_in(window, slot_type, duration))
            .unwrap_or_default())
    }

    /// Same as [`Calendar::find_available_time`] with the window already resolved.
    pub fn available_in(
        &self,
        window: SearchWindow,
        slot_type: Option<&SlotType>,
        duration: i64,
    ) -> Vec<&TimeSlot> {
        let SearchWindow { from, to } = window;

        let mut start_index = self.slots.partition_point(|s| s.time_from() < from);
        let mut end_index = self.slots.partition_point(|s| s.time_to() <= to);

        // Slots sticking out of either end of the window still overlap it.
        // Short ones are dropped by the duration filter below.
        if start_index > 0 && self.slots[start_index - 1].time_to() > from {
            start_index -= 1;
        }
        if end_index < self.slots.len() && self.slots[end_index].time_from() < to {
            end_index += 1;
        }

        if start_index >= end_index || start_index >= self.slots.len() {
            return Vec::new();
        }

        self.slots[start_index..end_index]
            .iter()
            .filter(|s| {
                s.is_available() && s.duration() >= duration as f64 && s.matches_type(slot_type)
            })
            .collect()
    }
}

impl fmt::Display for Calendar {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(day: u32, h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2020, 8, day)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    struct Fixture {
        calendar: Calendar,
        patients: Vec<Patient>,
        slot_types: Vec<SlotType>,
    }

    fn setup() -> Fixture {
        Fixture {
            calendar: Calendar::new(Uuid::new_v4(), "Test Calendar"),
            patients: vec![
                Patient::new(Uuid::new_v4(), "Patient Foo"),
                Patient::new(Uuid::new_v4(), "Patient Bar"),
                Patient::new(Uuid::new_v4(), "Patient Baz"),
            ],
            slot_types: vec![
                SlotType::new(Uuid::new_v4(), "Free Consultation"),
                SlotType::new(Uuid::new_v4(), "Videochat"),
            ],
        }
    }

    fn assert_ordered(calendar: &Calendar) {
        for pair in calendar.slots().windows(2) {
            assert!(
                pair[0].time_to() <= pair[1].time_from(),
                "slots out of order: {:?}",
                pair
            );
        }
    }

    fn bounds(calendar: &Calendar) -> Vec<(NaiveDateTime, NaiveDateTime)> {
        calendar
            .slots()
            .iter()
            .map(|s| (s.time_from(), s.time_to()))
            .collect()
    }

    // ALLOCATION

    #[test]
    fn test_allocate_time() {
        let mut f = setup();
        f.calendar
            .allocate_time(at(17, 8, 30), at(17, 10, 0), &f.slot_types[0])
            .unwrap();

        assert_eq!(f.calendar.len(), 1);
        let slot = &f.calendar.slots()[0];
        assert_eq!(slot.time_from(), at(17, 8, 30));
        assert_eq!(slot.time_to(), at(17, 10, 0));
        assert!(slot.matches_type(Some(&f.slot_types[0])));
        assert!(slot.is_available());
        assert_eq!(slot.duration(), 90.0);
        assert_eq!(slot.calendar_id(), Some(f.calendar.id()));
    }

    #[test]
    fn test_allocate_rejects_invalid_interval() {
        let mut f = setup();
        let err = f
            .calendar
            .allocate_time(at(17, 10, 0), at(17, 10, 0), &f.slot_types[0])
            .unwrap_err();
        assert!(matches!(err, AllocatorError::InvalidInterval { .. }));
        assert!(f.calendar.is_empty());
    }

    #[test]
    fn test_allocate_multiple_keeps_order() {
        let mut f = setup();
        f.calendar
            .allocate_time(at(17, 13, 0), at(17, 15, 30), &f.slot_types[0])
            .unwrap();
        f.calendar
            .allocate_time(at(17, 8, 30), at(17, 10, 0), &f.slot_types[0])
            .unwrap();
        f.calendar
            .allocate_time(at(17, 11, 0), at(17, 12, 0), &f.slot_types[1])
            .unwrap();

        assert_eq!(
            bounds(&f.calendar),
            vec![
                (at(17, 8, 30), at(17, 10, 0)),
                (at(17, 11, 0), at(17, 12, 0)),
                (at(17, 13, 0), at(17, 15, 30)),
            ]
        );
        assert_ordered(&f.calendar);
    }

    #[test]
    fn test_allocate_overlap() {
        let mut f = setup();
        f.calendar
            .allocate_time(at(17, 8, 30), at(17, 10, 0), &f.slot_types[0])
            .unwrap();

        // Overlapping the end, overlapping the start, inside, and around.
        for (from, to) in [
            (at(17, 9, 45), at(17, 11, 0)),
            (at(17, 8, 0), at(17, 8, 45)),
            (at(17, 9, 0), at(17, 9, 30)),
            (at(17, 8, 0), at(17, 11, 0)),
        ] {
            let err = f
                .calendar
                .allocate_time(from, to, &f.slot_types[0])
                .unwrap_err();
            assert!(matches!(err, AllocatorError::OverlapConflict));
            assert!(err.to_string().contains("There is already"));
        }
        assert_eq!(f.calendar.len(), 1);
    }

    #[test]
    fn test_allocate_merge_behind() {
        let mut f = setup();
        f.calendar
            .allocate_time(at(17, 8, 30), at(17, 10, 0), &f.slot_types[0])
            .unwrap();
        let merged = f
            .calendar
            .allocate_time(at(17, 10, 0), at(17, 11, 30), &f.slot_types[0])
            .unwrap();
        assert_eq!(merged.time_from(), at(17, 8, 30));

        assert_eq!(bounds(&f.calendar), vec![(at(17, 8, 30), at(17, 11, 30))]);
    }

    #[test]
    fn test_allocate_merge_forward() {
        let mut f = setup();
        f.calendar
            .allocate_time(at(17, 10, 0), at(17, 11, 30), &f.slot_types[0])
            .unwrap();
        let merged = f
            .calendar
            .allocate_time(at(17, 8, 30), at(17, 10, 0), &f.slot_types[0])
            .unwrap();
        assert_eq!(merged.time_to(), at(17, 11, 30));

        assert_eq!(bounds(&f.calendar), vec![(at(17, 8, 30), at(17, 11, 30))]);
    }

    #[test]
    fn test_allocate_no_merge_across_types() {
        let mut f = setup();
        f.calendar
            .allocate_time(at(17, 8, 30), at(17, 10, 0), &f.slot_types[0])
            .unwrap();
        f.calendar
            .allocate_time(at(17, 10, 0), at(17, 11, 30), &f.slot_types[1])
            .unwrap();

        assert_eq!(f.calendar.len(), 2);
        assert_ordered(&f.calendar);
    }

    #[test]
    fn test_allocate_no_merge_into_booked_slot() {
        let mut f = setup();
        f.calendar
            .allocate_time(at(17, 8, 30), at(17, 10, 0), &f.slot_types[0])
            .unwrap();
        f.calendar
            .set_appointment(at(17, 8, 30), at(17, 10, 0), &f.patients[0])
            .unwrap();
        f.calendar
            .allocate_time(at(17, 10, 0), at(17, 11, 0), &f.slot_types[0])
            .unwrap();

        assert_eq!(f.calendar.len(), 2);
        assert!(!f.calendar.slots()[0].is_available());
        assert!(f.calendar.slots()[1].is_available());
    }

    #[test]
    fn test_allocate_gap_fill_merges_one_side_only() {
        let mut f = setup();
        f.calendar
            .allocate_time(at(17, 8, 0), at(17, 9, 0), &f.slot_types[0])
            .unwrap();
        f.calendar
            .allocate_time(at(17, 10, 0), at(17, 11, 0), &f.slot_types[0])
            .unwrap();
        f.calendar
            .allocate_time(at(17, 9, 0), at(17, 10, 0), &f.slot_types[0])
            .unwrap();

        assert_eq!(
            bounds(&f.calendar),
            vec![(at(17, 8, 0), at(17, 10, 0)), (at(17, 10, 0), at(17, 11, 0))]
        );
    }

    #[test]
    fn test_allocate_gap_fill_falls_back_to_lookahead() {
        let mut f = setup();
        f.calendar
            .allocate_time(at(17, 8, 0), at(17, 9, 0), &f.slot_types[1])
            .unwrap();
        f.calendar
            .allocate_time(at(17, 10, 0), at(17, 11, 0), &f.slot_types[0])
            .unwrap();
        f.calendar
            .allocate_time(at(17, 9, 0), at(17, 10, 0), &f.slot_types[0])
            .unwrap();

        assert_eq!(
            bounds(&f.calendar),
            vec![(at(17, 8, 0), at(17, 9, 0)), (at(17, 9, 0), at(17, 11, 0))]
        );
    }

    // BOOKING

    #[test]
    fn test_schedule_appointment() {
        let mut f = setup();
        f.calendar
            .allocate_time(at(17, 8, 30), at(17, 10, 0), &f.slot_types[0])
            .unwrap();
        let appointment = f
            .calendar
            .set_appointment(at(17, 9, 0), at(17, 9, 30), &f.patients[0])
            .unwrap();

        assert_eq!(
            bounds(&f.calendar),
            vec![
                (at(17, 8, 30), at(17, 9, 0)),
                (at(17, 9, 0), at(17, 9, 30)),
                (at(17, 9, 30), at(17, 10, 0)),
            ]
        );
        let slots = f.calendar.slots();
        assert!(slots[0].is_available());
        assert!(!slots[1].is_available());
        assert!(slots[2].is_available());
        assert!(slots.iter().all(|s| s.slot_type() == &f.slot_types[0]));

        assert_eq!(appointment.patient(), &f.patients[0]);
        assert_eq!(f.calendar.slot_for(&appointment), Some(&slots[1]));
    }

    #[test]
    fn test_schedule_whole_block() {
        let mut f = setup();
        f.calendar
            .allocate_time(at(17, 8, 30), at(17, 10, 0), &f.slot_types[0])
            .unwrap();
        f.calendar
            .set_appointment(at(17, 8, 30), at(17, 10, 0), &f.patients[0])
            .unwrap();

        assert_eq!(f.calendar.len(), 1);
        assert!(!f.calendar.slots()[0].is_available());
    }

    #[test]
    fn test_schedule_already_booked() {
        let mut f = setup();
        f.calendar
            .allocate_time(at(17, 8, 30), at(17, 10, 0), &f.slot_types[0])
            .unwrap();
        f.calendar
            .set_appointment(at(17, 8, 30), at(17, 9, 30), &f.patients[0])
            .unwrap();

        let err = f
            .calendar
            .set_appointment(at(17, 8, 30), at(17, 9, 30), &f.patients[1])
            .unwrap_err();
        assert!(matches!(err, AllocatorError::AlreadyBooked));
        assert_eq!(f.calendar.len(), 2);
    }

    #[test]
    fn test_schedule_overlapping_booking() {
        let mut f = setup();
        f.calendar
            .allocate_time(at(17, 8, 30), at(17, 10, 0), &f.slot_types[0])
            .unwrap();
        f.calendar
            .set_appointment(at(17, 8, 30), at(17, 9, 30), &f.patients[0])
            .unwrap();
        assert_eq!(f.calendar.len(), 2);

        let err = f
            .calendar
            .set_appointment(at(17, 9, 15), at(17, 9, 45), &f.patients[1])
            .unwrap_err();
        assert!(matches!(err, AllocatorError::OutOfBounds));
        assert!(err.to_string().contains("outside of the time slot"));
        assert_eq!(f.calendar.len(), 2);
    }

    #[test]
    fn test_schedule_too_long() {
        let mut f = setup();
        f.calendar
            .allocate_time(at(17, 8, 30), at(17, 10, 0), &f.slot_types[0])
            .unwrap();

        let err = f
            .calendar
            .set_appointment(at(17, 9, 15), at(17, 10, 30), &f.patients[1])
            .unwrap_err();
        assert!(matches!(err, AllocatorError::OutOfBounds));
        assert_eq!(bounds(&f.calendar), vec![(at(17, 8, 30), at(17, 10, 0))]);
    }

    #[test]
    fn test_schedule_in_a_gap() {
        let mut f = setup();
        f.calendar
            .allocate_time(at(17, 8, 30), at(17, 10, 0), &f.slot_types[0])
            .unwrap();

        let err = f
            .calendar
            .set_appointment(at(17, 11, 0), at(17, 11, 30), &f.patients[0])
            .unwrap_err();
        assert!(matches!(err, AllocatorError::OutOfBounds));
    }

    #[test]
    fn test_schedule_before_any_allocated_time() {
        let mut f = setup();
        let err = f
            .calendar
            .set_appointment(at(17, 9, 0), at(17, 9, 30), &f.patients[0])
            .unwrap_err();
        assert!(matches!(err, AllocatorError::NoAllocatedTime));

        f.calendar
            .allocate_time(at(17, 8, 30), at(17, 10, 0), &f.slot_types[0])
            .unwrap();
        let err = f
            .calendar
            .set_appointment(at(17, 8, 0), at(17, 8, 45), &f.patients[0])
            .unwrap_err();
        assert!(matches!(err, AllocatorError::NoAllocatedTime));
    }

    #[test]
    fn test_schedule_rejects_invalid_interval() {
        let mut f = setup();
        f.calendar
            .allocate_time(at(17, 8, 30), at(17, 10, 0), &f.slot_types[0])
            .unwrap();

        // Reversed intervals fail before the slot lookup, even ahead of all allocated time.
        for (from, to) in [
            (at(17, 9, 30), at(17, 9, 0)),
            (at(17, 9, 0), at(17, 9, 0)),
            (at(17, 8, 0), at(17, 7, 0)),
        ] {
            let err = f
                .calendar
                .set_appointment(from, to, &f.patients[0])
                .unwrap_err();
            assert!(matches!(err, AllocatorError::InvalidInterval { .. }));
        }
        assert_eq!(f.calendar.len(), 1);
    }

    #[test]
    fn test_slot_for_other_calendar() {
        let mut f = setup();
        f.calendar
            .allocate_time(at(17, 8, 30), at(17, 10, 0), &f.slot_types[0])
            .unwrap();
        let appointment = f
            .calendar
            .set_appointment(at(17, 9, 0), at(17, 9, 30), &f.patients[0])
            .unwrap();

        let mut other = Calendar::new(Uuid::new_v4(), "Other");
        other
            .allocate_time(at(17, 8, 30), at(17, 10, 0), &f.slot_types[0])
            .unwrap();
        assert_eq!(other.slot_for(&appointment), None);
    }

    // LOOKUP

    /// Two days of allocated time with two bookings on the first afternoon.
    fn lookup_setup() -> Fixture {
        let mut f = setup();
        let slots = [
            (at(17, 8, 30), at(17, 10, 0), 0),
            (at(17, 12, 30), at(17, 16, 0), 0),
            (at(17, 17, 0), at(17, 19, 0), 1),
            (at(18, 8, 30), at(18, 10, 30), 0),
        ];
        let appointments = [
            (at(17, 12, 30), at(17, 13, 0), 0),
            (at(17, 13, 30), at(17, 14, 0), 1),
        ];

        for (from, to, t) in slots {
            f.calendar.allocate_time(from, to, &f.slot_types[t]).unwrap();
        }
        for (from, to, p) in appointments {
            f.calendar.set_appointment(from, to, &f.patients[p]).unwrap();
        }
        f
    }

    fn around_fixture() -> SearchWindow {
        SearchWindow::around(at(17, 12, 0))
    }

    #[test]
    fn test_lookup_layout() {
        let f = lookup_setup();
        assert_eq!(f.calendar.len(), 7);
        assert_eq!(f.calendar.slots().iter().filter(|s| s.is_available()).count(), 5);
        assert_ordered(&f.calendar);
    }

    #[test]
    fn test_get_all() {
        let f = lookup_setup();
        let result = f.calendar.available_in(around_fixture(), None, 0);
        assert_eq!(result.len(), 5);
        assert!(result.iter().all(|s| s.is_available()));
        assert!(result.windows(2).all(|w| w[0].time_to() <= w[1].time_from()));
    }

    #[test]
    fn test_get_by_type() {
        let f = lookup_setup();
        let result = f
            .calendar
            .available_in(around_fixture(), Some(&f.slot_types[1]), 0);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].time_from(), at(17, 17, 0));

        let result = f
            .calendar
            .available_in(around_fixture(), Some(&f.slot_types[0]), 0);
        assert_eq!(result.len(), 4);
    }

    #[test]
    fn test_get_by_duration() {
        let f = lookup_setup();
        assert_eq!(f.calendar.available_in(around_fixture(), None, 90).len(), 4);
        assert_eq!(f.calendar.available_in(around_fixture(), None, 91).len(), 3);
        assert_eq!(f.calendar.available_in(around_fixture(), None, 120).len(), 3);
        assert_eq!(f.calendar.available_in(around_fixture(), None, 121).len(), 0);
    }

    #[test]
    fn test_get_by_range() {
        let f = lookup_setup();
        let result = f
            .calendar
            .find_available_time(Some(at(17, 9, 0)), Some(at(17, 17, 30)), None, 0)
            .unwrap();

        let starts: Vec<_> = result.iter().map(|s| s.time_from()).collect();
        assert_eq!(
            starts,
            vec![at(17, 8, 30), at(17, 13, 0), at(17, 14, 0), at(17, 17, 0)]
        );
        assert!(result.iter().all(|s| s.overlaps(at(17, 9, 0), at(17, 17, 30))));
    }

    #[test]
    fn test_get_range_inside_one_slot() {
        let f = lookup_setup();
        let result = f
            .calendar
            .find_available_time(Some(at(17, 14, 30)), Some(at(17, 15, 0)), None, 0)
            .unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].time_from(), at(17, 14, 0));
    }

    #[test]
    fn test_get_range_touching_slot_edges() {
        let f = lookup_setup();
        // Window ends where the 17:00 slot starts and starts where the 10:00 slot ends.
        let result = f
            .calendar
            .find_available_time(Some(at(17, 10, 0)), Some(at(17, 17, 0)), None, 0)
            .unwrap();
        let starts: Vec<_> = result.iter().map(|s| s.time_from()).collect();
        assert_eq!(starts, vec![at(17, 13, 0), at(17, 14, 0)]);
    }

    #[test]
    fn test_get_empty() {
        let f = lookup_setup();
        let result = f
            .calendar
            .find_available_time(Some(at(20, 10, 0)), Some(at(20, 15, 0)), None, 0)
            .unwrap();
        assert!(result.is_empty());

        let empty = Calendar::new(Uuid::new_v4(), "Empty");
        assert!(empty.available_in(around_fixture(), None, 0).is_empty());
    }

    #[test]
    fn test_get_by_multiple_filters() {
        let f = lookup_setup();
        let result = f
            .calendar
            .find_available_time(
                Some(at(17, 9, 30)),
                Some(at(17, 19, 0)),
                Some(&f.slot_types[0]),
                60,
            )
            .unwrap();

        // The 08:30 slot only overlaps the window by 30 minutes, but its own
        // length (90 minutes) is what the duration filter looks at.
        let starts: Vec<_> = result.iter().map(|s| s.time_from()).collect();
        assert_eq!(starts, vec![at(17, 8, 30), at(17, 14, 0)]);
    }

    #[test]
    fn test_get_rejects_reversed_window() {
        let f = lookup_setup();
        let err = f
            .calendar
            .find_available_time(Some(at(17, 15, 0)), Some(at(17, 10, 0)), None, 0)
            .unwrap_err();
        assert!(matches!(err, AllocatorError::InvalidInterval { .. }));
    }

    #[test]
    fn test_get_single_bound_beyond_default_range() {
        let f = lookup_setup();
        let far_future = Local::now().naive_local() + chrono::Duration::days(400);
        let far_past = Local::now().naive_local() - chrono::Duration::days(400);

        let result = f
            .calendar
            .find_available_time(Some(far_future), None, None, 0)
            .unwrap();
        assert!(result.is_empty());

        let result = f
            .calendar
            .find_available_time(None, Some(far_past), None, 0)
            .unwrap();
        assert!(result.is_empty());
    }
}
