//! Value types stored in a calendar: slot types, patients, time slots and
//! the appointments that occupy them.

use chrono::{Duration, NaiveDateTime};
use std::fmt;
use uuid::Uuid;

use crate::error::{AllocatorError, AllocatorResult, check_interval};

/// A category tag for allocated time (e.g. "Free consultation (30 min)").
///
/// Two slot types are equal when their ids are equal; the name is display only.
#[derive(Debug, Clone)]
pub struct SlotType {
    pub id: Uuid,
    pub name: String,
}

impl SlotType {
    pub fn new(id: Uuid, name: impl Into<String>) -> Self {
        SlotType {
            id,
            name: name.into(),
        }
    }
}

impl PartialEq for SlotType {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for SlotType {}

impl fmt::Display for SlotType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// A patient that can be booked into a slot. Compared by id only.
#[derive(Debug, Clone)]
pub struct Patient {
    pub id: Uuid,
    pub name: String,
}

impl Patient {
    pub fn new(id: Uuid, name: impl Into<String>) -> Self {
        Patient {
            id,
            name: name.into(),
        }
    }
}

impl PartialEq for Patient {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Patient {}

impl fmt::Display for Patient {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// A patient bound to a booked interval.
///
/// The appointment names the slot it occupies by calendar and interval rather
/// than holding a reference to it; the calendar stays the sole owner of its
/// slots. Use [`crate::Calendar::slot_for`] to resolve it back to the slot.
#[derive(Debug, Clone, PartialEq)]
pub struct Appointment {
    patient: Patient,
    calendar_id: Option<Uuid>,
    time_from: NaiveDateTime,
    time_to: NaiveDateTime,
}

impl Appointment {
    /// Bind `patient` to `slot`, attaching the appointment to the slot.
    ///
    /// No validation happens here: the caller must hand in a free slot that
    /// spans exactly the booked interval.
    pub(crate) fn attach(patient: Patient, slot: &mut TimeSlot) -> Self {
        let appointment = Appointment {
            patient,
            calendar_id: slot.calendar_id,
            time_from: slot.time_from,
            time_to: slot.time_to,
        };
        slot.appointment = Some(appointment.clone());
        appointment
    }

    pub fn patient(&self) -> &Patient {
        &self.patient
    }

    pub fn calendar_id(&self) -> Option<Uuid> {
        self.calendar_id
    }

    pub fn time_from(&self) -> NaiveDateTime {
        self.time_from
    }

    pub fn time_to(&self) -> NaiveDateTime {
        self.time_to
    }
}

/// A half-open interval `[time_from, time_to)` of a given type, optionally
/// occupied by one appointment.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSlot {
    time_from: NaiveDateTime,
    time_to: NaiveDateTime,
    slot_type: SlotType,
    appointment: Option<Appointment>,
    calendar_id: Option<Uuid>,
}

impl TimeSlot {
    pub fn new(
        time_from: NaiveDateTime,
        time_to: NaiveDateTime,
        slot_type: SlotType,
    ) -> AllocatorResult<Self> {
        check_interval(time_from, time_to)?;
        Ok(TimeSlot {
            time_from,
            time_to,
            slot_type,
            appointment: None,
            calendar_id: None,
        })
    }

    pub fn time_from(&self) -> NaiveDateTime {
        self.time_from
    }

    pub fn time_to(&self) -> NaiveDateTime {
        self.time_to
    }

    pub fn slot_type(&self) -> &SlotType {
        &self.slot_type
    }

    pub fn appointment(&self) -> Option<&Appointment> {
        self.appointment.as_ref()
    }

    /// The calendar this slot was allocated in, if any.
    pub fn calendar_id(&self) -> Option<Uuid> {
        self.calendar_id
    }

    pub fn span(&self) -> Duration {
        self.time_to - self.time_from
    }

    /// Length of the slot in minutes (fractional for sub-minute remainders).
    pub fn duration(&self) -> f64 {
        self.span().num_seconds() as f64 / 60.0
    }

    pub fn is_available(&self) -> bool {
        self.appointment.is_none()
    }

    /// Type filter used by queries. `None` matches every slot.
    pub fn matches_type(&self, slot_type: Option<&SlotType>) -> bool {
        match slot_type {
            None => true,
            Some(t) => t.id == self.slot_type.id,
        }
    }

    /// Whether the slot intersects the half-open window `[from, to)`.
    pub fn overlaps(&self, from: NaiveDateTime, to: NaiveDateTime) -> bool {
        self.time_from < to && self.time_to > from
    }

    pub(crate) fn bind_to(&mut self, calendar_id: Uuid) {
        self.calendar_id = Some(calendar_id);
    }

    // Merges only ever grow a free slot outwards, so `time_from < time_to` holds.
    pub(crate) fn extend_to(&mut self, time_to: NaiveDateTime) {
        debug_assert!(time_to > self.time_to);
        self.time_to = time_to;
    }

    pub(crate) fn extend_from(&mut self, time_from: NaiveDateTime) {
        debug_assert!(time_from < self.time_from);
        self.time_from = time_from;
    }

    /// Cut `[from, to)` out of this slot.
    ///
    /// The result always carries the requested interval as `middle`, plus
    /// free remainders before and after it when the interval does not touch
    /// the slot's edges. Every piece keeps this slot's type and calendar and
    /// starts without an appointment.
    pub fn split_by_interval(&self, from: NaiveDateTime, to: NaiveDateTime) -> AllocatorResult<Split> {
        check_interval(from, to)?;
        if from < self.time_from || to > self.time_to {
            return Err(AllocatorError::OutOfBounds);
        }
        if !self.is_available() {
            return Err(AllocatorError::AlreadyBooked);
        }

        let piece = |time_from: NaiveDateTime, time_to: NaiveDateTime| TimeSlot {
            time_from,
            time_to,
            slot_type: self.slot_type.clone(),
            appointment: None,
            calendar_id: self.calendar_id,
        };

        Ok(Split {
            before: (from > self.time_from).then(|| piece(self.time_from, from)),
            middle: piece(from, to),
            after: (to < self.time_to).then(|| piece(to, self.time_to)),
        })
    }
}

/// Which pieces a split produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitKind {
    /// The interval covered the whole slot.
    Whole,
    /// A free remainder is left before the interval.
    Before,
    /// A free remainder is left after the interval.
    After,
    /// Free remainders on both sides.
    Both,
}

/// The 1-3 slots replacing a slot that was split, in chronological order.
#[derive(Debug, Clone, PartialEq)]
pub struct Split {
    pub before: Option<TimeSlot>,
    pub middle: TimeSlot,
    pub after: Option<TimeSlot>,
}

impl Split {
    pub fn kind(&self) -> SplitKind {
        match (&self.before, &self.after) {
            (None, None) => SplitKind::Whole,
            (Some(_), None) => SplitKind::Before,
            (None, Some(_)) => SplitKind::After,
            (Some(_), Some(_)) => SplitKind::Both,
        }
    }

    pub fn len(&self) -> usize {
        1 + usize::from(self.before.is_some()) + usize::from(self.after.is_some())
    }

    pub fn into_slots(self) -> impl Iterator<Item = TimeSlot> {
        self.before
            .into_iter()
            .chain(std::iter::once(self.middle))
            .chain(self.after)
    }
}
