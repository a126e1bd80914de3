//! Loading calendars from JSON fixture files.
//!
//! Slot types come from one shared file; each calendar has its own file
//! listing its patients, allocated time and appointments. Loading a calendar
//! replays the allocated time through [`Calendar::allocate_time`] and then the
//! appointments through [`Calendar::set_appointment`], in file order.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::path::Path;

use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Deserializer};
use tracing::{debug, info};
use uuid::Uuid;

use crate::calendar::Calendar;
use crate::config::AllocatorConfig;
use crate::error::{AllocatorError, AllocatorResult};
use crate::slot::{Patient, SlotType, TimeSlot};
use crate::window::SearchWindow;

const TIMESTAMP_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// ISO-8601 local date-time, with `T` or a space between date and time.
fn de_timestamp<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(&s, fmt).ok())
        .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp '{s}'")))
}

// RECORDS

/// Slot size as written in the fixtures: minutes, or a free-form label.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SlotSize {
    Minutes(i64),
    Label(String),
}

impl fmt::Display for SlotSize {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SlotSize::Minutes(m) => write!(f, "{m}"),
            SlotSize::Label(s) => write!(f, "{s}"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SlotTypeRecord {
    pub id: Uuid,
    pub name: String,
    pub slot_size: SlotSize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PatientRecord {
    pub firstname: String,
    pub lastname: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TimeslotRecord {
    #[serde(deserialize_with = "de_timestamp")]
    pub start: NaiveDateTime,
    #[serde(deserialize_with = "de_timestamp")]
    pub end: NaiveDateTime,
    pub type_id: Uuid,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppointmentRecord {
    #[serde(deserialize_with = "de_timestamp")]
    pub start: NaiveDateTime,
    #[serde(deserialize_with = "de_timestamp")]
    pub end: NaiveDateTime,
    pub patient_id: Uuid,
}

/// Contents of one calendar fixture file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CalendarRecord {
    #[serde(default)]
    pub patient_meta: HashMap<Uuid, PatientRecord>,
    #[serde(default)]
    pub timeslots: Vec<TimeslotRecord>,
    #[serde(default)]
    pub appointments: Vec<AppointmentRecord>,
}

fn read_json<T: for<'de> Deserialize<'de>>(path: &Path) -> AllocatorResult<T> {
    let content = std::fs::read_to_string(path)?;
    serde_json::from_str(&content)
        .map_err(|e| AllocatorError::Fixture(format!("{}: {e}", path.display())))
}

// REGISTRY

/// Search parameters shared by every calendar in one lookup.
#[derive(Debug, Clone, Default)]
pub struct AvailabilityQuery {
    pub from: Option<NaiveDateTime>,
    pub to: Option<NaiveDateTime>,
    /// Restrict to one slot type; `None` matches every type.
    pub slot_type: Option<Uuid>,
    /// Minimum slot length in minutes.
    pub duration: i64,
}

/// Loaded slot types, patients and calendars, addressed by id.
#[derive(Debug, Default)]
pub struct Registry {
    slot_types: HashMap<Uuid, SlotType>,
    patients: HashMap<Uuid, Patient>,
    calendars: Vec<Calendar>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the slot types and every calendar named in `config`.
    pub fn load(config: &AllocatorConfig) -> AllocatorResult<Self> {
        let mut registry = Registry::new();
        registry.load_slot_types(&config.slot_types_path())?;

        for source in &config.calendars {
            let path = config.calendar_path(source);
            registry.load_calendar(&path, source.uuid()?, &source.name)?;
        }

        Ok(registry)
    }

    pub fn load_slot_types(&mut self, path: &Path) -> AllocatorResult<usize> {
        let records: Vec<SlotTypeRecord> = read_json(path)?;
        Ok(self.add_slot_types(records))
    }

    /// Register slot types; ids already known are skipped. Returns how many were added.
    pub fn add_slot_types(&mut self, records: Vec<SlotTypeRecord>) -> usize {
        let mut added = 0;
        for record in records {
            if self.slot_types.contains_key(&record.id) {
                debug!(id = %record.id, "skipping duplicate slot type");
                continue;
            }
            let name = format!("{} ({})", record.name, record.slot_size);
            self.slot_types.insert(record.id, SlotType::new(record.id, name));
            added += 1;
        }
        added
    }

    pub fn load_calendar(&mut self, path: &Path, id: Uuid, name: &str) -> AllocatorResult<&Calendar> {
        let record: CalendarRecord = read_json(path)?;
        self.add_calendar(record, id, name)
    }

    /// Build a calendar from its fixture record and register it, replacing
    /// any calendar already loaded under the same id.
    pub fn add_calendar(
        &mut self,
        record: CalendarRecord,
        id: Uuid,
        name: &str,
    ) -> AllocatorResult<&Calendar> {
        // Patients new to the registry are only committed once the replay succeeds.
        let new_patients: HashMap<Uuid, Patient> = record
            .patient_meta
            .iter()
            .filter(|(patient_id, _)| !self.patients.contains_key(*patient_id))
            .map(|(&patient_id, patient)| {
                let name = format!("{} {}", patient.firstname, patient.lastname);
                (patient_id, Patient::new(patient_id, name))
            })
            .collect();

        let mut calendar = Calendar::new(id, name);
        for slot in &record.timeslots {
            let slot_type = self.slot_type(slot.type_id)?;
            calendar.allocate_time(slot.start, slot.end, slot_type)?;
        }
        for appointment in &record.appointments {
            let patient = match new_patients.get(&appointment.patient_id) {
                Some(patient) => patient,
                None => self.patient(appointment.patient_id)?,
            };
            calendar.set_appointment(appointment.start, appointment.end, patient)?;
        }

        self.patients.extend(new_patients);

        info!(
            calendar = %id,
            calendar_name = name,
            slots = calendar.len(),
            appointments = record.appointments.len(),
            "loaded calendar"
        );

        let index = match self.calendars.iter().position(|c| c.id() == id) {
            Some(index) => {
                self.calendars[index] = calendar;
                index
            }
            None => {
                self.calendars.push(calendar);
                self.calendars.len() - 1
            }
        };
        Ok(&self.calendars[index])
    }

    /// Loaded calendars in load order.
    pub fn calendars(&self) -> &[Calendar] {
        &self.calendars
    }

    pub fn calendar(&self, id: Uuid) -> AllocatorResult<&Calendar> {
        self.calendars
            .iter()
            .find(|c| c.id() == id)
            .ok_or_else(|| AllocatorError::unknown("calendar", id))
    }

    pub fn slot_type(&self, id: Uuid) -> AllocatorResult<&SlotType> {
        self.slot_types
            .get(&id)
            .ok_or_else(|| AllocatorError::unknown("slot type", id))
    }

    /// All slot types, sorted by name.
    pub fn slot_types(&self) -> Vec<&SlotType> {
        let mut types: Vec<_> = self.slot_types.values().collect();
        types.sort_by(|a, b| a.name.cmp(&b.name));
        types
    }

    pub fn patient(&self, id: Uuid) -> AllocatorResult<&Patient> {
        self.patients
            .get(&id)
            .ok_or_else(|| AllocatorError::unknown("patient", id))
    }

    /// Run `query` against each calendar in `calendar_ids`, in the given order.
    /// Repeated ids are searched once, at their first position.
    pub fn find_available_time(
        &self,
        calendar_ids: &[Uuid],
        query: &AvailabilityQuery,
    ) -> AllocatorResult<Vec<(&Calendar, Vec<&TimeSlot>)>> {
        self.search_at(calendar_ids, query, Local::now().naive_local())
    }

    fn search_at(
        &self,
        calendar_ids: &[Uuid],
        query: &AvailabilityQuery,
        now: NaiveDateTime,
    ) -> AllocatorResult<Vec<(&Calendar, Vec<&TimeSlot>)>> {
        let slot_type = query.slot_type.map(|id| self.slot_type(id)).transpose()?;
        let window = SearchWindow::resolve(query.from, query.to, now)?;

        let mut seen = HashSet::new();
        calendar_ids
            .iter()
            .filter(|&&id| seen.insert(id))
            .map(|&id| {
                let calendar = self.calendar(id)?;
                let slots = window
                    .map(|window| calendar.available_in(window, slot_type, query.duration))
                    .unwrap_or_default();
                Ok((calendar, slots))
            })
            .collect()
    }
}
