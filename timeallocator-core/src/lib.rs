//! Core types for timeallocator.
//!
//! This crate provides the per-calendar interval store and its surroundings:
//! - `Calendar`: allocate free time, book appointments, search availability
//! - `slot` module for slot types, patients, time slots and appointments
//! - `fixtures` module for loading calendars from JSON fixture files
//! - `config` module for locating fixture data

pub mod calendar;
pub mod config;
pub mod error;
pub mod fixtures;
pub mod slot;
pub mod window;

pub use calendar::Calendar;
pub use error::{AllocatorError, AllocatorResult};
pub use slot::*;
