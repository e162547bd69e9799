//! # labhub-domain
//!
//! Pure domain model for the labhub laboratory instrument dashboard.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps
//! - Define the **field model** (named readout/input/dropdown fields that
//!   instruments expose for display and automation)
//! - Define **scripts**: ordered sequences of delayed automation steps,
//!   their tagged actions, and the queue-building delay accumulator
//! - Parse the restricted automation script language into commands
//! - Parse and render `H:M:S` durations
//! - Define **events**: records of automation activity
//! - Contain all invariant enforcement and domain logic
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO
//! crates. All IO boundaries are expressed as traits in the `app` crate
//! (ports).

pub mod error;
pub mod id;
pub mod time;

pub mod event;
pub mod hms;
pub mod instrument;
pub mod script;
