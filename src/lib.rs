//! Staff roster account audit
//!
//! This crate checks a staff spreadsheet for employees whose mail, source
//! control or wiki accounts are still active after their employment ended,
//! honouring a grace period and per-person exceptions. It also renders the
//! roster as a staff list and publishes it to a wiki page.

#![warn(missing_docs)]

pub mod checks;
pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod publish;
pub mod remote;
pub mod workbook;
