//! Collection Module
//!
//! In-memory set of employee records.
//!
//! ## Responsibilities
//! - Keep records in collection order (snapshot order, then insertion order)
//! - Enforce id uniqueness on load and insert
//! - Answer the fixed read queries (active by surname, report names, hire range)
//!
//! ## Data Structure Choice
//! A `Vec<Employee>` plus a `HashMap<EmployeeId, usize>` position index:
//! - The Vec carries collection order, which the queries use as tie-break
//! - The index gives O(1) id lookup for uniqueness checks and report names
//!
//! `Collection` itself is not synchronized. The store shares it behind an
//! `Arc` and replaces it wholesale on every committed mutation.

mod query;
mod table;

pub use table::Collection;
