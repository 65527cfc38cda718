//! Structural tree algebra: merge, replace, delete, search, and
//! set-style operations over [`crate::tree::ConfigTree`].
//!
//! Consuming operations (`merge`, `replace`, `delete`,
//! `assign_template`) take their argument tree by value and splice its
//! content into the receiver; pure operations (`search`,
//! `intersection`, `difference`) borrow and work on internal copies.

mod delete;
mod merge;
mod search;
mod set;
