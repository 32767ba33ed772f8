//! Kitchen queue projection
//!
//! Pure read-side view over open orders: no storage access, no mutation.
//! The HTTP handler feeds it a consistent snapshot and the projection turns
//! it into tickets with elapsed-time urgency bands.

pub mod projection;

pub use projection::{PendingTicket, TicketItem, TimeBand, build};
