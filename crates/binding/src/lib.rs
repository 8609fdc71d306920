//! Contract bindings for the token contract read by the dApp.
//!
//! Only the read-only metadata surface is bound: the reader never submits
//! transactions, so the interface stays at the three view functions it calls.
//!
//! All bindings are generated using alloy's `sol!` macro.

pub mod token;
