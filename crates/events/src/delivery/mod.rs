//! External delivery channels for notification records.

pub mod email;
