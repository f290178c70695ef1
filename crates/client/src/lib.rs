//! Client library for the shipment profit tracker.
//!
//! Wraps the backend's REST surface, validates user input before it reaches
//! the network and keeps the user-facing notification list. The view-models
//! in [`views`] sequence those pieces for a front-end.

pub mod cancel;
pub mod client;
pub mod error;
pub mod notification;
pub mod routes;
pub mod validation;
pub mod views;

pub use cancel::CancellationToken;
pub use client::{Client, ProfitApi};
pub use error::{ClientError, Result};
pub use notification::{Notification, NotificationCenter, NotificationKind, Notifier};
pub use routes::Route;
pub use validation::ValidationResult;
