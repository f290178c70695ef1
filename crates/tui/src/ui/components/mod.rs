pub mod hints;
pub mod money;
pub mod notifications;
