pub mod caretakers;
pub mod fieldlog;
pub mod monitoring;
