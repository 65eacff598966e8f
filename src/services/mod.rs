//! Business logic services for MoneyTrack

pub mod accounting;

pub use accounting::AccountingService;
