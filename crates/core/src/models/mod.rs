pub mod insurance;
pub mod investment;
pub mod loan;
pub mod portfolio;
pub mod settings;
