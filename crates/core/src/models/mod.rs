pub mod chart;
pub mod index;
pub mod outcome;
pub mod price;
pub mod settings;
