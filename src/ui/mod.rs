pub mod panels;
pub mod plot;
pub mod ratio;
pub mod table;
