pub mod dashboard;
pub mod menu;
pub mod typing_area;
