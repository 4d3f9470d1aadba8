pub mod posters;
pub mod presentation;
pub mod recommendations;
