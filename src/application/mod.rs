pub mod drafts;
pub mod error;
pub mod listing;
pub mod pages;
pub mod posts;
pub mod repos;
pub mod viewing;
