pub mod analytics;
pub mod bank_list;
pub mod dashboard;
pub mod forge;
pub mod menu;
pub mod progress_bar;
pub mod question_card;
pub mod session_summary;
pub mod settings;
