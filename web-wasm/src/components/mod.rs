pub mod analyze_button;
pub mod header;
pub mod preview;
pub mod result_card;
pub mod upload_area;
