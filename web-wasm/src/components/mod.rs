pub mod header;
pub mod history_panel;
pub mod identity_fields;
pub mod upload_area;
