pub mod format;
pub mod record;
pub mod sort_key;
pub mod view;
