//! Workbook access for the campaign folders and the summary workbook.

pub mod catalog;
pub mod error;
pub mod grid;
pub mod loader;
pub mod workbook;

pub use catalog::{list_advisors, list_campaign_folders, load_all_campaigns, load_fixed_campaigns};
pub use error::SheetError;
pub use loader::{find_campaign_file, load_campaign, read_first_sheet};
pub use workbook::load_summary_workbook;
