mod pager;
mod policy_table;
mod search_box;
mod status_bar;

pub use pager::Pager;
pub use policy_table::PolicyTable;
pub use search_box::SearchBox;
pub use status_bar::StatusBar;
