pub mod decision;
pub mod notification;
pub mod user_profile;
pub mod waiting_list_entry;
