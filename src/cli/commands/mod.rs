mod due;
mod enroll;
mod fetch;
mod list;
mod migrate;
mod remove;
mod show;
mod status;

pub use due::cmd_due;
pub use enroll::cmd_enroll;
pub use fetch::cmd_fetch;
pub use list::cmd_list_subjects;
pub use migrate::cmd_migrate;
pub use remove::cmd_remove_subject;
pub use show::cmd_show_subject;
pub use status::{cmd_lock_status, cmd_status};
