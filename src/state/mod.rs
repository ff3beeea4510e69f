pub mod filter;
pub mod reconcile;
pub mod view;

pub use filter::FilterState;
pub use view::{Msg, Remote, ViewState};
