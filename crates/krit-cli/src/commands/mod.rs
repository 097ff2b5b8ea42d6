pub mod bidders;
pub mod dispatch;
pub mod event;
pub mod list;
pub mod schema;
pub mod shared;
pub mod show;
pub mod sync;
