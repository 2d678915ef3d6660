mod catalog;
mod dispatch;
mod viewer;

pub(crate) use dispatch::send;
pub use dispatch::spawn_worker;
