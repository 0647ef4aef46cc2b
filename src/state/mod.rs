pub mod conversation;
pub mod records;
pub mod route;
pub mod selection;
pub mod toast;
pub mod widget;
