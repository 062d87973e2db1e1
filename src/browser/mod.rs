mod client;
mod form;
mod view;

pub use client::GameClient;
pub use form::GameForm;
pub use view::*;
