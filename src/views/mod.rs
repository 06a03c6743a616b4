//! The three panes: collection list, request editor and response viewer

pub mod collection;
pub mod request;
pub mod response;

pub use collection::CollectionView;
pub use request::RequestView;
pub use response::ResponseView;
