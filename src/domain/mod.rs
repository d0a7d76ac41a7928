pub mod cart;
pub mod catalog;
pub mod form;
pub mod order;

pub use cart::*;
pub use catalog::*;
pub use form::*;
pub use order::*;
