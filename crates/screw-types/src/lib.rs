pub mod form;
pub mod modes;
pub mod preset;
pub mod units;

pub use form::*;
pub use modes::*;
pub use preset::*;
pub use units::*;
