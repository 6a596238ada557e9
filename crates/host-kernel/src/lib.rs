pub mod mock_kernel;
pub mod traits;
pub mod types;

pub use mock_kernel::{HelixConvention, MockKernel, MockOp, ShaftFixture, ShaftSpec};
pub use traits::*;
pub use types::*;
