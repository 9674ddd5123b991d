//! Testing utilities and harness for dragkit

pub mod assertions;
pub mod testing;

pub use assertions::*;
pub use testing::*;

pub mod prelude {
    pub use crate::assertions;
    pub use crate::testing::*;
    pub use dragkit_foundation::prelude::*;
}
