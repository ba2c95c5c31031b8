pub mod error;
pub mod registry;
pub mod spec;
pub mod traits;

pub use self::spec::{
    Specification,
    Statement,
    Status,
    Transition,
};
