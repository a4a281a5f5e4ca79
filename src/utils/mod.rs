pub mod clock;
pub mod code_generator;
pub mod keyed_lock;
pub mod phone;

pub use clock::*;
pub use code_generator::*;
pub use keyed_lock::*;
pub use phone::*;
