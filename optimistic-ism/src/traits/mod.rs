pub use clock::*;
pub use ism::*;

mod clock;
mod ism;
