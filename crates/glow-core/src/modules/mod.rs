pub mod driver;
pub mod indices;
pub mod output;
pub mod toolchain;
