//! Built-in scalar modules.

pub mod math;
pub mod string;

pub use math::math_functions;
pub use string::string_functions;
