// Export foundational arithmetic operations directly
pub mod add;
pub mod sub;
pub mod mul;
pub mod div;
pub mod neg;
pub mod pow;

// Re-export the primary operation functions
pub use add::add_op;
pub use sub::sub_op;
pub use mul::mul_op;
pub use div::div_op;
pub use neg::neg_op;
pub use pow::pow_op;
