//! Shared utilities (macros must be declared before the modules that use them)

#[macro_use]
pub mod console;
