#![no_std]

pub mod asset;
pub mod rgb565;

extern crate alloc;
