//! Carts Entity Module

pub mod cart;
