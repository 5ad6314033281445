//! Products Entity Module

pub mod product;
