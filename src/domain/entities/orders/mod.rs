//! Orders Entity Module

pub mod order;
