//! Payments Entity Module

pub mod payment;
