//! Route handlers

pub mod jwt;
