//! Travel Concierge - Chat-driven travel booking backend
//!
//! This crate turns free-text traveler messages into searches, bookings and
//! points operations against the travel Domain Services, and answers with
//! text plus rich content cards.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
