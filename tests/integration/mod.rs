//! Integration tests module
//!
//! Organized by component, plus end-to-end scenarios.

mod events_test;
mod moderation_test;
mod translation_test;
