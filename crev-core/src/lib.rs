#![doc = "crev-core: core pipeline library for crev."]

//! This crate walks a project tree, filters it, loads file contents concurrently
//! and renders everything into one flattened text bundle for code review.
//! Remote review transport is not included here: the CLI crate provides a
//! concrete [`contract::Reviewer`].
//!
//! # Usage
//! Build a [`config::BundleConfig`] and hand it to [`bundle::build_bundle`], or
//! call the individual stages (`walk`, `load`, `render`, `bundle`) directly.

pub mod bundle;
pub mod config;
pub mod contract;
pub mod filter;
pub mod load;
pub mod render;
pub mod review;
pub mod walk;
pub mod write;
