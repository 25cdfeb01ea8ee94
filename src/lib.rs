//! Hireflow - AI-evaluated structured interview platform
//!
//! This crate implements the interview session lifecycle: question
//! generation, per-answer evaluation, progress navigation, integrity
//! signal accumulation, and final report synthesis, all driven by an
//! external reasoning service treated as an unreliable black box.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
