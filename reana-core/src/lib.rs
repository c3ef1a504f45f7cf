//! REANA Core
//!
//! Core types shared by the job-controller client and the executor.
//!
//! This crate contains:
//! - Domain types: job descriptors, submitted jobs, remote and local statuses,
//!   workflow run statuses and progress messages
//! - DTOs: request/response bodies for the job controller and the
//!   workflow-status events sent to the event channel

pub mod domain;
pub mod dto;
