#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! Core types for the Malga payments SDK.
//!
//! This crate holds the wire types of the Malga API and the charge
//! normalization pipeline. It performs no I/O on its own: remote card and
//! customer operations go through the [`service`] traits, which the
//! `malga-http` crate implements over HTTP.
//!
//! # Overview
//!
//! A charge request is polymorphic. It targets a merchant or a payment
//! session, supplies its customer inline, by id or not at all, and pays with
//! one of six methods (credit, voucher, pix, boleto, drip, nupay). The
//! [`charge::ChargePayloadBuilder`] runs it through an ordered chain of
//! handlers and returns the single canonical body the charge endpoint
//! expects, creating customers and cards on the way when the method needs
//! them.
//!
//! # Modules
//!
//! - [`card`] - Card, token and zero-dollar types
//! - [`charge`] - Charge requests, the handler chain and charge resources
//! - [`customer`] - Customer types
//! - [`error`] - API and SDK error types
//! - [`pagination`] - List parameters and paged responses
//! - [`service`] - Collaborator traits used by the pipeline
//!
//! # Feature Flags
//!
//! - `telemetry` - Enables tracing of handler steps and side effects

pub mod card;
pub mod charge;
pub mod customer;
pub mod error;
pub mod pagination;
pub mod service;

#[cfg(test)]
mod testing;

pub use error::{ApiError, MalgaError};
