//
//  crud-sdk
//  logging/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/02/14.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! # Logging Collaborator
//!
//! The resilient facade reports swallowed failures through an injected
//! [`ContextLogger`] rather than a process-global sink, so tests can observe
//! exactly what would have been logged and hosts can route messages wherever
//! they like.
//!
//! [`TracingLogger`] is the shipped implementation: it forwards messages as
//! `tracing` events with the structured context rendered as a JSON field.
//! Installing a subscriber remains the host application's responsibility.

use std::collections::BTreeMap;

use serde_json::Value;

/// Structured logging interface consumed by the resilient facade.
///
/// The context map carries the operation's identifying details (`action`,
/// `entity`, `id`, submitted data, filter) in stable key order.
pub trait ContextLogger: Send + Sync {
    /// Reports a failure with its structured context.
    fn error(&self, message: &str, context: &BTreeMap<String, Value>);

    /// Reports an informational message with its structured context.
    fn info(&self, message: &str, context: &BTreeMap<String, Value>);
}

/// Forwards log calls as `tracing` events.
///
/// The context map is serialized to JSON and attached as the `context` field
/// of the event.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl ContextLogger for TracingLogger {
    fn error(&self, message: &str, context: &BTreeMap<String, Value>) {
        tracing::error!(context = %render(context), "{message}");
    }

    fn info(&self, message: &str, context: &BTreeMap<String, Value>) {
        tracing::info!(context = %render(context), "{message}");
    }
}

fn render(context: &BTreeMap<String, Value>) -> String {
    serde_json::to_string(context).unwrap_or_default()
}
