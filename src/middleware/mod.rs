// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Middleware modules (session cookie handling).

pub mod cookies;
pub mod session;

pub use session::require_session;
