// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Noema-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Noema and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Noema — knowledge-graph client core (normalize + session + local stores).
//!
//! This crate keeps a single-crate layout; host frontends link against it directly.

pub mod model;
pub mod normalize;
pub mod ops;
pub mod query;
pub mod remote;
pub mod session;
pub mod store;
pub mod style;
pub mod surface;
