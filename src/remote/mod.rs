// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Noema-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Noema and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Remote service access: HTTP transport, request coordination, typed client.

mod client;
mod coordinator;
mod http;
pub mod wire;

pub use client::GraphClient;
pub use coordinator::{Coordinator, RequestError, RetryPolicy};
pub use http::{HttpTransport, RequestMethod, RequestSpec, Transport, TransportError};
