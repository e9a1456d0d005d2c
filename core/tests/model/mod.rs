// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Building, copying and reserializing component trees.

mod attach;
mod parameters;
mod roundtrip;
