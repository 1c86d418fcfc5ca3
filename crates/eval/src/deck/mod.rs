// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Deck combinations.
//!
//! [Combinations] enumerates the k-subsets of the positions `0..n` and [Draws]
//! uses it to fill the open slots of a [Hand](crate::Hand) with every
//! combination of the undealt deck cards.
mod draws;
pub use draws::{Combinations, Draws, nck};
