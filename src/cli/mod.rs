/*
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Command line interface, organized by subcommand (spec §A: a thin driver
//! over the library's I/O and random-generation entry points, not an
//! algorithm harness).

pub mod convert;
pub mod generate;
pub mod inspect;
