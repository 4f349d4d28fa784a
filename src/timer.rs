/*
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! The Timer collaborator (spec §6.5): the core only consumes "local
//! timestamp as string", used for DIMACS/MTX write headers. Built on `jiff`,
//! already part of the teacher's dependency stack for CLI timestamps.

use jiff::Zoned;

/// Renders the current local time as a short, human-readable timestamp
/// suitable for a `c` comment line in a DIMACS/MTX writer.
pub fn local_timestamp() -> String {
    Zoned::now().strftime("%Y-%m-%d %H:%M:%S %z").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamp_is_nonempty() {
        assert!(!local_timestamp().is_empty());
    }
}
