//! Reasons a call cannot be answered.

use thiserror::Error;

use crate::arguments::Arguments;

/// Why `Mock::method_called` found no expectation to answer a call.
///
/// The `Display` text is what gets reported to the bound reporter.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MockError {
    /// Nothing was registered for the method at all.
    #[error(
        "funcmock: no expectation for this call, so there is nothing to return\n\t{method}({arguments})\n\nRegister one with on(...).returns(...)"
    )]
    Unexpected {
        method: String,
        arguments: Arguments,
    },

    /// A matching expectation exists but its call budget is used up.
    #[error(
        "funcmock: {method} has already been called {times} time(s)\n\tRegister another on(...).returns(...) or remove the extra call:\n\t\t{method}({arguments})"
    )]
    Exhausted {
        method: String,
        arguments: Arguments,
        times: usize,
    },

    /// Expectations exist for the method but none matches the arguments.
    #[error(
        "funcmock: unexpected call\n\n{method}({arguments})\n\nclosest expectation:\n\n{method}({closest})\n\n{diff}"
    )]
    Mismatch {
        method: String,
        arguments: Arguments,
        closest: String,
        diff: String,
    },
}
