//! Expectation engine for funcmock.
//!
//! A [`Mock`] holds expectations registered with [`Mock::on`], answers calls
//! through [`Mock::method_called`], and records every answered call for the
//! assertion methods. Failures go to a [`Reporter`].

mod arguments;
mod call;
mod error;
mod matcher;
mod mock;
mod reporter;
mod test_data;

pub use arguments::Arguments;
pub use call::Call;
pub use error::MockError;
pub use matcher::{IntoMatcher, IntoMatchers, Matcher, any, eq, matched_by, of_type};
pub use mock::{CallRecord, Mock, TestDataGuard};
pub use reporter::{Panicking, Reporter};
pub use test_data::TestData;
