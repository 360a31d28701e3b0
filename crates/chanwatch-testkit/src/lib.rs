//! # Chanwatch Testkit
//!
//! Testing utilities for chanwatch.
//!
//! ## Overview
//!
//! - **Fixtures**: databases over either backend, pre-seeded if needed
//! - **Generators**: Proptest strategies for ids, records and operation scripts
//!
//! ## Test Fixtures
//!
//! ```rust
//! use chanwatch_testkit::fixtures::Backend;
//!
//! for backend in Backend::ALL {
//!     let fixture = backend.fixture();
//!     let _db = &fixture.db;
//! }
//! ```

pub mod fixtures;
pub mod generators;

pub use fixtures::{Backend, Fixture};
pub use generators::{ChannelParams, IdRepr, UserOp};
