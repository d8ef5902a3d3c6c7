//! # Builders
//!
//! Builder-style configuration for the stream decorators.
//!
//! ## Modules
//!
//! - [`stream_options`] - chunk size and source length hint for [`crate::stream`] readers

pub mod stream_options;

pub use stream_options::StreamOptions;
