//! Generation domain
//!
//! A [`Renderer`] owns the model and a [`Dispatcher`] mapping file names to
//! [`FileGenerator`]s. Raw output from either strategy goes through the
//! [`formatter`] before it is recorded in a [`Response`].

pub mod adapters;
pub mod dispatcher;
pub mod errors;
pub mod formatter;
pub mod renderer;
pub mod response;
pub mod traits;

pub use adapters::*;
pub use dispatcher::Dispatcher;
pub use errors::*;
pub use renderer::Renderer;
pub use response::{GeneratedFile, Response};
pub use traits::*;
