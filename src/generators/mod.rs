//! Programmatic generators
//!
//! Files whose structure follows the model too closely to express as a
//! template are built here with `quote`. Each generator emits raw token
//! text; formatting happens later in the normalizer.

pub(crate) mod common;
pub mod client;
pub mod provider;
pub mod server;
pub mod type_map;
pub mod types;

use crate::generation::GenerationError;
use crate::model::ServiceModel;

pub const CLIENT_FILE: &str = "client.rs";
pub const TYPES_FILE: &str = "types.rs";
pub const PROVIDER_FILE: &str = "provider.rs";
pub const SERVER_FILE: &str = "server.rs";

/// Signature shared by the built-in generators
pub type GeneratorFn = fn(&ServiceModel) -> Result<Vec<u8>, GenerationError>;

/// Reserved file names and the generators that own them
pub static BUILTIN_GENERATORS: [(&str, GeneratorFn); 4] = [
    (CLIENT_FILE, client::generate_client),
    (TYPES_FILE, types::generate_types),
    (PROVIDER_FILE, provider::generate_provider),
    (SERVER_FILE, server::generate_server),
];

pub use client::generate_client;
pub use provider::generate_provider;
pub use server::generate_server;
pub use types::generate_types;
