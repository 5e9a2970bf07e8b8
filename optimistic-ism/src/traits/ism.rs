use std::fmt::Debug;

use async_trait::async_trait;
use auto_impl::auto_impl;

use primitive_types::H256;

use crate::{IsmResult, ModuleType};

/// Interface for a pluggable verification submodule. Allows abstraction
/// over the mechanism a module uses to decide message authenticity.
#[async_trait]
#[auto_impl(&, Box, Arc)]
pub trait InterchainSecurityModule: Send + Sync + Debug {
    /// Return the stable identity of this submodule. Used as the
    /// fraud-registry key.
    fn address(&self) -> H256;

    /// Return the kind of verification this module performs.
    fn module_type(&self) -> ModuleType;

    /// Returns true if the metadata proves the authenticity of the message.
    async fn verify(&self, metadata: &[u8], message: &[u8]) -> IsmResult<bool>;
}
