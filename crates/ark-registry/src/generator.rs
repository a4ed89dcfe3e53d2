//! Name and qualifier generation.
//!
//! The generator produces random candidates of the configured shape and
//! asks the allocation store to reserve them. All uniqueness enforcement
//! lives in the store; this module only supplies candidates and retries,
//! bounded by a fixed attempt budget rather than wall-clock time.

use std::sync::Arc;

use rand::rngs::OsRng;
use rand::Rng;
use tracing::debug;

use ark_registry_core::{Naan, NameShape, BODY_ALPHABET};
use ark_registry_store::AllocationStore;

use crate::error::GeneratorError;

/// Configuration for the generator.
///
/// Explicit state handed to the constructor; there is no process-wide
/// registry of shapes or attempt budgets.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Shape of minted names and qualifiers.
    pub shape: NameShape,
    /// Candidate attempts before giving up with
    /// [`GeneratorError::AllocationExhausted`].
    pub max_attempts: u32,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            shape: NameShape::default(),
            max_attempts: 20,
        }
    }
}

/// Randomized, bounded-retry candidate generator over an allocation store.
pub struct ArkGenerator<S> {
    store: Arc<S>,
    config: GeneratorConfig,
}

impl<S: AllocationStore> ArkGenerator<S> {
    /// Create a generator over the given store.
    pub fn new(store: Arc<S>, config: GeneratorConfig) -> Self {
        Self { store, config }
    }

    /// The generator's configuration.
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Mint and reserve a fresh name under an authority.
    ///
    /// Produces `prefix + random body + control character` candidates until
    /// one reserves, or the attempt budget runs out.
    pub async fn generate_name(&self, naan: Naan) -> Result<String, GeneratorError> {
        for attempt in 1..=self.config.max_attempts {
            let name = self.candidate_name();
            if self
                .store
                .reserve(naan, &name, None)
                .await?
                .is_reserved()
            {
                return Ok(name);
            }
            debug!(%naan, attempt, name, "name candidate collided, retrying");
        }
        Err(GeneratorError::AllocationExhausted {
            naan,
            attempts: self.config.max_attempts,
        })
    }

    /// Mint and reserve a qualifier extending an already-assigned parent
    /// name.
    ///
    /// The qualifier is only reserved jointly with the parent's name;
    /// qualifiers are not globally unique on their own.
    pub async fn generate_qualifier(
        &self,
        naan: Naan,
        name: &str,
    ) -> Result<String, GeneratorError> {
        for attempt in 1..=self.config.max_attempts {
            let qualifier = random_body(self.config.shape.qualifier_length);
            if self
                .store
                .reserve(naan, name, Some(&qualifier))
                .await?
                .is_reserved()
            {
                return Ok(qualifier);
            }
            debug!(%naan, attempt, name, qualifier, "qualifier candidate collided, retrying");
        }
        Err(GeneratorError::AllocationExhausted {
            naan,
            attempts: self.config.max_attempts,
        })
    }

    fn candidate_name(&self) -> String {
        let shape = &self.config.shape;
        let mut name = String::with_capacity(shape.name_length());
        name.push_str(&shape.prefix);
        name.push_str(&random_body(shape.body_length));
        name.push(shape.control_char);
        name
    }
}

/// Random lowercase-alphanumeric string from the OS entropy source.
///
/// Collision avoidance under concurrent load is the only requirement, not
/// unpredictability.
fn random_body(length: usize) -> String {
    let mut rng = OsRng;
    (0..length)
        .map(|_| BODY_ALPHABET[rng.gen_range(0..BODY_ALPHABET.len())] as char)
        .collect()
}
