//! Recipe-inputs port.

use async_trait::async_trait;

use super::identity::ClientIdentity;
use crate::domain::{NormalizedRecipe, RecipeInputs};
use crate::error::Result;

/// Looks up the parts a fabricator consumes.
#[async_trait]
pub trait RecipeInputsSource: Send + Sync {
    /// Fetch the inputs for `recipe`, presenting as `identity`.
    ///
    /// A page that loads but carries no inputs is an error so the caller
    /// retries it.
    async fn fetch_inputs(
        &self,
        recipe: &NormalizedRecipe,
        identity: &ClientIdentity,
    ) -> Result<RecipeInputs>;
}
