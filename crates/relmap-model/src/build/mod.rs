use crate::{Error, error::ErrorTree, node::Model, validate::validate_model};
use std::sync::{LazyLock, OnceLock, RwLock, RwLockReadGuard, RwLockWriteGuard};
use thiserror::Error as ThisError;

///
/// BuildError
///

#[derive(Debug, ThisError)]
pub enum BuildError {
    #[error("validation failed: {0}")]
    Validation(ErrorTree),
}

///
/// MODEL
/// the process-wide model instance
///

static MODEL: LazyLock<RwLock<Model>> = LazyLock::new(|| RwLock::new(Model::new()));

static MODEL_VALIDATED: OnceLock<()> = OnceLock::new();

/// Acquire a write guard over the global model during the build phase.
pub fn model_write() -> RwLockWriteGuard<'static, Model> {
    MODEL
        .write()
        .expect("model RwLock poisoned while acquiring write lock")
}

// model_read
// just reads the model directly without validation
fn model_read() -> RwLockReadGuard<'static, Model> {
    MODEL
        .read()
        .expect("model RwLock poisoned while acquiring read lock")
}

/// Read the global model, validating it exactly once per process.
pub fn get_model() -> Result<RwLockReadGuard<'static, Model>, Error> {
    let model = model_read();
    validate(&model).map_err(BuildError::Validation)?;

    Ok(model)
}

// validate
fn validate(model: &Model) -> Result<(), ErrorTree> {
    if MODEL_VALIDATED.get().is_some() {
        return Ok(());
    }

    validate_model(model)?;

    MODEL_VALIDATED.set(()).ok();

    Ok(())
}

///
/// TESTS
///
