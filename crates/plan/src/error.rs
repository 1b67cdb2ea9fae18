use bitewise_api::ApiError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlanError {
    #[error("Plan request failed: {0}")]
    Api(#[from] ApiError),
}

impl PlanError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, PlanError::Api(ApiError::Unauthorized))
    }
}
