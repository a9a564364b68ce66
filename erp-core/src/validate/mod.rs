mod rules;
mod validator;

use crate::error::ValidationError;
use crate::types::JobDocument;
use validator::Validator;

pub trait Validate {
    fn validate(&self) -> Result<(), ValidationError>;
}

impl Validate for JobDocument {
    fn validate(&self) -> Result<(), ValidationError> {
        validate_job(self)
    }
}

pub fn validate_job(job: &JobDocument) -> Result<(), ValidationError> {
    let mut v = Validator::new();
    rules::job::check_job(&mut v, job);
    v.finish()
}
