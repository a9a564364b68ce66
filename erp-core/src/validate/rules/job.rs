use crate::types::JobDocument;
use crate::validate::rules::operation::check_operation;
use crate::validate::validator::Validator;

pub(crate) fn check_job(v: &mut Validator, job: &JobDocument) {
    if let Some(state) = &job.state {
        if !(state.is_object() || state.is_null()) {
            v.field("state", |v| v.report("must be an object"));
        }
    }

    v.field("operations", |v| {
        if job.operations.is_empty() {
            v.report("must contain at least one operation");
        }
        for (idx, op) in job.operations.iter().enumerate() {
            v.index(idx, |v| check_operation(v, op));
        }
    });
}
