use crate::error::{ValidationError, Violation};

/// Collects violations while the rules walk a job document.
///
/// The collector tracks where it is (`$.operations[0].create`) so rules only name
/// the field they are checking.
pub(crate) struct Validator {
    path: String,
    violations: Vec<Violation>,
}

impl Validator {
    pub(crate) fn new() -> Self {
        Self {
            path: "$".to_string(),
            violations: Vec::new(),
        }
    }

    /// Run `check` one object key deeper.
    pub(crate) fn field<R>(&mut self, name: &str, check: impl FnOnce(&mut Self) -> R) -> R {
        self.scoped(&format!(".{name}"), check)
    }

    /// Run `check` one array element deeper.
    pub(crate) fn index<R>(&mut self, idx: usize, check: impl FnOnce(&mut Self) -> R) -> R {
        self.scoped(&format!("[{idx}]"), check)
    }

    fn scoped<R>(&mut self, segment: &str, check: impl FnOnce(&mut Self) -> R) -> R {
        let depth = self.path.len();
        self.path.push_str(segment);
        let out = check(self);
        self.path.truncate(depth);
        out
    }

    /// Record a violation at the current location.
    pub(crate) fn report(&mut self, message: impl Into<String>) {
        self.violations.push(Violation::new(self.path.clone(), message));
    }

    pub(crate) fn finish(self) -> Result<(), ValidationError> {
        if self.violations.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::new(self.violations))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Validator;

    #[test]
    fn scopes_unwind_after_each_check() {
        let mut v = Validator::new();
        v.field("operations", |v| {
            v.index(2, |v| v.field("create", |v| v.report("bad")));
            v.report("also bad");
        });
        v.report("root");

        let paths: Vec<String> = v
            .finish()
            .unwrap_err()
            .violations
            .into_iter()
            .map(|violation| violation.path)
            .collect();
        assert_eq!(paths, ["$.operations[2].create", "$.operations", "$"]);
    }
}
