//! Case runner: one group per function, one case per dataset entry

use std::sync::Arc;

use futures_util::FutureExt;

use crate::expect::evaluate;
use crate::graph::{Completion, Delivery, Function, TestCase, Wrapper};
use crate::runner::{CaseFailure, Registry};

/// Group label for a function at `namespace`
pub fn group_label(namespace: &str) -> String {
    format!("#{namespace}()")
}

/// Register the group for `function` and a case for each entry of `cases`
///
/// Invocation is deferred: each case body calls `wrapper` only when the
/// runner executes it.
pub fn run(
    registry: &mut dyn Registry,
    namespace: &str,
    cases: &[TestCase],
    function: &Function,
    wrapper: Arc<dyn Wrapper>,
) {
    registry.register_group(&group_label(namespace), &mut |registry: &mut dyn Registry| {
        for case in cases {
            tracing::trace!(namespace, case = %case.label, "registering case");

            let case = case.clone();
            let function = function.clone();
            let wrapper = Arc::clone(&wrapper);
            let label = case.label.clone();

            registry.register_case(
                &label,
                Box::new(move || {
                    async move {
                        let (done, result) = Completion::channel();
                        wrapper.invoke(&function, &case, done);
                        let value = match result.await {
                            Ok(Delivery::Value(value)) => value,
                            Ok(Delivery::Panicked(message)) => {
                                return Err(CaseFailure::Panicked(message))
                            }
                            Err(_) => return Err(CaseFailure::Abandoned),
                        };
                        evaluate(&value, &case.result)?;
                        Ok::<(), CaseFailure>(())
                    }
                    .boxed()
                }),
            );
        }
    });
}
