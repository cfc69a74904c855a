//! Overload synthesis for optional parameters.
//!
//! Declaration files reject an optional parameter in front of a mandatory
//! one, while the source documentation allows it. A method is therefore split
//! into several signatures: each round drops the first offending optional
//! parameter into a reduced variant, then fixes that parameter as mandatory
//! and re-evaluates. The sequence ends with the full parameter list.
//!
//! For `f(a, b?, c, d?)` the variants are `f(a, c, d?)` and `f(a, b, c, d?)`.

use dtsgen_common::RawMethod;
use tracing::trace;

use crate::method::{MethodModel, SynthesisContext, SynthesisOptions};

/// Index of the first optional and of the last mandatory parameter, when
/// the first lies left of the last.
fn find_violation(optional: &[bool]) -> Option<(usize, usize)> {
    let first_optional = optional.iter().position(|&flag| flag)?;
    let last_mandatory = optional.iter().rposition(|&flag| !flag)?;
    (first_optional < last_mandatory).then_some((first_optional, last_mandatory))
}

pub fn synthesize_overloads(
    method: &RawMethod,
    context: &SynthesisContext<'_>,
    options: SynthesisOptions,
) -> Vec<MethodModel> {
    if method.parameters.len() <= 1 {
        return vec![MethodModel::build(method, context, options)];
    }

    let mut working = method.clone();
    let mut optional: Vec<bool> = working.parameters.iter().map(|p| p.optional).collect();
    let mut variants = Vec::new();

    while let Some((first_optional, last_mandatory)) = find_violation(&optional) {
        for parameter in &mut working.parameters[..last_mandatory] {
            parameter.optional = false;
        }
        let removed = working.parameters.remove(first_optional);
        trace!(
            method = %method.name,
            dropped = %removed.name,
            "synthesizing reduced overload"
        );
        variants.push(MethodModel::build(&working, context, options));
        working.parameters.insert(first_optional, removed);

        for (parameter, &flag) in working.parameters.iter_mut().zip(&optional) {
            parameter.optional = flag;
        }
        working.parameters[first_optional].optional = false;
        optional = working.parameters.iter().map(|p| p.optional).collect();
    }

    variants.push(MethodModel::build(&working, context, options));
    variants
}
