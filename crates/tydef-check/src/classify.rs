//! Value classification: which environment types a set of values share.
//!
//! Each value is classified independently, recursing into the children of
//! parametric types whose parameter is still `Unknown`. Per-value results
//! are then intersected, merging `Unknown` parameters with whatever the
//! other side knows (`Array ???` with `Array String` gives `Array String`).

use std::collections::BTreeSet;

use tydef_types::Type;
use tydef_value::Value;

/// Types every value belongs to, with no `Inconsistent` anywhere in them.
pub fn determine_types_strict(env: &[Type], values: &[Value]) -> Vec<Type> {
    let mut seen = BTreeSet::new();
    let mut types = determine(env, &mut seen, values);
    types.retain(Type::is_consistent);
    types
}

/// Types every value belongs to. Parameters may be `Inconsistent`
/// (displayed `???`); only a top-level `Inconsistent` is dropped.
pub fn determine_types_loose(env: &[Type], values: &[Value]) -> Vec<Type> {
    let mut seen = BTreeSet::new();
    let mut types = determine(env, &mut seen, values);
    types.retain(|t| !matches!(t, Type::Inconsistent));
    types
}

/// Core classifier. `seen` holds the identities of the reference values on
/// the current recursion path; meeting one again yields no types.
pub(crate) fn determine(env: &[Type], seen: &mut BTreeSet<usize>, values: &[Value]) -> Vec<Type> {
    if values.is_empty() {
        return vec![Type::Unknown];
    }

    let mut shared: Option<Vec<Type>> = None;
    for value in values {
        let types = classify_value(env, seen, value);
        shared = Some(match shared {
            None => types,
            Some(prev) => intersect(&prev, &types),
        });
    }

    let mut types = shared.unwrap_or_default();
    if types.is_empty() {
        return match common_foreign_identifier(values) {
            Some(identifier) => vec![Type::foreign(identifier)],
            None => vec![Type::Inconsistent],
        };
    }
    sort_by_environment(env, &mut types);
    types
}

/// Every environment type the value is a member of, parameterised as deeply
/// as its contents allow.
fn classify_value(env: &[Type], seen: &mut BTreeSet<usize>, value: &Value) -> Vec<Type> {
    let identity = value.identity();
    if let Some(id) = identity
        && !seen.insert(id)
    {
        return Vec::new();
    }

    let mut types = Vec::new();
    for ty in env {
        if ty.validate(value).is_ok() {
            for expanded in expand_unknown(env, seen, ty, value, 0) {
                push_unique(&mut types, expanded);
            }
        }
    }

    if let Some(id) = identity {
        seen.remove(&id);
    }
    types
}

/// Instantiate the `Unknown` parameters of `ty` from the value's children.
/// The trailing `keep` parameters are left as they are. Binary types yield
/// the cartesian product of their parameters' candidates.
pub(crate) fn expand_unknown(
    env: &[Type],
    seen: &mut BTreeSet<usize>,
    ty: &Type,
    value: &Value,
    keep: usize,
) -> Vec<Type> {
    let params = ty.params();
    if params.is_empty() {
        return vec![ty.clone()];
    }
    let open = params.len().saturating_sub(keep);

    let mut choices: Vec<Vec<Type>> = Vec::with_capacity(params.len());
    for (index, param) in params.iter().enumerate() {
        if index < open && matches!(param, Type::Unknown) {
            let children = ty.extract(index, value);
            choices.push(determine(env, seen, &children));
        } else {
            choices.push(vec![(*param).clone()]);
        }
    }

    cartesian(&choices)
        .into_iter()
        .map(|params| ty.with_params(params))
        .collect()
}

fn cartesian(choices: &[Vec<Type>]) -> Vec<Vec<Type>> {
    choices.iter().fold(vec![Vec::new()], |acc, options| {
        acc.iter()
            .flat_map(|prefix| {
                options.iter().map(move |option| {
                    let mut next = prefix.clone();
                    next.push(option.clone());
                    next
                })
            })
            .collect()
    })
}

/// Types present on both sides, merging compatible instantiations.
fn intersect(left: &[Type], right: &[Type]) -> Vec<Type> {
    let mut out = Vec::new();
    for a in left {
        for b in right {
            if let Some(merged) = merge(a, b) {
                push_unique(&mut out, merged);
            }
        }
    }
    out
}

/// The most specific type both `a` and `b` describe, treating `Unknown` as
/// the identity.
pub(crate) fn merge(a: &Type, b: &Type) -> Option<Type> {
    match (a, b) {
        (Type::Unknown, other) | (other, Type::Unknown) => Some(other.clone()),
        _ if a.arity() > 0 && a.same_constructor(b) => {
            let params = a
                .params()
                .into_iter()
                .zip(b.params())
                .map(|(p, q)| merge(p, q))
                .collect::<Option<Vec<_>>>()?;
            Some(a.with_params(params))
        }
        _ if a == b => Some(a.clone()),
        _ => None,
    }
}

/// The stable identifier all values share, if they are all tagged objects
/// with the same tag.
pub(crate) fn common_foreign_identifier(values: &[Value]) -> Option<String> {
    let (first, rest) = values.split_first()?;
    let identifier = first.foreign_identifier()?;
    rest.iter()
        .all(|v| v.foreign_identifier() == Some(identifier))
        .then(|| identifier.to_string())
}

fn push_unique(types: &mut Vec<Type>, ty: Type) {
    if !types.contains(&ty) {
        types.push(ty);
    }
}

/// Order by the environment position of each type's constructor, then by
/// display, so results do not depend on the order values were supplied in.
pub(crate) fn sort_by_environment(env: &[Type], types: &mut [Type]) {
    types.sort_by_cached_key(|t| {
        let rank = env
            .iter()
            .position(|e| e.same_constructor(t))
            .unwrap_or(env.len());
        (rank, t.format())
    });
}
