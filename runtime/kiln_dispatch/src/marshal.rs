//! Argument marshalling.
//!
//! The evaluator packs every call into one `Tuple`: field 0 is the receiver
//! and the remaining fields are the parameters. An indexed assignment packs
//! its index parameters and the assigned value together as a nested tuple:
//!
//! ```text
//! list.add(x)       => (list, x)
//! list[i]           => (list, i)
//! list[i] = x       => (list, (i, x))
//! ```
//!
//! [`CallArgs::unpack`] turns the packed value back into positional
//! arguments for a resolved signature. It performs no coercion; dispatch has
//! already checked the tags.

use smallvec::SmallVec;

use kiln_value::{arity_mismatch, type_mismatch, EvalError, SharedList, Value};

use crate::signature::{ShapeKind, Signature};

/// Pack a receiver and its parameters the way `unpack` expects.
///
/// For `IndexedAssign`, `args` holds the index parameters followed by the
/// assigned value.
pub fn pack_args(kind: ShapeKind, receiver: Value, args: Vec<Value>) -> Value {
    match kind {
        ShapeKind::IndexedAssign => Value::tuple(vec![receiver, Value::tuple(args)]),
        ShapeKind::Getter | ShapeKind::Method | ShapeKind::Indexer | ShapeKind::Operator => {
            let mut fields = Vec::with_capacity(args.len() + 1);
            fields.push(receiver);
            fields.extend(args);
            Value::tuple(fields)
        }
    }
}

/// Positional arguments for one native call.
#[derive(Clone, Debug)]
pub struct CallArgs {
    /// Call name for diagnostics (`add`, `[]`, `+`).
    name: Box<str>,
    receiver: Value,
    params: SmallVec<[Value; 4]>,
}

impl CallArgs {
    /// Build arguments directly, bypassing packing.
    pub fn new(name: &str, receiver: Value, params: impl IntoIterator<Item = Value>) -> Self {
        Self {
            name: name.into(),
            receiver,
            params: params.into_iter().collect(),
        }
    }

    /// Decompose a packed argument tuple for `signature`.
    ///
    /// Fails with `ArityMismatch` when the field count is not `1 + arity`.
    /// For indexed assignments the nested tuple is flattened first. A packed
    /// value that is not a tuple is a shape mismatch too.
    pub fn unpack(signature: &Signature, packed: &Value) -> Result<Self, EvalError> {
        let name = signature.call_name();
        let arity = signature.arity();
        // A bare value counts as a single field.
        let Some(fields) = packed.as_tuple() else {
            return Err(arity_mismatch(&name, arity + 1, 1));
        };

        let (receiver, params) = if signature.kind() == ShapeKind::IndexedAssign {
            let [receiver, nested] = fields else {
                return Err(arity_mismatch(&name, 2, fields.len()));
            };
            let Some(inner) = nested.as_tuple() else {
                return Err(arity_mismatch(&name, arity + 1, 2));
            };
            (receiver, inner)
        } else {
            let Some((receiver, params)) = fields.split_first() else {
                return Err(arity_mismatch(&name, arity + 1, 0));
            };
            (receiver, params)
        };

        if params.len() != arity {
            return Err(arity_mismatch(&name, arity + 1, params.len() + 1));
        }

        Ok(Self {
            name: name.into(),
            receiver: receiver.clone(),
            params: params.iter().cloned().collect(),
        })
    }

    /// Call name for diagnostics.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn receiver(&self) -> &Value {
        &self.receiver
    }

    pub fn params(&self) -> &[Value] {
        &self.params
    }

    /// Parameter at `index`.
    pub fn param(&self, index: usize) -> Result<&Value, EvalError> {
        self.params
            .get(index)
            .ok_or_else(|| arity_mismatch(&self.name, index + 2, self.params.len() + 1))
    }

    /// The receiver as a list.
    pub fn receiver_list(&self) -> Result<&SharedList, EvalError> {
        self.receiver
            .as_list()
            .ok_or_else(|| type_mismatch("List", self.receiver.tag()))
    }

    /// The receiver as a string.
    pub fn receiver_str(&self) -> Result<&str, EvalError> {
        self.receiver
            .as_str()
            .ok_or_else(|| type_mismatch("String", self.receiver.tag()))
    }

    /// Integer parameter at `index`.
    pub fn int(&self, index: usize) -> Result<i64, EvalError> {
        let value = self.param(index)?;
        value.as_int().ok_or_else(|| type_mismatch("Int", value.tag()))
    }

    /// String parameter at `index`.
    pub fn str(&self, index: usize) -> Result<&str, EvalError> {
        let value = self.param(index)?;
        value
            .as_str()
            .ok_or_else(|| type_mismatch("String", value.tag()))
    }
}
