//! Builder-side inputs, before resolution.

use sui_ptb_types::{CallArg, ObjectArg, ObjectId};

/// An input as the caller supplied it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum UnresolvedInput {
    /// Canonically encoded value.
    Pure(Vec<u8>),
    /// Object with a caller-provided concrete reference.
    Object(ObjectArg),
    /// Object known only by id; kind, version and digest come from a resolver.
    Abstract(ObjectId),
}

impl UnresolvedInput {
    pub fn object_id(&self) -> Option<ObjectId> {
        match self {
            UnresolvedInput::Pure(_) => None,
            UnresolvedInput::Object(arg) => Some(arg.id()),
            UnresolvedInput::Abstract(id) => Some(*id),
        }
    }

    pub fn is_abstract(&self) -> bool {
        matches!(self, UnresolvedInput::Abstract(_))
    }

    /// The resolved form, if no lookup is needed.
    pub fn as_call_arg(&self) -> Option<CallArg> {
        match self {
            UnresolvedInput::Pure(bytes) => Some(CallArg::Pure(bytes.clone())),
            UnresolvedInput::Object(arg) => Some(CallArg::Object(*arg)),
            UnresolvedInput::Abstract(_) => None,
        }
    }

    /// Fold a second reference to the same object into this one.
    ///
    /// A concrete reference replaces an abstract one. Two shared references
    /// keep the union of their `mutable` flags. Otherwise the first wins.
    pub(crate) fn merge(&mut self, other: UnresolvedInput) {
        if let UnresolvedInput::Object(incoming) = other {
            if self.is_abstract() {
                *self = UnresolvedInput::Object(incoming);
            } else if let (
                UnresolvedInput::Object(ObjectArg::SharedObject(existing)),
                ObjectArg::SharedObject(incoming),
            ) = (self, incoming)
            {
                existing.mutable |= incoming.mutable;
            }
        }
    }
}

impl From<CallArg> for UnresolvedInput {
    fn from(arg: CallArg) -> Self {
        match arg {
            CallArg::Pure(bytes) => UnresolvedInput::Pure(bytes),
            CallArg::Object(obj) => UnresolvedInput::Object(obj),
        }
    }
}
