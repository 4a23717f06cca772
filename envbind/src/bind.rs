//! Structural binder: walks a record tree and fills it from a [`Snapshot`].

use crate::coerce::Coerce;
use crate::error::BindError;
use crate::snapshot::Snapshot;
use crate::tag::Tag;
use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

/// Separator between prefix segments and the variable name.
pub const SEGMENT_SEPARATOR: &str = "_";

/// Options for a single [`bind`] call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Options {
    /// Start the prefix path empty instead of with the root type's segment.
    pub ignore_prefix: bool,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ignore_prefix(mut self, ignore_prefix: bool) -> Self {
        self.ignore_prefix = ignore_prefix;
        self
    }
}

/// Static description of one field, emitted by `#[derive(EnvBind)]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Declared field name.
    pub name: &'static str,
    /// Raw `#[env("...")]` tag, empty when the field has none.
    pub tag: &'static str,
}

impl FieldDescriptor {
    pub const fn new(name: &'static str, tag: &'static str) -> Self {
        Self { name, tag }
    }
}

/// A record whose fields can be bound from a snapshot.
///
/// Implemented by `#[derive(EnvBind)]`. The generated `bind_fields` calls
/// [`BindField::bind_field`] for every field in declaration order.
pub trait EnvBind {
    /// Prefix segment this record contributes, the type name by default.
    const SEGMENT: &'static str;

    /// Bind every field of `self`, using the prefix path held by `binder`.
    fn bind_fields(&mut self, binder: &mut Binder<'_>) -> Result<(), BindError>;

    /// Build a default instance and bind `snapshot` onto it.
    fn from_snapshot(snapshot: &Snapshot, options: &Options) -> Result<Self, BindError>
    where
        Self: Sized + Default,
    {
        let mut target = Self::default();
        bind(&mut target, snapshot, options)?;
        Ok(target)
    }

    /// Load configuration from the process environment
    ///
    /// # Errors
    ///
    /// - Required environment variables are not set
    /// - Environment variable values cannot be coerced into target types
    fn from_env() -> Result<Self, BindError>
    where
        Self: Sized + Default,
    {
        Self::from_snapshot(&Snapshot::from_process_env(), &Options::default())
    }
}

/// A field type the binder knows how to fill.
///
/// Leaf types coerce a single variable. Records and `Option` of records
/// recurse without consuming the field's tag.
pub trait BindField {
    fn bind_field(
        &mut self,
        binder: &mut Binder<'_>,
        field: &FieldDescriptor,
    ) -> Result<(), BindError>;
}

/// Bind `snapshot` onto `target` in place.
///
/// On error the target is left partially populated.
pub fn bind<T: EnvBind>(
    target: &mut T,
    snapshot: &Snapshot,
    options: &Options,
) -> Result<(), BindError> {
    let mut binder = Binder::new(snapshot);
    if options.ignore_prefix {
        target.bind_fields(&mut binder)
    } else {
        binder.nested(target)
    }
}

/// Walk state for one [`bind`] call.
#[derive(Debug)]
pub struct Binder<'a> {
    snapshot: &'a Snapshot,
    prefix: Vec<String>,
}

impl<'a> Binder<'a> {
    pub fn new(snapshot: &'a Snapshot) -> Self {
        Self {
            snapshot,
            prefix: Vec::new(),
        }
    }

    /// Current prefix path, outermost record first.
    pub fn prefix(&self) -> &[String] {
        &self.prefix
    }

    /// Fully-qualified variable name for `name` under the current prefix path.
    pub fn qualify(&self, name: &str) -> String {
        let mut key = self.prefix.join(SEGMENT_SEPARATOR);
        if !key.is_empty() {
            key.push_str(SEGMENT_SEPARATOR);
        }
        key.push_str(name);
        key.to_uppercase()
    }

    /// Bind a nested record under its own segment.
    pub fn nested<T: EnvBind>(&mut self, target: &mut T) -> Result<(), BindError> {
        self.prefix.push(T::SEGMENT.to_uppercase());
        let result = target.bind_fields(self);
        self.prefix.pop();
        result
    }

    /// Resolve and coerce a leaf field.
    ///
    /// Candidates are tried in tag order and the first present one wins, even
    /// when its value is empty. Without a match, `required` fails before the
    /// default is considered.
    pub fn leaf<T: Coerce>(&self, slot: &mut T, field: &FieldDescriptor) -> Result<(), BindError> {
        let tag = Tag::parse(field.tag, field.name);

        let mut key = String::new();
        let mut found = None;
        for name in &tag.names {
            key = self.qualify(name);
            if let Some(value) = self.snapshot.get(&key) {
                found = Some(value);
                break;
            }
        }

        let raw = match found {
            Some(value) => {
                tracing::debug!(field = field.name, key = %key, "bound from snapshot");
                value
            }
            None if tag.required => return Err(BindError::missing(key)),
            None => {
                tracing::debug!(field = field.name, key = %key, "bound from default");
                tag.default.as_deref().unwrap_or_default()
            }
        };

        *slot = T::coerce(raw).map_err(|e| BindError::parse_error::<T>(key, e))?;
        Ok(())
    }
}

macro_rules! impl_bind_leaf {
    ($($t:ty),*) => {$(
        impl BindField for $t {
            fn bind_field(
                &mut self,
                binder: &mut Binder<'_>,
                field: &FieldDescriptor,
            ) -> Result<(), BindError> {
                binder.leaf(self, field)
            }
        }
    )*};
}

impl_bind_leaf!(
    bool, String, Duration, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32,
    f64
);

impl<T: Coerce> BindField for Vec<T> {
    fn bind_field(
        &mut self,
        binder: &mut Binder<'_>,
        field: &FieldDescriptor,
    ) -> Result<(), BindError> {
        binder.leaf(self, field)
    }
}

impl<K, V> BindField for HashMap<K, V>
where
    HashMap<K, V>: Coerce,
{
    fn bind_field(
        &mut self,
        binder: &mut Binder<'_>,
        field: &FieldDescriptor,
    ) -> Result<(), BindError> {
        binder.leaf(self, field)
    }
}

impl<K, V> BindField for BTreeMap<K, V>
where
    BTreeMap<K, V>: Coerce,
{
    fn bind_field(
        &mut self,
        binder: &mut Binder<'_>,
        field: &FieldDescriptor,
    ) -> Result<(), BindError> {
        binder.leaf(self, field)
    }
}

impl<T> BindField for Option<T>
where
    T: EnvBind + Default,
{
    /// An absent record is materialized first so its defaults still apply.
    fn bind_field(
        &mut self,
        binder: &mut Binder<'_>,
        _field: &FieldDescriptor,
    ) -> Result<(), BindError> {
        binder.nested(self.get_or_insert_with(T::default))
    }
}
