//! Proptest generators for property-based testing.

use proptest::prelude::*;

use chanwatch_core::{ChannelId, IdError, IntoId, UserId};

/// An id as a caller might pass it: a number or its decimal string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdRepr {
    Int(i64),
    Text(String),
}

impl IdRepr {
    /// The integer this representation denotes.
    ///
    /// Panics if a `Text` form is not a decimal integer.
    pub fn value(&self) -> i64 {
        match self {
            IdRepr::Int(n) => *n,
            IdRepr::Text(s) => s.trim().parse().expect("IdRepr::Text holds a decimal integer"),
        }
    }
}

impl IntoId<UserId> for IdRepr {
    fn into_id(self) -> Result<UserId, IdError> {
        match self {
            IdRepr::Int(n) => n.into_id(),
            IdRepr::Text(s) => s.into_id(),
        }
    }
}

impl IntoId<ChannelId> for IdRepr {
    fn into_id(self) -> Result<ChannelId, IdError> {
        match self {
            IdRepr::Int(n) => n.into_id(),
            IdRepr::Text(s) => s.into_id(),
        }
    }
}

/// Generate a platform id. Channel ids on chat platforms are often negative.
pub fn raw_id() -> impl Strategy<Value = i64> {
    prop_oneof![1i64..=10_000_000_000, -1_009_999_999_999i64..=-1_000_000_000_000]
}

/// Generate an id in either representation, possibly with stray whitespace.
pub fn id_repr() -> impl Strategy<Value = IdRepr> {
    (raw_id(), 0u8..3).prop_map(|(n, style)| match style {
        0 => IdRepr::Int(n),
        1 => IdRepr::Text(n.to_string()),
        _ => IdRepr::Text(format!(" {} ", n)),
    })
}

/// Generate a display name.
pub fn name() -> impl Strategy<Value = String> {
    "[A-Za-z][A-Za-z0-9 _]{0,23}".prop_map(String::from)
}

/// Generate a channel username.
pub fn base_username() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{4,31}".prop_map(String::from)
}

/// Generate an opaque session blob.
pub fn session() -> impl Strategy<Value = serde_json::Value> {
    prop_oneof![
        "[A-Za-z0-9+/=]{1,64}".prop_map(serde_json::Value::String),
        (any::<i32>(), "[a-z]{1,8}")
            .prop_map(|(dc, key)| serde_json::json!({ "dc": dc, "key": key })),
    ]
}

/// A user-table mutation for count bookkeeping.
#[derive(Debug, Clone)]
pub enum UserOp {
    Add(i64, String),
    Delete(i64),
}

/// Generate a script of adds and deletes over distinct ids.
///
/// Every id is added at most once and only deleted after it was added, so
/// the expected count is simply adds minus deletes.
pub fn user_script() -> impl Strategy<Value = Vec<UserOp>> {
    prop::collection::btree_set(raw_id(), 0..24)
        .prop_flat_map(|ids| {
            let ids: Vec<i64> = ids.into_iter().collect();
            let n = ids.len();
            (
                Just(ids),
                prop::collection::vec(name(), n),
                prop::collection::vec(any::<bool>(), n),
            )
        })
        .prop_map(|(ids, names, deletes)| {
            let mut ops: Vec<UserOp> = ids
                .iter()
                .zip(names)
                .map(|(id, name)| UserOp::Add(*id, name))
                .collect();
            ops.extend(
                ids.iter()
                    .zip(deletes)
                    .filter(|(_, delete)| *delete)
                    .map(|(id, _)| UserOp::Delete(*id)),
            );
            ops
        })
}

/// Parameters for generating a channel.
#[derive(Debug, Clone)]
pub struct ChannelParams {
    pub user_id: i64,
    pub channel_id: i64,
    pub base_username: String,
    pub interval: i64,
    /// Whether the channel should be left active after insertion.
    pub active: bool,
}

/// Generate channels with distinct channel ids, spread over a few owners.
pub fn channel_set() -> impl Strategy<Value = Vec<ChannelParams>> {
    prop::collection::btree_set(raw_id(), 0..16).prop_flat_map(|channel_ids| {
        let channel_ids: Vec<i64> = channel_ids.into_iter().collect();
        let n = channel_ids.len();
        (
            Just(channel_ids),
            prop::collection::vec(
                (1i64..=4, base_username(), 1i64..=86_400, any::<bool>()),
                n,
            ),
        )
            .prop_map(|(channel_ids, rest)| {
                channel_ids
                    .into_iter()
                    .zip(rest)
                    .map(|(channel_id, (user_id, base_username, interval, active))| {
                        ChannelParams {
                            user_id,
                            channel_id,
                            base_username,
                            interval,
                            active,
                        }
                    })
                    .collect()
            })
    })
}
