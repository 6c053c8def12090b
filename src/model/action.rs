use serde::Deserialize;

/// Direction of an association change in a patch request.
///
/// Distinguishes adding links (`append`, the default when the caller supplies
/// no action) from removing them (`remove`). Only association id lists are
/// affected; scalar fields are applied the same way under either action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssociationAction {
    #[default]
    Append,
    Remove,
}
