//! Media picker capability — device photo selection behind a trait.
//!
//! The wizard's whole contract with the platform picker: ask for permission,
//! and on a granted, non-cancelled pick receive a resource locator. The real
//! implementation lives in the host shell.

use async_trait::async_trait;

/// Outcome of a permission request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    Granted,
    Denied,
}

/// Outcome of a pick request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickResult {
    /// The user backed out without choosing.
    Cancelled,
    /// A photo was chosen; `uri` locates it on the device.
    Picked { uri: String },
}

/// Device photo picker.
#[async_trait]
pub trait MediaPicker: Send + Sync {
    /// Ask the platform for photo-library access.
    async fn request_permission(&self) -> Permission;

    /// Open the picker. Only called after permission was granted.
    async fn pick_image(&self) -> PickResult;
}

/// Scriptable picker for tests and the demo binary.
pub struct MockMediaPicker {
    permission: Permission,
    result: PickResult,
}

impl MockMediaPicker {
    /// Grants permission and returns `uri`.
    pub fn picking(uri: impl Into<String>) -> Self {
        Self {
            permission: Permission::Granted,
            result: PickResult::Picked { uri: uri.into() },
        }
    }

    /// Grants permission, but the user cancels the pick.
    pub fn cancelling() -> Self {
        Self {
            permission: Permission::Granted,
            result: PickResult::Cancelled,
        }
    }

    /// Denies the permission request outright.
    pub fn denied() -> Self {
        Self {
            permission: Permission::Denied,
            result: PickResult::Cancelled,
        }
    }
}

#[async_trait]
impl MediaPicker for MockMediaPicker {
    async fn request_permission(&self) -> Permission {
        self.permission
    }

    async fn pick_image(&self) -> PickResult {
        self.result.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn picking_grants_and_returns_uri() {
        let picker = MockMediaPicker::picking("file:///photo.jpg");
        assert_eq!(picker.request_permission().await, Permission::Granted);
        assert_eq!(
            picker.pick_image().await,
            PickResult::Picked {
                uri: "file:///photo.jpg".to_string()
            }
        );
    }

    #[tokio::test]
    async fn denied_never_grants() {
        let picker = MockMediaPicker::denied();
        assert_eq!(picker.request_permission().await, Permission::Denied);
    }
}
