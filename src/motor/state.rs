//! Drive power state.

/// Whether the driver stage is powered.
///
/// Disabled → Enabled clears the integral. Enabled → Disabled keeps the angle
/// estimate and the trajectory; it only stops angle bookkeeping on steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DriveState {
    /// Driver stage off.
    #[default]
    Disabled,
    /// Driver stage on.
    Enabled,
}

impl DriveState {
    /// State name for display/debugging.
    pub fn name(self) -> &'static str {
        match self {
            DriveState::Disabled => "Disabled",
            DriveState::Enabled => "Enabled",
        }
    }

    /// `true` for [`DriveState::Enabled`].
    #[inline]
    pub fn is_enabled(self) -> bool {
        self == DriveState::Enabled
    }
}

impl From<bool> for DriveState {
    fn from(enabled: bool) -> Self {
        if enabled {
            DriveState::Enabled
        } else {
            DriveState::Disabled
        }
    }
}
