// This file is part of Claimer.
//
// Claimer is free software: you can redistribute it and/or modify it under the
// terms of the GNU Lesser General Public License as published by the Free Software
// Foundation, either version 3 of the License, or (at your option) any later version.
//
// Claimer is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.
// See the GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along with Claimer.
// If not, see https://www.gnu.org/licenses/.

/// Stage at which the claim pipeline failed
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Required configuration is absent
    ConfigMissing,
    /// Personal wallet could not be loaded or created
    PersonalWalletInitFailed,
    /// Smart wallet could not be bound to its factory
    SmartWalletSetupFailed,
    /// SDK client could not be built
    SdkInitFailed,
    /// Claim preparation or submission failed
    ClaimFailed,
}

/// Error returned by the claim pipeline
///
/// Each stage wraps its cause, the full cause chain is part of the message.
#[derive(Debug, thiserror::Error)]
pub enum ClaimError {
    /// No API secret key configured
    #[error("No API Key found. Get one from https://thirdweb.com/dashboard")]
    ConfigMissing,
    /// Personal wallet stage failed
    #[error("failed to initialize personal wallet: {0:#}")]
    PersonalWalletInitFailed(anyhow::Error),
    /// Smart wallet stage failed
    #[error("failed to setup smart wallet: {0:#}")]
    SmartWalletSetupFailed(anyhow::Error),
    /// SDK stage failed
    #[error("failed to initialize SDK: {0:#}")]
    SdkInitFailed(anyhow::Error),
    /// Claim stage failed
    #[error("failed to claim tokens: {0:#}")]
    ClaimFailed(anyhow::Error),
}

impl ClaimError {
    /// The stage this error belongs to
    pub fn kind(&self) -> ErrorKind {
        match self {
            ClaimError::ConfigMissing => ErrorKind::ConfigMissing,
            ClaimError::PersonalWalletInitFailed(_) => ErrorKind::PersonalWalletInitFailed,
            ClaimError::SmartWalletSetupFailed(_) => ErrorKind::SmartWalletSetupFailed,
            ClaimError::SdkInitFailed(_) => ErrorKind::SdkInitFailed,
            ClaimError::ClaimFailed(_) => ErrorKind::ClaimFailed,
        }
    }
}
