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

mod bundler;
pub use bundler::BundlerProvider;
#[cfg(any(test, feature = "test-utils"))]
pub use bundler::MockBundlerProvider;

mod error;
pub use error::{ProviderError, ProviderResult};

mod evm;
pub use evm::EvmProvider;
#[cfg(any(test, feature = "test-utils"))]
pub use evm::MockEvmProvider;
