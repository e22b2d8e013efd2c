// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Error type shared by the whole crate.

use std::fmt;
use std::path::PathBuf;

/// Result type alias using `DepthError`.
pub type Result<T> = std::result::Result<T, DepthError>;

/// Errors that can occur while preparing a disparity map for viewing.
#[derive(Debug)]
pub enum DepthError {
    /// A command line value could not be used.
    InvalidArgument {
        /// Name of the argument.
        name: &'static str,
        /// Raw value as given by the user.
        value: String,
        /// What is wrong with it.
        reason: String,
    },
    /// The disparity image could not be read or decoded.
    ImageLoad {
        /// Path of the image.
        path: PathBuf,
        /// Underlying decoder message.
        reason: String,
    },
    /// The decoded image has a layout we cannot interpret as disparities.
    UnsupportedFormat(String),
    /// Every sample of the map is zero.
    NoValidDisparity,
}

impl DepthError {
    /// Shortcut for an `InvalidArgument` error.
    pub fn invalid_argument(name: &'static str, value: &str, reason: impl Into<String>) -> Self {
        DepthError::InvalidArgument {
            name,
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for DepthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DepthError::InvalidArgument {
                name,
                value,
                reason,
            } => write!(f, "Invalid {} \"{}\": {}", name, value, reason),
            DepthError::ImageLoad { path, reason } => write!(
                f,
                "Could not load disparity image {}: {}",
                path.display(),
                reason
            ),
            DepthError::UnsupportedFormat(msg) => write!(f, "Unsupported disparity image: {}", msg),
            DepthError::NoValidDisparity => {
                write!(f, "The disparity image contains no valid (non-zero) sample")
            }
        }
    }
}

impl std::error::Error for DepthError {}
