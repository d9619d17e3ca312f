// SPDX-License-Identifier: Apache-2.0

//! Compile-time configuration validation
//!
//! Exactly one integer width feature must be selected, it decides the
//! [`Integer`](crate::Integer) type stored in leaf nodes.

#[cfg(not(any(feature = "int8", feature = "int32", feature = "int64")))]
compile_error!("No integer width features selected: choose one of 'int8', 'int32', or 'int64'");

#[cfg(all(feature = "int8", feature = "int32"))]
compile_error!(
    "Cannot enable both 'int8' and 'int32' features simultaneously: choose one integer width"
);

#[cfg(all(feature = "int8", feature = "int64"))]
compile_error!(
    "Cannot enable both 'int8' and 'int64' features simultaneously: choose one integer width"
);

#[cfg(all(feature = "int32", feature = "int64"))]
compile_error!(
    "Cannot enable both 'int32' and 'int64' features simultaneously: choose one integer width"
);
