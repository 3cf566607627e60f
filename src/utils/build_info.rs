//! Compile-time build metadata produced by `build.rs`.

/// CLI semantic version derived from the crate metadata.
pub const CLI_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Multi-line version report shown by `luca --version`.
pub const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    "\ncommit: ",
    env!("LUCA_BUILD_HASH"),
    " (",
    env!("LUCA_BUILD_STATUS"),
    ")\nbuilt: ",
    env!("LUCA_BUILD_TIMESTAMP"),
    "\ntarget: ",
    env!("LUCA_BUILD_TARGET"),
    " (",
    env!("LUCA_BUILD_PROFILE"),
    ")\nrustc: ",
    env!("LUCA_BUILD_RUSTC"),
);
