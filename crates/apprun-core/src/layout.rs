//! Bundle-relative locations of the private runtime.

/// Directory of launcher-facing tool entry points, prepended to `PATH`.
pub const TOOL_DIR: &str = "fakebin";
/// Private dynamic loader used to start every dynamically linked program.
pub const DYNAMIC_LINKER: &str = "usr/lib/ld-linux.so";
pub const LIBRARY_DIR: &str = "usr/lib";
pub const BINARY_DIR: &str = "usr/bin";
pub const INTERPRETER_HOME: &str = "usr";
pub const INTERPRETER: &str = "usr/bin/python3";
